//! Macros for ergonomic state machine construction.

/// Declare a fieldless state enum and implement [`State`](crate::core::State) for it.
///
/// Each variant's name is its identifier.
///
/// # Example
///
/// ```
/// use tickstate::core::State;
/// use tickstate::state_enum;
///
/// state_enum! {
///     pub enum HubPhase {
///         Inactive,
///         Active,
///         Scoring,
///     }
/// }
///
/// assert_eq!(HubPhase::Scoring.name(), "Scoring");
/// ```
#[macro_export]
macro_rules! state_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, serde::Serialize)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant
            ),*
        }

        impl $crate::core::State for $name {
            fn name(&self) -> &'static str {
                match self {
                    $(Self::$variant => stringify!($variant)),*
                }
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::core::State;

    state_enum! {
        enum TestState {
            Initial,
            Processing,
            Complete,
        }
    }

    #[test]
    fn state_enum_macro_generates_trait() {
        assert_eq!(TestState::Initial.name(), "Initial");
        assert_eq!(TestState::Processing.name(), "Processing");
        assert_eq!(TestState::Complete.name(), "Complete");
    }

    #[test]
    fn state_enum_supports_visibility_and_attributes() {
        state_enum! {
            /// Documented enum.
            pub enum PublicState {
                /// First
                A,
                B,
            }
        }

        assert_eq!(PublicState::A.name(), "A");
        assert_ne!(PublicState::A, PublicState::B);
    }

    #[test]
    fn generated_enum_serializes_as_variant_name() {
        let json = serde_json::to_string(&TestState::Processing).unwrap();
        assert_eq!(json, "\"Processing\"");
    }
}
