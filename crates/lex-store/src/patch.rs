//! Partial updates
//!
//! A state type is never mutated in place. Writers describe the fields they
//! want to change with a patch value and the store builds the next snapshot
//! with [`Merge::merge`].

/// Shallow merge of a patch into a state value
pub trait Merge: Sized {
    /// Partial update type; `Default` must be the empty patch
    type Patch: Default;

    /// Build the next state: patched fields replaced, every other field
    /// carried over from `self`
    #[must_use]
    fn merge(&self, patch: Self::Patch) -> Self;
}

/// Declare a state struct, its patch struct and the [`Merge`] impl
///
/// Every field of the state gets an `Option` counterpart on the patch. A
/// `None` keeps the current value, `Some(v)` replaces it. Fields that are
/// themselves optional become `Option<Option<_>>` so they can be cleared
/// with `Some(None)`.
///
/// ```rust
/// use lex_store::{define_state, Merge};
///
/// define_state! {
///     /// Panel state
///     #[derive(Debug, Clone, Default, PartialEq)]
///     pub struct Panel, patch PanelPatch {
///         /// Whether the panel is open
///         pub open: bool,
///         /// Focused item
///         pub focused: Option<String>,
///     }
/// }
///
/// let panel = Panel { open: true, focused: Some("a".into()) };
/// let next = panel.merge(PanelPatch { focused: Some(None), ..Default::default() });
/// assert!(next.open);
/// assert_eq!(next.focused, None);
/// ```
#[macro_export]
macro_rules! define_state {
    (
        $(#[$smeta:meta])*
        $vis:vis struct $state:ident, patch $patch:ident {
            $(
                $(#[$fmeta:meta])*
                $fvis:vis $field:ident : $ty:ty
            ),* $(,)?
        }
    ) => {
        $(#[$smeta])*
        $vis struct $state {
            $(
                $(#[$fmeta])*
                $fvis $field: $ty,
            )*
        }

        #[doc = concat!("Partial update for [`", stringify!($state), "`]; `None` keeps the current value.")]
        #[derive(Debug, Clone, Default, PartialEq)]
        $vis struct $patch {
            $(
                #[doc = concat!("Replacement for `", stringify!($field), "`")]
                $fvis $field: ::core::option::Option<$ty>,
            )*
        }

        impl $crate::Merge for $state {
            type Patch = $patch;

            fn merge(&self, patch: $patch) -> Self {
                Self {
                    $(
                        $field: match patch.$field {
                            ::core::option::Option::Some(value) => value,
                            ::core::option::Option::None => ::core::clone::Clone::clone(&self.$field),
                        },
                    )*
                }
            }
        }
    };
}
