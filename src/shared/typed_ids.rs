use core::num::NonZeroUsize;
use std::fmt::{self, Debug};

/// Macro to implement typesafe ids.
macro_rules! impl_typed_id {
    ($name:ident, $string:expr) => {
        #[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[doc = $string]
        pub struct $name(NonZeroUsize);
        impl $name {
            /// Converts the typed id into a usize. Useful to avoid `Into::<usize>::into(self)` when inference fails.
            pub fn into_usize(self: Self) -> usize {
                self.into()
            }
        }
        impl From<$name> for usize {
            fn from(input: $name) -> usize {
                Into::<usize>::into(input.0) - 1
            }
        }
        impl From<usize> for $name {
            fn from(input: usize) -> $name {
                match NonZeroUsize::new(input.wrapping_add(1)) {
                    Some(v) => Self(v),
                    None => panic!("Input usize overflowed"),
                }
            }
        }
        impl Debug for $name {
            fn fmt(self: &Self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), Into::<usize>::into(*self))
            }
        }
    };
}

impl_typed_id!(TypeId, "Index of a resolved type within a `TypeTable`.");
impl_typed_id!(DefinitionId, "Index of a `type` definition within a `Program`.");
