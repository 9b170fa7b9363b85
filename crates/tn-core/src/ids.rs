use core::fmt;
use core::num::NonZeroU32;

use crate::{TnError, TnResult};

/// Defines a compact, stable arena identifier.
///
/// - `u32` keeps memory small
/// - `NonZero` enables `Option<Id>` to be pointer-optimized
/// - one distinct type per entity kind, so a `TubeId` can never index cities
macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident, $what:literal) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(NonZeroU32);

        impl $name {
            /// Create an id from a 0-based arena index by storing index+1.
            pub fn from_index(index: u32) -> Self {
                Self(NonZeroU32::MIN.saturating_add(index))
            }

            /// Id for the slot that will be pushed onto an arena of length `len`.
            pub fn for_slot(len: usize) -> TnResult<Self> {
                match u32::try_from(len) {
                    Ok(index) if index < u32::MAX => Ok(Self::from_index(index)),
                    _ => Err(TnError::IndexOob {
                        what: $what,
                        index: len,
                        len: u32::MAX as usize,
                    }),
                }
            }

            /// Recover the 0-based arena index.
            pub fn index(self) -> usize {
                (self.0.get() - 1) as usize
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.index())
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.index())
            }
        }
    };
}

define_id!(
    /// Arena handle of a city.
    CityId,
    "CityId"
);
define_id!(
    /// Arena handle of a cohort.
    CohortId,
    "CohortId"
);
define_id!(
    /// Arena handle of a (cohort, sample type) pair.
    TypeId,
    "TypeId"
);
define_id!(
    /// Arena handle of a tube.
    TubeId,
    "TubeId"
);
define_id!(
    /// Arena handle of an arc. Slots of deleted arcs are never reused.
    ArcId,
    "ArcId"
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_round_trip_index() {
        for i in [0_u32, 1, 2, 42, 10_000] {
            let id = CityId::from_index(i);
            assert_eq!(id.index(), i as usize);
        }
    }

    #[test]
    fn option_id_is_small() {
        // This is a classic reason for NonZero: Option<Id> can be same size as Id.
        assert_eq!(
            core::mem::size_of::<ArcId>(),
            core::mem::size_of::<Option<ArcId>>()
        );
    }

    #[test]
    fn for_slot_matches_arena_length() {
        let id = TubeId::for_slot(7).unwrap();
        assert_eq!(id.index(), 7);
        assert!(matches!(
            TubeId::for_slot(u32::MAX as usize),
            Err(TnError::IndexOob { what: "TubeId", .. })
        ));
    }

    #[test]
    fn debug_names_the_kind() {
        assert_eq!(format!("{:?}", ArcId::from_index(3)), "ArcId(3)");
        assert_eq!(format!("{}", ArcId::from_index(3)), "3");
    }
}
