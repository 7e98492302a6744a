//! Strongly typed, zero-cost identifier wrappers.
//!
//! All IDs are `Copy + Ord + Hash` so they can be used as map keys and sorted
//! collection elements without ceremony.  "Not applicable" is expressed as
//! `Option<Id>` inside the crate; only the wire format uses the `-1`
//! sentinel, via [`WIRE_SENTINEL`] and the `to_wire` / `from_wire` helpers.

use std::fmt;

/// Value written to the `drone_id` / `zone_id` columns when a record has no
/// drone or is not zone-scoped.
pub const WIRE_SENTINEL: i64 = -1;

/// Generate a typed ID wrapper around an unsigned integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl $name {
            /// Encode an optional ID as a signed wire integer (`None` → `-1`).
            #[inline]
            pub fn to_wire(id: Option<$name>) -> i64 {
                id.map_or(WIRE_SENTINEL, |id| id.0 as i64)
            }

            /// Decode a signed wire integer.  Any negative value maps to
            /// `None`; values that do not fit the inner type are an error.
            pub fn from_wire(raw: i64) -> Result<Option<$name>, std::num::TryFromIntError> {
                if raw < 0 {
                    return Ok(None);
                }
                <$inner>::try_from(raw).map(|v| Some($name(v)))
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }
    };
}

typed_id! {
    /// Globally unique zone identifier.  Allocated in strictly increasing
    /// order from 0 by the batch driver; never reused within a run.
    pub struct ZoneId(u64);
}

typed_id! {
    /// Index of a drone in the fleet, `0..drone_count`.
    pub struct DroneId(u32);
}
