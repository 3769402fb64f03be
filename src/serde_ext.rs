//! Numeric on/off settings
//!
//! The badge documents store switches as integers: `0` is off, anything
//! else is on. They are written back the same way so a saved document
//! always loads again.

use serde::{Deserialize, Deserializer, Serializer};

/// Read an integer switch
pub(crate) fn number_as_bool<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    u64::deserialize(deserializer).map(|value| value != 0)
}

/// Write a switch as `0` or `1`
#[allow(clippy::trivially_copy_pass_by_ref)]
pub(crate) fn bool_as_number<S: Serializer>(value: &bool, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u8(u8::from(*value))
}
