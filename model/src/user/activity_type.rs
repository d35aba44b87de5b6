use num_derive::FromPrimitive;
use num_traits::FromPrimitive;
use serde::{Deserialize, Serialize};

/// Serialized by name for snapshot consumers; upstream documents carry the
/// numeric code, converted with [`ActivityType::from_i64`].
#[derive(Serialize, Deserialize, Copy, Clone, Debug, Eq, FromPrimitive, PartialEq, Hash)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum ActivityType {
    Game = 0,
    Streaming = 1,
    Listening = 2,
    Watching = 3,
    Custom = 4,
    Competing = 5,
}

impl ActivityType {
    pub fn from_i64(value: i64) -> Option<ActivityType> {
        FromPrimitive::from_i64(value)
    }
}
