use serde::{Deserialize, Serialize};

use crate::Snowflake;

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct VoiceState {
    #[serde(default)]
    pub guild_id: Option<Snowflake>,
    #[serde(default)]
    pub channel_id: Option<Snowflake>,
    #[serde(default)]
    pub deaf: bool,
    #[serde(default)]
    pub mute: bool,
    #[serde(default)]
    pub self_deaf: bool,
    #[serde(default)]
    pub self_mute: bool,
}

impl VoiceState {
    pub fn is_muted(&self) -> bool {
        self.mute || self.self_mute
    }

    pub fn is_deafened(&self) -> bool {
        self.deaf || self.self_deaf
    }
}
