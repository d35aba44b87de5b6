use serde::{Deserialize, Serialize};

use super::{ActivityType, Timestamps};

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Activity {
    #[serde(default)]
    pub name: Option<String>,

    /// Raw type code. Kept as a wide integer so that any code added upstream
    /// still parses; see [`Activity::kind`].
    #[serde(rename = "type")]
    pub activity_type: i64,

    /// only valid when activity_type = streaming
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamps: Option<Timestamps>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
}

impl Activity {
    pub fn kind(&self) -> Option<ActivityType> {
        ActivityType::from_i64(self.activity_type)
    }
}
