use serde::{Deserialize, Serialize};

use crate::Snowflake;

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Role {
    pub id: Snowflake,
    pub name: String,
    /// 0 means the role has no colour
    #[serde(default)]
    pub color: u32,
    #[serde(default)]
    pub hoist: bool,
    #[serde(default)]
    pub position: i32,
    #[serde(default)]
    pub managed: bool,
    #[serde(default)]
    pub mentionable: bool,
}
