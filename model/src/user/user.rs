use serde::{Deserialize, Serialize};

use crate::{Discriminator, ImageHash, Snowflake};

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct User {
    pub id: Snowflake,
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub global_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discriminator: Option<Discriminator>,
    #[serde(default)]
    pub avatar: Option<ImageHash>,
    #[serde(default)]
    pub bot: bool,
}

impl User {
    /// The name shown in clients: the user's global display name if set,
    /// falling back to the unique username
    pub fn display_name(&self) -> &str {
        self.global_name.as_deref().unwrap_or(&self.username)
    }
}
