use serde::{Deserialize, Serialize};

use crate::{ImageHash, Snowflake};

/// The fields of `GET /guilds/{guild.id}` the card cares about. Everything
/// else in the document is ignored.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct PartialGuild {
    pub id: Snowflake,
    pub name: String,
    #[serde(default)]
    pub icon: Option<ImageHash>,
}
