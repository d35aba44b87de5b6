use serde::{Deserialize, Serialize};

use super::{Activity, StatusType};

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Presence {
    pub status: StatusType,
    #[serde(default)]
    pub activities: Vec<Activity>,
}
