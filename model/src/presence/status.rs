use serde::{Deserialize, Serialize};

use crate::user::StatusType;

#[derive(Serialize, Deserialize, Debug, Copy, Clone, Eq, PartialEq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum PresenceStatus {
    Online,
    Idle,
    DoNotDisturb,
    Offline,
}

impl From<StatusType> for PresenceStatus {
    fn from(status: StatusType) -> Self {
        match status {
            StatusType::Online => PresenceStatus::Online,
            StatusType::Idle => PresenceStatus::Idle,
            StatusType::Dnd => PresenceStatus::DoNotDisturb,
            // Invisible users appear offline to everyone else
            StatusType::Invisible | StatusType::Offline | StatusType::Unknown => {
                PresenceStatus::Offline
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_status_type() {
        assert_eq!(PresenceStatus::from(StatusType::Dnd), PresenceStatus::DoNotDisturb);
        assert_eq!(PresenceStatus::from(StatusType::Invisible), PresenceStatus::Offline);
        assert_eq!(PresenceStatus::from(StatusType::Unknown), PresenceStatus::Offline);
    }

    #[test]
    fn test_serialize() {
        let json = serde_json::to_string(&PresenceStatus::DoNotDisturb).unwrap();
        assert_eq!(json, r#""doNotDisturb""#);
    }
}
