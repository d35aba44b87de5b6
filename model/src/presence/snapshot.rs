use serde::{Deserialize, Serialize};

use super::PresenceStatus;
use crate::user::ActivityType;
use crate::{Discriminator, ImageHash, Snowflake};

/// A snapshot with every field absent is valid: it means the target user
/// could not be reached, not that aggregation failed.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PresenceSnapshot {
    pub user: Option<SnapshotUser>,
    pub presence: Option<SnapshotPresence>,
    #[serde(default)]
    pub roles: Vec<RoleBadge>,
    pub voice: Option<VoiceSummary>,
    pub guild_summary: Option<GuildSummary>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotUser {
    pub id: Snowflake,
    pub display_name: String,
    pub avatar_ref: Option<ImageHash>,
    pub discriminator: Option<Discriminator>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotPresence {
    pub status: PresenceStatus,
    #[serde(default)]
    pub activities: Vec<Activity>,
    pub custom_status_text: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    pub kind: ActivityType,
    pub name: Option<String>,
    pub detail: Option<String>,
    pub state_text: Option<String>,
    pub time_range: Option<TimeRange>,
}

/// Unix milliseconds. At least one bound is present.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TimeRange {
    pub start_millis: Option<u64>,
    pub end_millis: Option<u64>,
}

impl TimeRange {
    pub fn new(start_millis: Option<u64>, end_millis: Option<u64>) -> Option<TimeRange> {
        if start_millis.is_none() && end_millis.is_none() {
            None
        } else {
            Some(TimeRange {
                start_millis,
                end_millis,
            })
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RoleBadge {
    pub id: Snowflake,
    pub name: String,
    /// 24-bit RGB. `None` where the role has no colour of its own.
    pub color_value: Option<u32>,
}

impl RoleBadge {
    pub fn new(id: Snowflake, name: String, color: u32) -> RoleBadge {
        let color_value = match color & 0xFF_FF_FF {
            0 => None,
            rgb => Some(rgb),
        };

        RoleBadge {
            id,
            name,
            color_value,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VoiceSummary {
    pub channel_ref: Option<Snowflake>,
    pub muted: bool,
    pub deafened: bool,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GuildSummary {
    pub id: Snowflake,
    pub name: String,
    pub icon_ref: Option<ImageHash>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_snapshot_shape() {
        let value = serde_json::to_value(PresenceSnapshot::default()).unwrap();
        assert_eq!(
            value,
            json!({
                "user": null,
                "presence": null,
                "roles": [],
                "voice": null,
                "guildSummary": null,
            })
        );
    }

    #[test]
    fn test_role_colour_sentinel() {
        assert_eq!(RoleBadge::new(Snowflake(1), "a".into(), 0).color_value, None);
        assert_eq!(
            RoleBadge::new(Snowflake(1), "a".into(), 0x3498db).color_value,
            Some(0x3498db)
        );
    }

    #[test]
    fn test_time_range_requires_a_bound() {
        assert_eq!(TimeRange::new(None, None), None);
        assert!(TimeRange::new(Some(1), None).is_some());
    }

    #[test]
    fn test_activity_shape() {
        let activity = Activity {
            kind: ActivityType::Listening,
            name: Some("Spotify".into()),
            detail: Some("Song".into()),
            state_text: Some("Artist".into()),
            time_range: TimeRange::new(Some(1000), Some(2000)),
        };

        assert_eq!(
            serde_json::to_value(&activity).unwrap(),
            json!({
                "kind": "listening",
                "name": "Spotify",
                "detail": "Song",
                "stateText": "Artist",
                "timeRange": {"startMillis": 1000, "endMillis": 2000},
            })
        );
    }
}
