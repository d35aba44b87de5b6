use model::guild::{Member, PartialGuild, Role, VoiceState};
use model::presence::{
    Activity, GuildSummary, PresenceSnapshot, RoleBadge, SnapshotPresence, SnapshotUser,
    TimeRange, VoiceSummary,
};
use model::user::{self, ActivityType};
use model::Snowflake;
use std::collections::HashMap;

pub fn compose(
    member: Option<Member>,
    voice_state: Option<VoiceState>,
    roles: Option<Vec<Role>>,
    guild: Option<PartialGuild>,
) -> PresenceSnapshot {
    let definitions = roles.unwrap_or_default();

    let (user, presence, roles) = match member {
        Some(member) => {
            let user = member.user.map(|user| SnapshotUser {
                id: user.id,
                display_name: user.display_name().to_owned(),
                avatar_ref: user.avatar,
                discriminator: user.discriminator,
            });

            let presence = member.presence.map(|presence| SnapshotPresence {
                status: presence.status.into(),
                custom_status_text: custom_status_text(&presence.activities),
                activities: convert_activities(&presence.activities),
            });

            (user, presence, project_roles(&member.roles, &definitions))
        }
        None => (None, None, Vec::new()),
    };

    PresenceSnapshot {
        user,
        presence,
        roles,
        voice: voice_state.map(|state| VoiceSummary {
            channel_ref: state.channel_id,
            muted: state.is_muted(),
            deafened: state.is_deafened(),
        }),
        guild_summary: guild.map(|guild| GuildSummary {
            id: guild.id,
            name: guild.name,
            icon_ref: guild.icon,
        }),
    }
}

/// Maps the member's role ids onto their definitions, in the member's order.
/// Ids without a definition are dropped, so a failed definitions lookup
/// yields no badges at all.
pub fn project_roles(member_roles: &[Snowflake], definitions: &[Role]) -> Vec<RoleBadge> {
    let by_id: HashMap<Snowflake, &Role> = definitions.iter().map(|r| (r.id, r)).collect();

    member_roles
        .iter()
        .filter_map(|id| by_id.get(id))
        .map(|role| RoleBadge::new(role.id, role.name.clone(), role.color))
        .collect()
}

/// State text of the first custom status activity.
pub fn custom_status_text(activities: &[user::Activity]) -> Option<String> {
    activities
        .iter()
        .find(|activity| activity.kind() == Some(ActivityType::Custom))
        .and_then(|activity| activity.state.clone())
        .filter(|text| !text.is_empty())
}

pub fn convert_activities(activities: &[user::Activity]) -> Vec<Activity> {
    activities
        .iter()
        .filter_map(|activity| {
            let kind = activity.kind()?;
            let (start, end) = activity
                .timestamps
                .map(|t| (t.start, t.end))
                .unwrap_or_default();

            Some(Activity {
                kind,
                name: activity.name.clone(),
                detail: activity.details.clone(),
                state_text: activity.state.clone(),
                time_range: TimeRange::new(start, end),
            })
        })
        .collect()
}
