//! Pure projection of a snapshot into what the card shows. Nothing in here
//! performs I/O or touches polling state; "now" is always passed in.

mod render;
pub use render::render;

use chrono::{DateTime, Utc};
use model::presence::{
    Activity, GuildSummary, PresenceSnapshot, PresenceStatus, RoleBadge, SnapshotUser, TimeRange,
};
use model::user::ActivityType;

const CDN_BASE: &str = "https://cdn.discordapp.com";
pub const NEUTRAL_ROLE_COLOUR: &str = "#4b5563";

/// Kinds shown as highlight rows, in display order. Custom statuses are shown
/// as the status line instead.
const HIGHLIGHT_ORDER: [ActivityType; 5] = [
    ActivityType::Game,
    ActivityType::Streaming,
    ActivityType::Watching,
    ActivityType::Competing,
    ActivityType::Listening,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusAccent {
    Green,
    Yellow,
    Red,
    Grey,
}

impl StatusAccent {
    pub fn for_status(status: Option<PresenceStatus>) -> StatusAccent {
        match status {
            Some(PresenceStatus::Online) => StatusAccent::Green,
            Some(PresenceStatus::Idle) => StatusAccent::Yellow,
            Some(PresenceStatus::DoNotDisturb) => StatusAccent::Red,
            Some(PresenceStatus::Offline) | None => StatusAccent::Grey,
        }
    }

    pub fn hex(&self) -> &'static str {
        match self {
            StatusAccent::Green => "#22c55e",
            StatusAccent::Yellow => "#eab308",
            StatusAccent::Red => "#ef4444",
            StatusAccent::Grey => "#6b7280",
        }
    }

    /// 24-bit ANSI foreground escape for terminals
    pub fn ansi(&self) -> &'static str {
        match self {
            StatusAccent::Green => "\x1b[38;2;34;197;94m",
            StatusAccent::Yellow => "\x1b[38;2;234;179;8m",
            StatusAccent::Red => "\x1b[38;2;239;68;68m",
            StatusAccent::Grey => "\x1b[38;2;107;114;128m",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CardView {
    pub display_name: String,
    /// `#1234`, only for accounts that still have a legacy discriminator
    pub tag: Option<String>,
    pub avatar_url: String,
    pub accent: StatusAccent,
    pub custom_status: Option<String>,
    pub guild: Option<GuildLine>,
    pub highlights: Vec<Highlight>,
    pub voice: Option<VoiceLine>,
    pub roles: Vec<RoleLine>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GuildLine {
    pub name: String,
    pub icon_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Highlight {
    pub kind: ActivityType,
    pub headline: String,
    pub detail: Option<String>,
    pub state_text: Option<String>,
    /// Elapsed share of a listening activity, 0 to 1
    pub progress: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoiceLine {
    pub muted: bool,
    pub deafened: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleLine {
    pub name: String,
    pub colour: String,
}

/// `None` when the snapshot has no user to show.
pub fn project(snapshot: &PresenceSnapshot, now: DateTime<Utc>) -> Option<CardView> {
    let user = snapshot.user.as_ref()?;
    let presence = snapshot.presence.as_ref();
    let activities = presence.map(|p| &p.activities[..]).unwrap_or_default();

    Some(CardView {
        display_name: user.display_name.clone(),
        tag: user
            .discriminator
            .filter(|d| d.is_legacy())
            .map(|d| format!("#{}", d)),
        avatar_url: avatar_url(user),
        accent: StatusAccent::for_status(presence.map(|p| p.status)),
        custom_status: presence.and_then(|p| p.custom_status_text.clone()),
        guild: snapshot.guild_summary.as_ref().map(|guild| GuildLine {
            name: guild.name.clone(),
            icon_url: guild_icon_url(guild),
        }),
        highlights: highlights(activities)
            .into_iter()
            .map(|activity| highlight(activity, now))
            .collect(),
        voice: snapshot
            .voice
            .as_ref()
            .filter(|voice| voice.channel_ref.is_some())
            .map(|voice| VoiceLine {
                muted: voice.muted,
                deafened: voice.deafened,
            }),
        roles: snapshot
            .roles
            .iter()
            .map(|role| RoleLine {
                name: role.name.clone(),
                colour: role_colour(role),
            })
            .collect(),
    })
}

pub fn avatar_url(user: &SnapshotUser) -> String {
    match &user.avatar_ref {
        Some(hash) => format!("{}/avatars/{}/{}.png?size=256", CDN_BASE, user.id, hash),
        None => {
            let index = user
                .discriminator
                .map(|d| d.default_avatar_index())
                .unwrap_or(0);

            format!("{}/embed/avatars/{}.png", CDN_BASE, index)
        }
    }
}

pub fn guild_icon_url(guild: &GuildSummary) -> Option<String> {
    guild
        .icon_ref
        .map(|hash| format!("{}/icons/{}/{}.png?size=32", CDN_BASE, guild.id, hash))
}

pub fn role_colour(role: &RoleBadge) -> String {
    match role.color_value {
        Some(rgb) => format!("#{:06x}", rgb),
        None => NEUTRAL_ROLE_COLOUR.to_owned(),
    }
}

/// The first activity of each highlighted kind.
pub fn highlights(activities: &[Activity]) -> Vec<&Activity> {
    HIGHLIGHT_ORDER
        .iter()
        .filter_map(|kind| activities.iter().find(|activity| activity.kind == *kind))
        .collect()
}

/// `clamp((now - start) / (end - start), 0, 1)`. Undefined without both
/// bounds or for an empty range.
pub fn progress_ratio(range: &TimeRange, now_millis: i64) -> Option<f64> {
    let start = range.start_millis? as f64;
    let end = range.end_millis? as f64;

    if end <= start {
        return None;
    }

    Some(((now_millis as f64 - start) / (end - start)).clamp(0.0, 1.0))
}

fn highlight(activity: &Activity, now: DateTime<Utc>) -> Highlight {
    let name = activity.name.as_deref().unwrap_or("something");

    let headline = match activity.kind {
        ActivityType::Game => format!("Playing {}", name),
        ActivityType::Streaming => format!("Streaming {}", name),
        ActivityType::Watching => format!("Watching {}", name),
        ActivityType::Competing => format!("Competing in {}", name),
        ActivityType::Listening => format!("Listening to {}", name),
        ActivityType::Custom => name.to_owned(),
    };

    let progress = match activity.kind {
        ActivityType::Listening => activity
            .time_range
            .as_ref()
            .and_then(|range| progress_ratio(range, now.timestamp_millis())),
        _ => None,
    };

    Highlight {
        kind: activity.kind,
        headline,
        detail: activity.detail.clone(),
        state_text: activity.state_text.clone(),
        progress,
    }
}
