mod normalize;
pub use normalize::{compose, convert_activities, custom_status_text, project_roles};

use crate::discord::PresenceSource;
use crate::{Error, Result};

use model::presence::PresenceSnapshot;
use tracing::{debug, warn};

const VOICE_STATE_LOOKUP: &str = "voice state";

pub struct Aggregator<T: PresenceSource> {
    source: T,
}

impl<T: PresenceSource> Aggregator<T> {
    pub fn new(source: T) -> Aggregator<T> {
        Aggregator { source }
    }

    /// Fans out to all four upstream lookups and waits for every one of them
    /// to settle. A failed lookup only blanks its own part of the snapshot, so
    /// this never fails as a whole.
    pub async fn snapshot(&self) -> PresenceSnapshot {
        let (member, voice_state, roles, guild) = tokio::join!(
            self.source.member(),
            self.source.voice_state(),
            self.source.roles(),
            self.source.guild(),
        );

        let member = settle("member", member);
        let voice_state = settle(VOICE_STATE_LOOKUP, voice_state);
        let roles = settle("roles", roles);
        let guild = settle("guild", guild);

        let snapshot = compose(member, voice_state, roles, guild);
        debug!(
            has_user = snapshot.user.is_some(),
            has_presence = snapshot.presence.is_some(),
            roles = snapshot.roles.len(),
            in_voice = snapshot.voice.is_some(),
            "Composed snapshot"
        );

        snapshot
    }
}

fn settle<T>(lookup: &'static str, res: Result<T>) -> Option<T> {
    match res {
        Ok(v) => Some(v),
        Err(e) if is_not_in_voice(lookup, &e) => {
            debug!(lookup, "Not in a voice channel, omitting from snapshot");
            None
        }
        Err(e) => {
            warn!(lookup, error = %e, "Upstream lookup failed, omitting from snapshot");
            None
        }
    }
}

/// Discord answers 404 on the voice state lookup when the user isn't in a
/// voice channel. A 404 anywhere else is a real failure.
fn is_not_in_voice(lookup: &str, error: &Error) -> bool {
    match error {
        Error::ResponseError(status) => {
            lookup == VOICE_STATE_LOOKUP && *status == reqwest::StatusCode::NOT_FOUND
        }
        _ => false,
    }
}
