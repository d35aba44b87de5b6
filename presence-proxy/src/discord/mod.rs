mod client;
pub use client::DiscordClient;

use crate::Result;
use async_trait::async_trait;
use model::guild::{Member, PartialGuild, Role, VoiceState};

/// The four read-only upstream lookups a snapshot is built from. Each one
/// fails independently of the others.
#[async_trait]
pub trait PresenceSource: Send + Sync {
    async fn member(&self) -> Result<Member>;

    async fn voice_state(&self) -> Result<VoiceState>;

    async fn roles(&self) -> Result<Vec<Role>>;

    async fn guild(&self) -> Result<PartialGuild>;
}
