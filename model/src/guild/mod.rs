mod guild;
pub use guild::PartialGuild;

mod role;
pub use role::Role;

mod voice_state;
pub use voice_state::VoiceState;

mod member;
pub use member::Member;
