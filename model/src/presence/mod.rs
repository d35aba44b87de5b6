//! The normalized shape served by the aggregation endpoint and consumed by
//! the card. One [`PresenceSnapshot`] is built per poll and never mutated.

mod snapshot;
pub use snapshot::*;

mod status;
pub use status::PresenceStatus;
