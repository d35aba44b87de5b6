mod activity;
pub use activity::Activity;

mod activity_type;
pub use activity_type::ActivityType;

mod timestamps;
pub use timestamps::Timestamps;

mod status_type;
pub use status_type::StatusType;

mod presence;
pub use presence::Presence;

mod user;
pub use user::User;
