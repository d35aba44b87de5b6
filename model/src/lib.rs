mod snowflake;
pub use snowflake::Snowflake;

mod discriminator;
pub use discriminator::Discriminator;

mod image_hash;
pub use image_hash::ImageHash;

pub mod guild;
pub mod presence;
pub mod user;

mod util;
