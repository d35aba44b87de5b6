use serde::de::Error;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::fmt::Formatter;

/// Legacy four digit user tag. Accounts migrated to unique usernames report "0".
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Discriminator(pub u16);

impl Discriminator {
    pub fn is_legacy(&self) -> bool {
        self.0 != 0
    }

    /// Index into the CDN's set of default avatars
    pub fn default_avatar_index(&self) -> u16 {
        self.0 % 5
    }
}

impl Serialize for Discriminator {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format!("{:0>4}", self.0))
    }
}

impl<'de> Deserialize<'de> for Discriminator {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(Discriminator(
            String::deserialize(deserializer)?
                .parse()
                .map_err(Error::custom)?,
        ))
    }
}

impl fmt::Display for Discriminator {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{:0>4}", self.0)
    }
}
