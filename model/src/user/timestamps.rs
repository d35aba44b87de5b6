use serde::{Deserialize, Serialize};

/// Unix milliseconds
#[derive(Serialize, Deserialize, Debug, Clone, Copy)]
pub struct Timestamps {
    #[serde(default)]
    pub start: Option<u64>,
    #[serde(default)]
    pub end: Option<u64>,
}

impl Timestamps {
    pub fn new(start: Option<u64>, end: Option<u64>) -> Timestamps {
        Timestamps { start, end }
    }
}
