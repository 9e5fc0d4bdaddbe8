use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity of the uploading user, assigned by the fronting deployment.
/// Record ownership and dedup scope are both keyed on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OwnerId(pub i64);

impl fmt::Display for OwnerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
