use serde::{Deserialize, Serialize};

/// One contact-form submission, as served by the restricted message log.
///
/// Read-only on this side: the log is fetched per sync and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub subject: String,
    #[serde(rename = "message")]
    pub body: String,
    #[serde(default)]
    pub timestamp: String,
}
