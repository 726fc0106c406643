use serde::{Deserialize, Serialize};

/// Persisted link record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Link {
    /// Store-assigned identity; only surfaced in the creation response.
    pub id: i64,
    /// Original submitted URL, stored verbatim.
    pub url: String,
    /// Six lowercase hex characters derived from `url`.
    pub hash: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    #[serde(default)]
    pub views: u64,
}

/// A record about to be persisted; the store assigns the identity and the
/// view count starts at zero.
#[derive(Debug, Clone)]
pub struct NewLink {
    pub url: String,
    pub hash: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}
