//! Link entity representing a shortened URL mapping.

/// A shortened URL link.
///
/// Links are immutable once stored. `id` is assigned by the store and carries
/// no meaning beyond identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub id: i64,
    pub short_id: String,
    pub target_url: String,
}

impl Link {
    /// Creates a new Link instance.
    pub fn new(id: i64, short_id: impl Into<String>, target_url: impl Into<String>) -> Self {
        Self {
            id,
            short_id: short_id.into(),
            target_url: target_url.into(),
        }
    }
}

/// Input data for creating a new link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLink {
    pub short_id: String,
    pub target_url: String,
}

impl NewLink {
    pub fn new(short_id: impl Into<String>, target_url: impl Into<String>) -> Self {
        Self {
            short_id: short_id.into(),
            target_url: target_url.into(),
        }
    }
}

/// Column whose uniqueness constraint rejected an insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UniqueField {
    ShortId,
    TargetUrl,
}

/// Result of [`crate::domain::repositories::LinkRepository::insert_or_conflict`].
///
/// A unique constraint violation is an expected outcome of allocation under
/// concurrency, so it is reported as a value rather than an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InsertOutcome {
    Inserted(Link),
    Conflict(UniqueField),
}

impl InsertOutcome {
    /// Returns the inserted link, if any.
    pub fn into_link(self) -> Option<Link> {
        match self {
            InsertOutcome::Inserted(link) => Some(link),
            InsertOutcome::Conflict(_) => None,
        }
    }
}
