use uuid::Uuid;

/// The association between a generated identifier and one uploaded contract's
/// text, enabling follow-up questions without a re-upload.
///
/// Immutable after creation: the identifier maps to exactly this document
/// text for the session's lifetime.
#[derive(Debug, Clone)]
pub struct Session {
    id: String,
    document_text: String,
    created_at: i64,
}

impl Session {
    /// Create a session with a freshly generated identifier.
    ///
    /// The identifier combines the creation timestamp (millis) with a random
    /// UUIDv4 component so concurrent creations cannot collide.
    pub fn new(document_text: String) -> Self {
        let now = current_timestamp_millis();
        Self {
            id: format!("{}-{}", now, Uuid::new_v4()),
            document_text,
            created_at: now,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn document_text(&self) -> &str {
        &self.document_text
    }

    pub fn created_at(&self) -> i64 {
        self.created_at
    }

    pub fn age_millis(&self) -> i64 {
        current_timestamp_millis().saturating_sub(self.created_at)
    }
}

fn current_timestamp_millis() -> i64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or(0)
}
