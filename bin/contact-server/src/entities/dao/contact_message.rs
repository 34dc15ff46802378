use chrono::{DateTime, SubsecRound, Utc};

/// A row in the `contact_message` table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactMessage {
    pub id: i64,
    pub full_name: String,
    pub email: String,
    pub message: String,
    /// Always `true` for persisted rows (enforced by a check constraint).
    pub consent: bool,
    pub created_at: DateTime<Utc>,
}

/// A contact message that has not been written yet.
///
/// `created_at` is fixed when the value is constructed, truncated to the
/// microsecond precision the store keeps. The store assigns `id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewContactMessage {
    pub full_name: String,
    pub email: String,
    pub message: String,
    pub consent: bool,
    pub created_at: DateTime<Utc>,
}

impl NewContactMessage {
    pub fn new(
        full_name: impl Into<String>,
        email: impl Into<String>,
        message: impl Into<String>,
        consent: bool,
    ) -> Self {
        Self {
            full_name: full_name.into(),
            email: email.into(),
            message: message.into(),
            consent,
            created_at: Utc::now().trunc_subsecs(6),
        }
    }

    pub(crate) fn into_persisted(self, id: i64) -> ContactMessage {
        ContactMessage {
            id,
            full_name: self.full_name,
            email: self.email,
            message: self.message,
            consent: self.consent,
            created_at: self.created_at,
        }
    }
}
