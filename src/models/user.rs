use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub rating: f64,
    pub completed_jobs: i64,
    pub created_at: DateTime<Utc>,
}

/// Denormalized projection embedded in offering details and applicant
/// listings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserSummary {
    pub id: Uuid,
    pub username: String,
    pub rating: f64,
    pub completed_jobs: i64,
}

impl From<&User> for UserSummary {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            rating: user.rating,
            completed_jobs: user.completed_jobs,
        }
    }
}
