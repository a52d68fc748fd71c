use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::application::{Application, ApplicationStatus};
use crate::models::user::UserSummary;

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct ApplyPayload {
    #[validate(length(max = 2000))]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationResponse {
    pub id: Uuid,
    pub offering_id: Uuid,
    pub applicant_id: Uuid,
    pub message: Option<String>,
    pub status: ApplicationStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplySuccessResponse {
    pub message: String,
    pub application: ApplicationResponse,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppliedStatusResponse {
    pub has_applied: bool,
    pub application: Option<ApplicationResponse>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicantDetails {
    pub username: String,
    pub rating: f64,
    pub completed_jobs: i64,
}

/// Application joined with the applicant's profile projection, as the
/// offering owner sees it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicantResponse {
    #[serde(flatten)]
    pub application: ApplicationResponse,
    pub applicant_details: Option<ApplicantDetails>,
}

impl From<Application> for ApplicationResponse {
    fn from(value: Application) -> Self {
        Self {
            id: value.id,
            offering_id: value.offering_id,
            applicant_id: value.applicant_id,
            message: value.message,
            status: value.status,
            created_at: value.created_at,
        }
    }
}

impl From<UserSummary> for ApplicantDetails {
    fn from(value: UserSummary) -> Self {
        Self {
            username: value.username,
            rating: value.rating,
            completed_jobs: value.completed_jobs,
        }
    }
}
