use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::offering::{GeoPoint, Offering};
use crate::models::user::UserSummary;
use crate::query::OfferingPage;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LocationPayload {
    #[validate(range(min = -90.0, max = 90.0))]
    pub lat: f64,
    #[validate(range(min = -180.0, max = 180.0))]
    pub lng: f64,
}

impl From<LocationPayload> for GeoPoint {
    fn from(value: LocationPayload) -> Self {
        Self {
            lat: value.lat,
            lng: value.lng,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateOfferingPayload {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    #[validate(length(min = 3))]
    pub label: String,
    pub description: Option<String>,
    #[validate(nested)]
    pub location: LocationPayload,
    #[validate(range(exclusive_min = 0.0))]
    pub payment_per_hour: f64,
    #[validate(range(exclusive_min = 0.0))]
    pub max_hours: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOfferingPayload {
    #[validate(length(min = 3))]
    pub label: Option<String>,
    pub description: Option<String>,
    #[validate(nested)]
    pub location: Option<LocationPayload>,
    #[validate(range(exclusive_min = 0.0))]
    pub payment_per_hour: Option<f64>,
    #[validate(range(exclusive_min = 0.0))]
    pub max_hours: Option<f64>,
}

/// Raw listing query string. Every field stays a string here so that
/// garbage input can never fail extraction; coercion into
/// [`crate::query::QueryParams`] happens once, at the boundary. Aliases
/// cover the parameter spellings that drifted across older clients.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OfferingListQuery {
    #[serde(alias = "q")]
    pub search: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    #[serde(rename = "minPay", alias = "minPayment")]
    pub min_pay: Option<String>,
    #[serde(rename = "maxPay", alias = "maxPayment")]
    pub max_pay: Option<String>,
    #[serde(rename = "maxHours")]
    pub max_hours: Option<String>,
    #[serde(rename = "hasApplications")]
    pub has_applications: Option<String>,
    pub lat: Option<String>,
    pub lng: Option<String>,
    #[serde(rename = "radiusKm")]
    pub radius_km: Option<String>,
    #[serde(rename = "sortBy")]
    pub sort_by: Option<String>,
    #[serde(rename = "sortOrder")]
    pub sort_order: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
    #[serde(rename = "featuredFirst")]
    pub featured_first: Option<String>,
    /// Bare-array compatibility mode, see `query::run_legacy`.
    pub legacy: Option<String>,
}

impl OfferingListQuery {
    pub fn wants_legacy(&self) -> bool {
        self.legacy.as_deref() == Some("true")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OfferingResponse {
    pub id: Uuid,
    #[serde(rename = "type")]
    pub kind: String,
    pub label: String,
    pub description: Option<String>,
    pub location: GeoPoint,
    pub payment_per_hour: f64,
    pub max_hours: f64,
    pub applications_count: i64,
    pub requestor_id: Uuid,
    pub featured: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestorSummary {
    pub id: Uuid,
    pub username: String,
    pub rating: f64,
    pub completed_jobs: i64,
}

/// Offering detail with the denormalized poster projection embedded.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OfferingDetailResponse {
    #[serde(flatten)]
    pub offering: OfferingResponse,
    pub requestor: Option<RequestorSummary>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OfferingListResponse {
    pub offerings: Vec<OfferingResponse>,
    pub total: i64,
    pub page: i64,
    pub limit: i64,
    pub total_pages: i64,
}

impl From<Offering> for OfferingResponse {
    fn from(value: Offering) -> Self {
        Self {
            id: value.id,
            kind: value.kind,
            label: value.label,
            description: value.description,
            location: value.location,
            payment_per_hour: value.payment_per_hour,
            max_hours: value.max_hours,
            applications_count: value.applications_count,
            requestor_id: value.requestor_id,
            featured: value.featured,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

impl From<UserSummary> for RequestorSummary {
    fn from(value: UserSummary) -> Self {
        Self {
            id: value.id,
            username: value.username,
            rating: value.rating,
            completed_jobs: value.completed_jobs,
        }
    }
}

impl From<OfferingPage> for OfferingListResponse {
    fn from(value: OfferingPage) -> Self {
        Self {
            offerings: value.items.into_iter().map(Into::into).collect(),
            total: value.total,
            page: value.page,
            limit: value.limit,
            total_pages: value.total_pages,
        }
    }
}
