use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Geographic point in plain decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

/// A posted short-term task with a pay rate, an hour cap and a location.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Offering {
    pub id: Uuid,
    /// Category tag, `"job"` unless the poster says otherwise. Serialized
    /// as `type` on the wire.
    pub kind: String,
    pub label: String,
    pub description: Option<String>,
    pub location: GeoPoint,
    pub payment_per_hour: f64,
    pub max_hours: f64,
    /// Incremented exactly once per successful, non-duplicate application.
    pub applications_count: i64,
    /// Owner of the offering; authorizes updates and deletes.
    pub requestor_id: Uuid,
    /// Administrative flag; affects ordering only when a listing opts in.
    pub featured: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
