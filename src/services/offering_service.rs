use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::dto::offering_dto::{CreateOfferingPayload, OfferingListQuery, UpdateOfferingPayload};
use crate::error::{Error, Result};
use crate::models::offering::Offering;
use crate::models::user::UserSummary;
use crate::query::{self, OfferingPage, QueryParams};
use crate::store::{OfferingStore, UserStore};

const DEFAULT_KIND: &str = "job";

#[derive(Clone)]
pub struct OfferingService {
    offerings: Arc<dyn OfferingStore>,
    users: Arc<dyn UserStore>,
}

impl OfferingService {
    pub fn new(offerings: Arc<dyn OfferingStore>, users: Arc<dyn UserStore>) -> Self {
        Self { offerings, users }
    }

    pub async fn create(
        &self,
        payload: CreateOfferingPayload,
        requestor_id: Uuid,
    ) -> Result<Offering> {
        let now = Utc::now();
        let offering = Offering {
            id: Uuid::new_v4(),
            kind: payload
                .kind
                .filter(|k| !k.is_empty())
                .unwrap_or_else(|| DEFAULT_KIND.to_string()),
            label: payload.label,
            description: payload.description,
            location: payload.location.into(),
            payment_per_hour: payload.payment_per_hour,
            max_hours: payload.max_hours,
            applications_count: 0,
            requestor_id,
            featured: false,
            created_at: now,
            updated_at: now,
        };
        self.offerings.insert(offering).await
    }

    pub async fn list(&self, raw: &OfferingListQuery) -> Result<OfferingPage> {
        let params = QueryParams::from_query(raw);
        let offerings = self.offerings.list().await?;
        Ok(query::run(offerings, &params))
    }

    pub async fn list_legacy(&self, raw: &OfferingListQuery) -> Result<Vec<Offering>> {
        let params = QueryParams::from_query(raw);
        let offerings = self.offerings.list().await?;
        Ok(query::run_legacy(offerings, &params))
    }

    pub async fn get_with_requestor(&self, id: Uuid) -> Result<(Offering, Option<UserSummary>)> {
        let offering = self.get_by_id(id).await?;
        let requestor = self.users.get(offering.requestor_id).await?;
        Ok((offering, requestor.as_ref().map(UserSummary::from)))
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<Offering> {
        self.offerings
            .get(id)
            .await?
            .ok_or_else(|| Error::NotFound("Offering not found".to_string()))
    }

    pub async fn update(
        &self,
        id: Uuid,
        payload: UpdateOfferingPayload,
        caller: Uuid,
    ) -> Result<Offering> {
        let mut offering = self.get_by_id(id).await?;
        if offering.requestor_id != caller {
            return Err(Error::Forbidden(
                "Not authorized to update this offering".to_string(),
            ));
        }

        if let Some(label) = payload.label {
            offering.label = label;
        }
        if let Some(description) = payload.description {
            offering.description = Some(description);
        }
        if let Some(location) = payload.location {
            offering.location = location.into();
        }
        if let Some(payment_per_hour) = payload.payment_per_hour {
            offering.payment_per_hour = payment_per_hour;
        }
        if let Some(max_hours) = payload.max_hours {
            offering.max_hours = max_hours;
        }
        offering.updated_at = Utc::now();

        self.offerings
            .update(offering)
            .await?
            .ok_or_else(|| Error::NotFound("Offering not found".to_string()))
    }

    pub async fn delete(&self, id: Uuid, caller: Uuid) -> Result<()> {
        let offering = self.get_by_id(id).await?;
        if offering.requestor_id != caller {
            return Err(Error::Forbidden(
                "Not authorized to delete this offering".to_string(),
            ));
        }
        self.offerings.delete(id).await?;
        Ok(())
    }
}
