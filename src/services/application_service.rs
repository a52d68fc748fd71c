use std::sync::Arc;

use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::models::application::{Application, ApplicationStatus};
use crate::models::user::UserSummary;
use crate::store::{ApplicationStore, OfferingStore, UserStore};

#[derive(Clone)]
pub struct ApplicationService {
    applications: Arc<dyn ApplicationStore>,
    offerings: Arc<dyn OfferingStore>,
    users: Arc<dyn UserStore>,
}

impl ApplicationService {
    pub fn new(
        applications: Arc<dyn ApplicationStore>,
        offerings: Arc<dyn OfferingStore>,
        users: Arc<dyn UserStore>,
    ) -> Self {
        Self {
            applications,
            offerings,
            users,
        }
    }

    /// Create a pending application and bump the offering's counter.
    /// A second application by the same user is rejected, never
    /// deduplicated silently.
    pub async fn apply(
        &self,
        offering_id: Uuid,
        applicant_id: Uuid,
        message: Option<String>,
    ) -> Result<Application> {
        let offering = self
            .offerings
            .get(offering_id)
            .await?
            .ok_or_else(|| Error::NotFound("Offering not found".to_string()))?;

        let existing = self.applications.find(offering_id, applicant_id).await?;
        if existing.is_some() {
            return Err(Error::BadRequest(
                "Already applied to this offering".to_string(),
            ));
        }

        let application = self
            .applications
            .insert(Application {
                id: Uuid::new_v4(),
                offering_id,
                applicant_id,
                message: message.filter(|m| !m.is_empty()),
                status: ApplicationStatus::Pending,
                created_at: Utc::now(),
            })
            .await?;

        self.offerings.increment_applications(offering.id).await?;
        info!(offering_id = %offering_id, applicant_id = %applicant_id, "application created");

        Ok(application)
    }

    pub async fn application_for(
        &self,
        offering_id: Uuid,
        applicant_id: Uuid,
    ) -> Result<Option<Application>> {
        self.applications.find(offering_id, applicant_id).await
    }

    /// Applications for an offering with applicant projections, restricted
    /// to the offering's owner.
    pub async fn list_applicants(
        &self,
        offering_id: Uuid,
        caller: Uuid,
    ) -> Result<Vec<(Application, Option<UserSummary>)>> {
        let offering = self
            .offerings
            .get(offering_id)
            .await?
            .ok_or_else(|| Error::NotFound("Offering not found".to_string()))?;
        if offering.requestor_id != caller {
            return Err(Error::Forbidden(
                "Not authorized to view applicants for this offering".to_string(),
            ));
        }

        let applications = self.applications.list_for_offering(offering_id).await?;
        let mut applicants = Vec::with_capacity(applications.len());
        for application in applications {
            let user = self.users.get(application.applicant_id).await?;
            applicants.push((application, user.as_ref().map(UserSummary::from)));
        }
        Ok(applicants)
    }
}
