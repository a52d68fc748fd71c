//! In-memory store implementation.
//!
//! Backs the service in development and in tests. Each collection is a
//! `Vec` behind its own `RwLock`; appends preserve insertion order so
//! unsorted listings come back in creation order.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{ApplicationStore, OfferingStore, UserStore};
use crate::error::Result;
use crate::models::application::Application;
use crate::models::offering::Offering;
use crate::models::user::User;

#[derive(Clone, Default)]
pub struct MemoryStore {
    offerings: Arc<RwLock<Vec<Offering>>>,
    applications: Arc<RwLock<Vec<Application>>>,
    users: Arc<RwLock<Vec<User>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl OfferingStore for MemoryStore {
    async fn list(&self) -> Result<Vec<Offering>> {
        Ok(self.offerings.read().await.clone())
    }

    async fn get(&self, id: Uuid) -> Result<Option<Offering>> {
        let offerings = self.offerings.read().await;
        Ok(offerings.iter().find(|o| o.id == id).cloned())
    }

    async fn insert(&self, offering: Offering) -> Result<Offering> {
        let mut offerings = self.offerings.write().await;
        offerings.push(offering.clone());
        Ok(offering)
    }

    async fn update(&self, offering: Offering) -> Result<Option<Offering>> {
        let mut offerings = self.offerings.write().await;
        match offerings.iter_mut().find(|o| o.id == offering.id) {
            Some(slot) => {
                *slot = offering.clone();
                Ok(Some(offering))
            }
            None => Ok(None),
        }
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        let mut offerings = self.offerings.write().await;
        let before = offerings.len();
        offerings.retain(|o| o.id != id);
        Ok(offerings.len() < before)
    }

    async fn increment_applications(&self, id: Uuid) -> Result<Option<i64>> {
        let mut offerings = self.offerings.write().await;
        match offerings.iter_mut().find(|o| o.id == id) {
            Some(offering) => {
                offering.applications_count += 1;
                Ok(Some(offering.applications_count))
            }
            None => Ok(None),
        }
    }
}

#[async_trait]
impl ApplicationStore for MemoryStore {
    async fn insert(&self, application: Application) -> Result<Application> {
        let mut applications = self.applications.write().await;
        applications.push(application.clone());
        Ok(application)
    }

    async fn find(&self, offering_id: Uuid, applicant_id: Uuid) -> Result<Option<Application>> {
        let applications = self.applications.read().await;
        Ok(applications
            .iter()
            .find(|a| a.offering_id == offering_id && a.applicant_id == applicant_id)
            .cloned())
    }

    async fn list_for_offering(&self, offering_id: Uuid) -> Result<Vec<Application>> {
        let applications = self.applications.read().await;
        Ok(applications
            .iter()
            .filter(|a| a.offering_id == offering_id)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn get(&self, id: Uuid) -> Result<Option<User>> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_identifier(&self, identifier: &str) -> Result<Option<User>> {
        let users = self.users.read().await;
        Ok(users
            .iter()
            .find(|u| u.username == identifier || u.email == identifier)
            .cloned())
    }

    async fn exists(&self, username: &str, email: &str) -> Result<bool> {
        let users = self.users.read().await;
        Ok(users
            .iter()
            .any(|u| u.username == username || u.email == email))
    }

    async fn insert(&self, user: User) -> Result<User> {
        let mut users = self.users.write().await;
        users.push(user.clone());
        Ok(user)
    }
}
