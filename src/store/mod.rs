//! Storage abstraction layer.
//!
//! All record reads and writes go through these traits so the query engine
//! and the services stay storage-agnostic: the shipped [`MemoryStore`] and
//! any future database-backed store are interchangeable behind trait
//! objects. List order is the store's insertion order, which the query
//! engine treats as the default "storage order" when no sort is requested.

mod memory;

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::Result;
use crate::models::application::Application;
use crate::models::offering::Offering;
use crate::models::user::User;

pub use memory::MemoryStore;

#[async_trait]
pub trait OfferingStore: Send + Sync {
    /// Point-in-time snapshot of the whole collection, insertion order.
    async fn list(&self) -> Result<Vec<Offering>>;
    async fn get(&self, id: Uuid) -> Result<Option<Offering>>;
    async fn insert(&self, offering: Offering) -> Result<Offering>;
    /// Replace the stored record with the given one; `Ok(None)` when the id
    /// is unknown.
    async fn update(&self, offering: Offering) -> Result<Option<Offering>>;
    async fn delete(&self, id: Uuid) -> Result<bool>;
    /// Bump `applications_count` by one, returning the new value.
    async fn increment_applications(&self, id: Uuid) -> Result<Option<i64>>;
}

#[async_trait]
pub trait ApplicationStore: Send + Sync {
    async fn insert(&self, application: Application) -> Result<Application>;
    async fn find(&self, offering_id: Uuid, applicant_id: Uuid) -> Result<Option<Application>>;
    async fn list_for_offering(&self, offering_id: Uuid) -> Result<Vec<Application>>;
}

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn get(&self, id: Uuid) -> Result<Option<User>>;
    /// Login lookup: matches on username or email.
    async fn find_by_identifier(&self, identifier: &str) -> Result<Option<User>>;
    async fn exists(&self, username: &str, email: &str) -> Result<bool>;
    async fn insert(&self, user: User) -> Result<User>;
}
