use std::sync::Arc;

use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use crate::config::get_config;
use crate::dto::auth_dto::{LoginPayload, RegisterPayload};
use crate::error::{Error, Result};
use crate::middleware::auth::issue_token;
use crate::models::user::User;
use crate::store::UserStore;
use crate::utils::crypto::{hash_password, verify_password};

const INITIAL_RATING: f64 = 5.0;

#[derive(Clone)]
pub struct AuthService {
    users: Arc<dyn UserStore>,
}

impl AuthService {
    pub fn new(users: Arc<dyn UserStore>) -> Self {
        Self { users }
    }

    pub async fn register(&self, payload: RegisterPayload) -> Result<(User, String)> {
        if self.users.exists(&payload.username, &payload.email).await? {
            return Err(Error::BadRequest("User already exists".to_string()));
        }

        let user = self
            .users
            .insert(User {
                id: Uuid::new_v4(),
                username: payload.username,
                email: payload.email,
                password_hash: hash_password(&payload.password)?,
                rating: INITIAL_RATING,
                completed_jobs: 0,
                created_at: Utc::now(),
            })
            .await?;
        info!(user_id = %user.id, "user registered");

        let token = self.token_for(&user)?;
        Ok((user, token))
    }

    pub async fn login(&self, payload: LoginPayload) -> Result<(User, String)> {
        let user = self
            .users
            .find_by_identifier(&payload.username)
            .await?
            .ok_or_else(|| Error::Unauthorized("Invalid credentials".to_string()))?;

        if !verify_password(&payload.password, &user.password_hash)? {
            return Err(Error::Unauthorized("Invalid credentials".to_string()));
        }

        let token = self.token_for(&user)?;
        Ok((user, token))
    }

    pub async fn profile(&self, user_id: Uuid) -> Result<User> {
        self.users
            .get(user_id)
            .await?
            .ok_or_else(|| Error::NotFound("User not found".to_string()))
    }

    fn token_for(&self, user: &User) -> Result<String> {
        let config = get_config();
        issue_token(user, &config.jwt_secret, config.token_ttl_hours)
    }
}
