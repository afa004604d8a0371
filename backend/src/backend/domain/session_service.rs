//! Password gate and session store.
//!
//! Login with the shared password issues a random token. Handlers never check
//! the password themselves; they receive an authorized session value resolved
//! from the token. Sessions expire a fixed time after login and are pruned
//! on the next login.

use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use super::errors::{DomainError, DomainResult};

pub const SESSION_LIFETIME_HOURS: i64 = 12;

#[derive(Clone)]
pub struct SessionService {
    password: Arc<RwLock<String>>,
    /// Token to login time
    sessions: Arc<RwLock<HashMap<String, DateTime<Utc>>>>,
    lifetime: Duration,
}

impl SessionService {
    pub fn new(password: &str) -> Self {
        Self::with_lifetime(password, Duration::hours(SESSION_LIFETIME_HOURS))
    }

    pub fn with_lifetime(password: &str, lifetime: Duration) -> Self {
        Self {
            password: Arc::new(RwLock::new(password.to_string())),
            sessions: Arc::new(RwLock::new(HashMap::new())),
            lifetime,
        }
    }

    fn is_live(&self, opened_at: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        now - opened_at < self.lifetime
    }

    /// Issue a session token for the correct password
    pub async fn login(&self, password: &str) -> DomainResult<String> {
        if *self.password.read().await != password {
            warn!("Rejected login with wrong password");
            return Err(DomainError::Unauthorized);
        }

        let now = Utc::now();
        let token = uuid::Uuid::new_v4().to_string();
        let mut sessions = self.sessions.write().await;

        // Drop expired sessions before adding the new one
        let before = sessions.len();
        sessions.retain(|_, opened_at| self.is_live(*opened_at, now));
        if sessions.len() != before {
            debug!("Pruned {} expired sessions", before - sessions.len());
        }

        sessions.insert(token.clone(), now);
        info!("Opened session");
        Ok(token)
    }

    pub async fn logout(&self, token: &str) {
        if self.sessions.write().await.remove(token).is_some() {
            info!("Closed session");
        }
    }

    pub async fn is_valid(&self, token: &str) -> bool {
        let now = Utc::now();
        self.sessions
            .read()
            .await
            .get(token)
            .is_some_and(|opened_at| self.is_live(*opened_at, now))
    }

    pub async fn change_password(&self, current_password: &str, new_password: &str) -> DomainResult<()> {
        if new_password.trim().is_empty() {
            return Err(DomainError::Validation("new password must not be blank".to_string()));
        }

        let mut password = self.password.write().await;
        if *password != current_password {
            warn!("Rejected password change with wrong current password");
            return Err(DomainError::Unauthorized);
        }
        *password = new_password.to_string();
        info!("Password changed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_login_logout_cycle() {
        let sessions = SessionService::new("17120");

        assert!(matches!(sessions.login("wrong").await, Err(DomainError::Unauthorized)));

        let token = sessions.login("17120").await.unwrap();
        assert!(sessions.is_valid(&token).await);

        sessions.logout(&token).await;
        assert!(!sessions.is_valid(&token).await);
    }

    #[tokio::test]
    async fn test_expired_sessions_are_rejected_and_pruned() {
        let sessions = SessionService::with_lifetime("17120", Duration::zero());

        let stale = sessions.login("17120").await.unwrap();
        assert!(!sessions.is_valid(&stale).await);

        sessions.login("17120").await.unwrap();
        let stored = sessions.sessions.read().await;
        assert_eq!(stored.len(), 1);
        assert!(!stored.contains_key(&stale));
    }

    #[tokio::test]
    async fn test_session_outlives_a_short_pause() {
        let sessions = SessionService::new("17120");
        let token = sessions.login("17120").await.unwrap();

        // Pretend the session was opened just under the lifetime ago
        let opened_at = Utc::now() - Duration::hours(SESSION_LIFETIME_HOURS) + Duration::minutes(1);
        sessions.sessions.write().await.insert(token.clone(), opened_at);
        assert!(sessions.is_valid(&token).await);

        let expired_at = Utc::now() - Duration::hours(SESSION_LIFETIME_HOURS) - Duration::minutes(1);
        sessions.sessions.write().await.insert(token.clone(), expired_at);
        assert!(!sessions.is_valid(&token).await);
    }

    #[tokio::test]
    async fn test_change_password() {
        let sessions = SessionService::new("17120");

        assert!(matches!(
            sessions.change_password("nope", "secret").await,
            Err(DomainError::Unauthorized)
        ));
        assert!(matches!(
            sessions.change_password("17120", "  ").await,
            Err(DomainError::Validation(_))
        ));

        sessions.change_password("17120", "secret").await.unwrap();
        assert!(sessions.login("17120").await.is_err());
        assert!(sessions.login("secret").await.is_ok());
    }
}
