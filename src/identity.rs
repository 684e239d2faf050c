use anyhow::{anyhow, Result};
use serde::Deserialize;
use uuid::Uuid;

#[derive(Debug, Clone, Deserialize)]
pub struct UserProfile {
    pub name: String,
    pub email: String,
    pub phone_number: String,
}

/// Read-only collaborator that owns user profiles. The ledger only needs it
/// to register the holder of a new virtual account.
#[async_trait::async_trait]
pub trait IdentityDirectory: Send + Sync {
    async fn get_by_id(&self, user_id: Uuid) -> Result<UserProfile>;
}

pub struct HttpIdentityDirectory {
    pub base_url: String,
    pub api_key: String,
    pub timeout_ms: u64,
    pub client: reqwest::Client,
}

#[async_trait::async_trait]
impl IdentityDirectory for HttpIdentityDirectory {
    async fn get_by_id(&self, user_id: Uuid) -> Result<UserProfile> {
        let resp = self
            .client
            .get(format!("{}/internal/users/{}", self.base_url, user_id))
            .header("X-Internal-Api-Key", &self.api_key)
            .timeout(std::time::Duration::from_millis(self.timeout_ms))
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(anyhow!(
                "identity directory returned HTTP {} for user {}",
                resp.status().as_u16(),
                user_id
            ));
        }

        Ok(resp.json::<UserProfile>().await?)
    }
}

/// Fixed profile for local development and tests.
pub struct MockIdentityDirectory;

#[async_trait::async_trait]
impl IdentityDirectory for MockIdentityDirectory {
    async fn get_by_id(&self, user_id: Uuid) -> Result<UserProfile> {
        Ok(UserProfile {
            name: "Mock User".to_string(),
            email: format!("{}@example.test", user_id.simple()),
            phone_number: "+620000000000".to_string(),
        })
    }
}
