use std::time::Duration;

use reqwest::Client;

use crate::api::error::FetchError;
use crate::api::types::User;
use crate::config::ApiConfig;

/// Fetches user records from the configured API.
#[derive(Debug, Clone)]
pub struct UserClient {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl UserClient {
    pub fn new(config: &ApiConfig) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(config.timeout())
            .connect_timeout(config.connect_timeout())
            .build()
            .map_err(|e| FetchError::Client {
                message: e.to_string(),
            })?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            timeout: config.timeout(),
        })
    }

    pub fn user_url(&self, id: u32) -> String {
        format!("{}/users/{}", self.base_url, id)
    }

    pub async fn fetch_user(&self, id: u32) -> Result<User, FetchError> {
        let url = self.user_url(id);
        tracing::debug!(%url, "Fetching user");

        let response = self.client.get(&url).send().await.map_err(|e| {
            if e.is_timeout() {
                FetchError::Timeout {
                    url: url.clone(),
                    seconds: self.timeout.as_secs(),
                }
            } else {
                FetchError::Request {
                    url: url.clone(),
                    message: e.to_string(),
                }
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(%url, status = status.as_u16(), "User fetch rejected");
            return Err(FetchError::Status {
                status: status.as_u16(),
            });
        }

        response.json::<User>().await.map_err(|e| FetchError::Decode {
            message: e.to_string(),
        })
    }
}
