//! IBM Cloud IAM token exchange.
//!
//! watsonx.ai authenticates with a short-lived bearer token, not the raw API
//! key. This wrapper exchanges the key via the IAM apikey grant and caches the
//! resulting token, refreshing it shortly before expiry.

use std::time::{Duration, Instant};

use reqwest::Client;
use serde::Deserialize;
use tokio::sync::RwLock;
use tracing::debug;

use crate::watsonx::InferenceError;

const IAM_TOKEN_URL: &str = "https://iam.cloud.ibm.com/identity/token";
const APIKEY_GRANT_TYPE: &str = "urn:ibm:params:oauth:grant-type:apikey";

/// Refresh this long before the token actually expires.
const EXPIRY_MARGIN: Duration = Duration::from_secs(60);

#[derive(Debug, Deserialize)]
struct IamTokenResponse {
    access_token: String,
    expires_in: u64,
}

struct CachedToken {
    access_token: String,
    expires_at: Instant,
}

impl CachedToken {
    fn is_fresh(&self, now: Instant) -> bool {
        self.expires_at.checked_duration_since(now).unwrap_or_default() > EXPIRY_MARGIN
    }
}

/// Exchanges the configured API key for IAM bearer tokens and caches them
/// across calls. Safe to share behind the client.
pub struct IamTokenSource {
    http: Client,
    token_url: String,
    api_key: String,
    cached: RwLock<Option<CachedToken>>,
}

impl IamTokenSource {
    pub fn new(api_key: String) -> Self {
        Self {
            http: Client::new(),
            token_url: IAM_TOKEN_URL.to_string(),
            api_key,
            cached: RwLock::new(None),
        }
    }

    /// Returns a valid bearer token, exchanging the API key if the cached
    /// token is missing or close to expiry.
    pub async fn bearer_token(&self) -> Result<String, InferenceError> {
        let now = Instant::now();

        if let Some(token) = self.cached.read().await.as_ref() {
            if token.is_fresh(now) {
                return Ok(token.access_token.clone());
            }
        }

        let mut guard = self.cached.write().await;
        // Another caller may have refreshed while we waited for the lock.
        if let Some(token) = guard.as_ref() {
            if token.is_fresh(now) {
                return Ok(token.access_token.clone());
            }
        }

        let response = self
            .http
            .post(&self.token_url)
            .form(&[
                ("grant_type", APIKEY_GRANT_TYPE),
                ("apikey", self.api_key.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(InferenceError::Auth(format!(
                "IAM token exchange returned {status}: {body}"
            )));
        }

        let token: IamTokenResponse = response.json().await?;
        debug!("IAM token refreshed, expires in {}s", token.expires_in);

        let expires_at = now + Duration::from_secs(token.expires_in);
        let access_token = token.access_token.clone();
        *guard = Some(CachedToken {
            access_token: token.access_token,
            expires_at,
        });

        Ok(access_token)
    }
}
