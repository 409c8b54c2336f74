//! Profile enrichment after a successful login
//!
//! Enrichment is a single follow-up request made with the freshly issued access token.
//! It never fails: any problem degrades to an all-empty [`EnrichedProfile`].

use crate::models::EnrichedProfile;
use crate::settings::EnrichmentSettings;
use crate::utils::LoggingHelper;
use async_trait::async_trait;
use serde::Deserialize;
use url::Url;

/// Fixed field selection for the profile request
pub const PROFILE_FIELDS: &str = "id,name,email,picture.type(large)";

/// Secondary profile fetch chained after a login
#[async_trait]
pub trait ProfileEnrichment: Send + Sync {
    /// Fetch display fields for the holder of `provider_token`
    ///
    /// Returns the all-`None` profile instead of failing.
    async fn fetch(&self, provider_token: &str) -> EnrichedProfile;
}

#[derive(Debug, Deserialize)]
struct GraphMeResponse {
    #[allow(dead_code)]
    id: Option<String>,
    name: Option<String>,
    email: Option<String>,
    picture: Option<GraphPicture>,
}

#[derive(Debug, Deserialize)]
struct GraphPicture {
    data: Option<GraphPictureData>,
}

#[derive(Debug, Deserialize)]
struct GraphPictureData {
    url: Option<String>,
}

impl From<GraphMeResponse> for EnrichedProfile {
    fn from(response: GraphMeResponse) -> Self {
        Self {
            email: response.email,
            display_name: response.name,
            photo_url: response
                .picture
                .and_then(|picture| picture.data)
                .and_then(|data| data.url),
        }
    }
}

/// Graph API `/me` client
#[derive(Debug, Clone)]
pub struct GraphProfileClient {
    base_url: String,
    http_client: reqwest::Client,
}

impl GraphProfileClient {
    #[must_use]
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
            http_client: reqwest::Client::new(),
        }
    }

    /// Use a preconfigured HTTP client
    #[must_use]
    pub fn with_http_client(base_url: &str, http_client: reqwest::Client) -> Self {
        Self {
            base_url: base_url.to_string(),
            http_client,
        }
    }

    #[must_use]
    pub fn from_settings(settings: &EnrichmentSettings) -> Self {
        Self::new(&settings.graph_base_url)
    }

    /// Build the `/me` request URL
    ///
    /// # Errors
    ///
    /// Returns an error if the configured base URL cannot be parsed or cannot carry a path
    pub fn profile_url(&self, provider_token: &str) -> Result<Url, String> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| format!("Invalid Graph API base URL {}: {e}", self.base_url))?;
        url.path_segments_mut()
            .map_err(|()| format!("Graph API base URL cannot be a base: {}", self.base_url))?
            .pop_if_empty()
            .push("me");
        url.query_pairs_mut()
            .append_pair("fields", PROFILE_FIELDS)
            .append_pair("access_token", provider_token);
        Ok(url)
    }

    async fn try_fetch(&self, provider_token: &str) -> Result<EnrichedProfile, String> {
        // The URL carries the access token; errors are stripped of it before logging
        let url = self.profile_url(provider_token)?;

        let response = self
            .http_client
            .get(url)
            .send()
            .await
            .map_err(|e| format!("Profile request failed: {}", e.without_url()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(format!("Profile request returned status {status}"));
        }

        let body: GraphMeResponse = response
            .json()
            .await
            .map_err(|e| format!("Failed to parse profile response: {}", e.without_url()))?;

        Ok(body.into())
    }
}

#[async_trait]
impl ProfileEnrichment for GraphProfileClient {
    async fn fetch(&self, provider_token: &str) -> EnrichedProfile {
        match self.try_fetch(provider_token).await {
            Ok(profile) => profile,
            Err(reason) => {
                LoggingHelper::log_enrichment_degraded(&reason);
                EnrichedProfile::default()
            }
        }
    }
}
