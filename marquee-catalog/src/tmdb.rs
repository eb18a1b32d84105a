use async_trait::async_trait;
use marquee_core::{MetadataProvider, MovieDetails};
use marquee_domain::{CastMember, MarqueeError};
use serde::Deserialize;

/// TMDB-backed metadata provider.
///
/// Two read-only endpoints are used: `/movie/{id}` and `/movie/{id}/credits`,
/// authenticated with a bearer token. Any transport or decode failure is a
/// `Provider` error; the caller decides whether that is fatal.
pub struct TmdbProvider {
    http: reqwest::Client,
    api_base: String,
    api_key: String,
}

#[derive(Debug, Deserialize)]
struct CreditsResponse {
    #[serde(default)]
    cast: Vec<CastMember>,
}

impl TmdbProvider {
    pub fn new(api_base: &str, api_key: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_base: api_base.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        }
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
    ) -> Result<T, MarqueeError> {
        let url = format!("{}{}", self.api_base, path);
        let response = self
            .http
            .get(&url)
            .bearer_auth(&self.api_key)
            .send()
            .await
            .map_err(|e| MarqueeError::Provider(format!("request to {path} failed: {e}")))?;

        if !response.status().is_success() {
            return Err(MarqueeError::Provider(format!(
                "{path} returned {}",
                response.status()
            )));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| MarqueeError::Provider(format!("decoding {path} failed: {e}")))
    }
}

#[async_trait]
impl MetadataProvider for TmdbProvider {
    async fn details(&self, external_id: i64) -> Result<MovieDetails, MarqueeError> {
        self.get_json(&format!("/movie/{external_id}")).await
    }

    async fn credits(&self, external_id: i64) -> Result<Vec<CastMember>, MarqueeError> {
        let credits: CreditsResponse = self
            .get_json(&format!("/movie/{external_id}/credits"))
            .await?;
        Ok(credits.cast)
    }
}
