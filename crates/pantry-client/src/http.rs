use std::time::Duration;

use reqwest::{StatusCode, Url};
use serde::de::DeserializeOwned;

use pantry_core::{RecipeData, RecipeSource, RecipeSummary, SourceError};

use crate::protocol::{RecipeResponse, SearchResponse};

/// RecipeSource backed by a forkify-style HTTP API.
pub struct HttpRecipeSource {
    client: reqwest::Client,
    base_url: String,
}

impl HttpRecipeSource {
    /// Create a source for `base_url` whose requests give up after `timeout`.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, SourceError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SourceError::Network(e.to_string()))?;
        Ok(Self::with_client(client, base_url))
    }

    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str, params: &[(&str, &str)]) -> Result<Url, SourceError> {
        Url::parse_with_params(&format!("{}/{}", self.base_url, path), params)
            .map_err(|e| SourceError::Network(format!("Invalid URL: {}", e)))
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, SourceError> {
        tracing::debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| SourceError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Status(status.as_u16()));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| SourceError::Network(e.to_string()))?;

        serde_json::from_slice(&body).map_err(|e| SourceError::Decode(e.to_string()))
    }
}

impl RecipeSource for HttpRecipeSource {
    async fn search(&self, query: &str) -> Result<Vec<RecipeSummary>, SourceError> {
        let url = self.url("search", &[("q", query)])?;
        let response: SearchResponse = self.get_json(url).await?;
        Ok(response.recipes.into_iter().map(Into::into).collect())
    }

    async fn get_recipe(&self, id: &str) -> Result<RecipeData, SourceError> {
        let url = self.url("get", &[("rId", id)])?;
        let response: RecipeResponse = match self.get_json(url).await {
            Err(SourceError::Status(code)) if code == StatusCode::NOT_FOUND.as_u16() => {
                return Err(SourceError::NotFound(id.to_string()))
            }
            other => other?,
        };

        match response.recipe {
            Some(recipe) => Ok(recipe.into()),
            None => {
                if let Some(error) = response.error {
                    tracing::debug!("Recipe {} rejected upstream: {}", id, error);
                }
                Err(SourceError::NotFound(id.to_string()))
            }
        }
    }
}
