// ABOUTME: Detail service client fetching nutritional records by category
// ABOUTME: Issues one GET per lookup and never fabricates content on failure
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::core::FoodDetailSource;
use crate::errors::DetailError;
use crate::models::FoodDetail;
use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, info};
use url::Url;

/// Client for `GET <base>/<category>/`
#[derive(Debug, Clone)]
pub struct DetailClient {
    client: Client,
    base_url: Url,
}

impl DetailClient {
    /// Create a client resolving lookups against `base_url` through `client`
    #[must_use]
    pub const fn with_client(client: Client, base_url: Url) -> Self {
        Self { client, base_url }
    }

    /// Resolve the lookup URL for a category
    ///
    /// The base may or may not end in `/`; the category is percent-encoded as
    /// a single path segment and the result always ends in `/`.
    ///
    /// # Errors
    ///
    /// Returns `EmptyCategory` for a blank category and `InvalidBaseUrl` when
    /// the base cannot carry path segments.
    pub fn detail_url(&self, category: &str) -> Result<Url, DetailError> {
        let category = category.trim();
        if category.is_empty() {
            return Err(DetailError::EmptyCategory);
        }

        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| DetailError::InvalidBaseUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .push(category)
            .push("");
        Ok(url)
    }
}

#[async_trait]
impl FoodDetailSource for DetailClient {
    async fn fetch_detail(&self, category: &str) -> Result<FoodDetail, DetailError> {
        let url = self.detail_url(category)?;
        debug!(%url, "Fetching food detail");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| DetailError::from_transport(category, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(DetailError::Status {
                status: status.as_u16(),
                category: category.to_owned(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| DetailError::from_transport(category, e))?;

        let detail: FoodDetail =
            serde_json::from_slice(&body).map_err(|e| DetailError::Decode {
                category: category.to_owned(),
                reason: e.to_string(),
            })?;

        info!(category, name = %detail.name, kcal = detail.kcal, "Food detail fetched");
        Ok(detail)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str) -> DetailClient {
        DetailClient::with_client(Client::new(), Url::parse(base).unwrap())
    }

    #[test]
    fn test_url_with_trailing_slash_base() {
        let url = client("https://api.example.com/foods/").detail_url("27").unwrap();
        assert_eq!(url.as_str(), "https://api.example.com/foods/27/");
    }

    #[test]
    fn test_url_without_trailing_slash_base() {
        let url = client("https://api.example.com/foods").detail_url("apple").unwrap();
        assert_eq!(url.as_str(), "https://api.example.com/foods/apple/");

        let root = client("http://127.0.0.1:8080").detail_url("apple").unwrap();
        assert_eq!(root.as_str(), "http://127.0.0.1:8080/apple/");
    }

    #[test]
    fn test_category_is_a_single_encoded_segment() {
        let url = client("https://api.example.com/foods/")
            .detail_url("fried rice/egg")
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.example.com/foods/fried%20rice%2Fegg/"
        );
    }

    #[test]
    fn test_blank_category_rejected() {
        assert!(matches!(
            client("https://api.example.com/foods/").detail_url("  "),
            Err(DetailError::EmptyCategory)
        ));
    }
}
