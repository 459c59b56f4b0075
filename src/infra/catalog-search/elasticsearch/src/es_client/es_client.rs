// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use thiserror::Error;

use super::SearchResponse;
use crate::ElasticsearchClientConfig;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

const ELASTIC_USER: &str = "elastic";

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Thin JSON-over-HTTP client for the few Elasticsearch endpoints we use
pub struct ElasticsearchClient {
    http: reqwest::Client,
    base_url: url::Url,
    password: Option<String>,
}

impl ElasticsearchClient {
    pub fn init(config: ElasticsearchClientConfig) -> Result<Self, ElasticsearchClientError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION"),
            ))
            .timeout(config.timeout())
            .gzip(config.enable_compression)
            .build()?;

        // Relative joins replace the last path segment otherwise
        let mut base_url = config.url;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        Ok(Self {
            http,
            base_url,
            password: config.password,
        })
    }

    fn request(
        &self,
        method: reqwest::Method,
        path: &str,
    ) -> Result<reqwest::RequestBuilder, ElasticsearchClientError> {
        let url = self.base_url.join(path)?;
        let request = self.http.request(method, url);

        Ok(match &self.password {
            Some(password) => request.basic_auth(ELASTIC_USER, Some(password)),
            None => request,
        })
    }

    pub async fn cluster_health(&self) -> Result<serde_json::Value, ElasticsearchClientError> {
        let health = self
            .request(reqwest::Method::GET, "_cluster/health")?
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(health)
    }

    pub async fn index_exists(&self, index: &str) -> Result<bool, ElasticsearchClientError> {
        let response = self.request(reqwest::Method::HEAD, index)?.send().await?;

        match response.status() {
            reqwest::StatusCode::NOT_FOUND => Ok(false),
            _ => {
                response.error_for_status()?;
                Ok(true)
            }
        }
    }

    pub async fn create_index(
        &self,
        index: &str,
        body: &serde_json::Value,
    ) -> Result<(), ElasticsearchClientError> {
        self.request(reqwest::Method::PUT, index)?
            .json(body)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }

    pub async fn search(
        &self,
        index: &str,
        body: &serde_json::Value,
    ) -> Result<SearchResponse, ElasticsearchClientError> {
        let response = self
            .request(reqwest::Method::POST, &format!("{index}/_search"))?
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let reason = response.text().await?;
            return Err(ElasticsearchClientError::Rejected { status, reason });
        }

        Ok(response.json().await?)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Error, Debug)]
pub enum ElasticsearchClientError {
    #[error(transparent)]
    Url(#[from] url::ParseError),

    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error("Elasticsearch rejected the request with {status}: {reason}")]
    Rejected {
        status: reqwest::StatusCode,
        reason: String,
    },
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
