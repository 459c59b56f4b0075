// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.


use std::sync::Arc;

use catalog_search::*;
use internal_error::{InternalError, ResultIntoInternal};

use crate::{ElasticsearchClientConfig, ElasticsearchRepositoryConfig, es_client, es_helpers};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub struct ElasticsearchSearchIndexRepository {
    client_config: Arc<ElasticsearchClientConfig>,
    repo_config: Arc<ElasticsearchRepositoryConfig>,
    client: tokio::sync::OnceCell<es_client::ElasticsearchClient>,
}

#[dill::component(pub)]
#[dill::scope(dill::Singleton)]
#[dill::interface(dyn SearchIndexRepository)]
impl ElasticsearchSearchIndexRepository {
    pub fn new(
        client_config: Arc<ElasticsearchClientConfig>,
        repo_config: Arc<ElasticsearchRepositoryConfig>,
    ) -> Self {
        Self {
            client_config,
            repo_config,
            client: tokio::sync::OnceCell::new(),
        }
    }

    async fn es_client(&self) -> Result<&es_client::ElasticsearchClient, InternalError> {
        let client = self
            .client
            .get_or_try_init(async || {
                es_client::ElasticsearchClient::init((*self.client_config).clone())
            })
            .await
            .int_err()?;
        Ok(client)
    }

    pub fn index_name(&self) -> &str {
        &self.repo_config.index_name
    }

    #[tracing::instrument(level = "debug", skip_all)]
    pub async fn health(&self) -> Result<serde_json::Value, InternalError> {
        let client = self.es_client().await?;
        client.cluster_health().await.int_err()
    }

    /// Creates the product index from the schema unless it already exists.
    /// Returns whether the index was created.
    #[tracing::instrument(level = "info", skip_all, fields(index = %self.repo_config.index_name))]
    pub async fn ensure_index(&self, schema: &DocumentSchema) -> Result<bool, InternalError> {
        let client = self.es_client().await?;
        let index = self.index_name();

        if client.index_exists(index).await.int_err()? {
            tracing::info!("Search index already exists, skipping");
            return Ok(false);
        }

        let body = es_helpers::ElasticsearchIndexMappings::build(schema);
        client.create_index(index, &body).await.int_err()?;

        tracing::info!(num_fields = schema.fields().len(), "Created search index");
        Ok(true)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[async_trait::async_trait]
impl SearchIndexRepository for ElasticsearchSearchIndexRepository {
    #[tracing::instrument(level = "debug", skip_all, fields(index = %self.repo_config.index_name))]
    async fn search(&self, query: &SearchQuery) -> Result<IndexSearchResponse, InternalError> {
        let client = self.es_client().await?;

        let body = es_helpers::ElasticsearchQueryBuilder::build_search_body(query);
        tracing::trace!(%body, "Sending search request");

        let response = client.search(self.index_name(), &body).await.int_err()?;

        tracing::debug!(
            took_ms = response.took,
            timed_out = response.timed_out,
            num_aggregations = response.aggregations.len(),
            "Search request complete",
        );

        Ok(es_helpers::ElasticsearchResponseTranslator::translate(
            response, query,
        ))
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
