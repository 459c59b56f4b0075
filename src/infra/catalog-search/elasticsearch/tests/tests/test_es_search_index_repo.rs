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
use catalog_search_elasticsearch::*;
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_repository_is_resolved_as_search_index() {
    let harness = EsRepoHarness::new("http://127.0.0.1:1/");

    let repo = harness.catalog.get_one::<dyn SearchIndexRepository>();
    assert!(repo.is_ok());

    let concrete = harness
        .catalog
        .get_one::<ElasticsearchSearchIndexRepository>()
        .unwrap();
    assert_eq!(concrete.index_name(), "products");
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_unreachable_node_is_an_internal_error() {
    let harness = EsRepoHarness::new("http://127.0.0.1:1/");
    let repo = harness.catalog.get_one::<dyn SearchIndexRepository>().unwrap();

    let query = SearchQuery {
        text: None,
        default_filters: vec![],
        dynamic_filters: vec![],
        facet_filters: vec![],
        aggregations: vec![],
        page: SearchPage::new(1, 10),
    };

    let res = repo.search(&query).await;
    assert!(res.is_err());
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_ensure_index_creates_missing_index() {
    let server = MockServer::start().await;

    Mock::given(method("HEAD"))
        .and(path("/products"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/products"))
        .and(body_partial_json(json!({
            "settings": {
                "number_of_shards": 1,
                "number_of_replicas": 0,
            },
            "mappings": {
                "properties": {
                    "title": { "type": "text" },
                },
            },
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "acknowledged": true })))
        .expect(1)
        .mount(&server)
        .await;

    let harness = EsRepoHarness::new(&server.uri());
    let repo = harness.repo();

    let created = repo
        .ensure_index(&DocumentSchema::product_default("attributes"))
        .await
        .unwrap();
    assert!(created);
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_ensure_index_keeps_existing_index() {
    let server = MockServer::start().await;

    Mock::given(method("HEAD"))
        .and(path("/products"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let harness = EsRepoHarness::new(&server.uri());
    let repo = harness.repo();

    let created = repo
        .ensure_index(&DocumentSchema::product_default("attributes"))
        .await
        .unwrap();
    assert!(!created);
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_health_returns_cluster_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/_cluster/health"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "cluster_name": "catalog", "status": "green" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let harness = EsRepoHarness::new(&server.uri());

    let health = harness.repo().health().await.unwrap();
    assert_eq!(health["status"], "green");
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_failed_index_creation_is_an_internal_error() {
    let server = MockServer::start().await;

    Mock::given(method("HEAD"))
        .and(path("/products"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/products"))
        .respond_with(ResponseTemplate::new(400))
        .expect(1)
        .mount(&server)
        .await;

    let harness = EsRepoHarness::new(&server.uri());

    let res = harness
        .repo()
        .ensure_index(&DocumentSchema::product_default("attributes"))
        .await;
    assert!(res.is_err());
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

struct EsRepoHarness {
    catalog: dill::Catalog,
}

impl EsRepoHarness {
    fn new(url: &str) -> Self {
        let mut b = dill::CatalogBuilder::new();
        b.add_value(ElasticsearchClientConfig {
            url: url::Url::parse(url).unwrap(),
            password: None,
            timeout_secs: 1,
            enable_compression: false,
        })
        .add_value(ElasticsearchRepositoryConfig::default());
        register_dependencies(&mut b);

        Self { catalog: b.build() }
    }

    fn repo(&self) -> Arc<ElasticsearchSearchIndexRepository> {
        self.catalog
            .get_one::<ElasticsearchSearchIndexRepository>()
            .unwrap()
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
