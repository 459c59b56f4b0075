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
use catalog_search_inmem::{InMemoryAttributeRepository, InMemorySearchConfigurationRepository};
use catalog_search_services::register_builtin_formatters;
use dill::Catalog;
use pretty_assertions::assert_eq;

use super::utils::{RecordingSearchIndexRepository, price_facet, raw_facet, submission};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

const SHOES: CategoryId = 7;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_category_search_end_to_end() {
    let harness = FacetedSearchServiceHarness::new().await;

    let result = harness
        .search(FacetedSearchRequest {
            query: Some("running".to_string()),
            category_id: Some(SHOES),
            submission: submission(&[
                ("brand", &["acme"]),
                ("price", &["10_100"]),
                ("rating_min", &["4"]),
            ]),
            ..Default::default()
        })
        .await;

    let query = harness.index_repo.last_query();

    assert_eq!(
        query.text,
        Some(TextQuery {
            query: "running".to_string(),
            fields: vec![WeightedField {
                field: "title".to_string(),
                boost: 3.0,
            }],
        })
    );
    assert_eq!(
        query.default_filters,
        vec![FilterQuery::term("is_public", true)]
    );
    assert_eq!(query.dynamic_filters.len(), 2);
    assert_eq!(
        query.dynamic_filters[0],
        FilterQuery::nested("categories", FilterQuery::term("categories.id", SHOES))
    );
    assert_eq!(
        query
            .facet_filters
            .iter()
            .map(|f| f.facet_key.as_str())
            .collect::<Vec<_>>(),
        vec!["brand", "price"]
    );

    // `attributes.color` is disabled for shoes
    assert_eq!(
        result
            .form
            .fields
            .iter()
            .map(FormField::name)
            .collect::<Vec<_>>(),
        vec!["brand", "price", "rating"]
    );

    let brand = result.form.facet_field("brand").unwrap();
    assert_eq!(brand.label, "Brand");
    assert_eq!(
        brand
            .choices
            .iter()
            .map(|c| c.label.as_str())
            .collect::<Vec<_>>(),
        vec!["ACME (4)", "GLOBEX (0)"]
    );

    assert_eq!(result.response.total_hits, 4);
    assert_eq!(result.response.page_number, 1);
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_search_without_category_uses_all_facets() {
    let harness = FacetedSearchServiceHarness::new().await;

    let result = harness.search(FacetedSearchRequest::default()).await;

    let query = harness.index_repo.last_query();
    assert_eq!(query.text, None);
    assert!(query.dynamic_filters.is_empty());
    assert_eq!(
        query
            .aggregations
            .iter()
            .map(|a| a.key.as_str())
            .collect::<Vec<_>>(),
        vec!["brand", "price", "attributes.color"]
    );
    assert!(result.form.facet_field("attributes.color").is_some());
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_page_resolution() {
    let harness = FacetedSearchServiceHarness::new().await;

    harness
        .search(FacetedSearchRequest {
            page_number: Some(2),
            ..Default::default()
        })
        .await;
    assert_eq!(
        harness.index_repo.last_query().page,
        SearchPage { offset: 10, limit: 10 }
    );

    harness
        .search(FacetedSearchRequest {
            page_number: Some(0),
            page_size: Some(50_000),
            ..Default::default()
        })
        .await;
    assert_eq!(
        harness.index_repo.last_query().page,
        SearchPage {
            offset: 0,
            limit: 10_000
        }
    );
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_broken_facet_is_skipped() {
    let harness = FacetedSearchServiceHarness::new().await;

    // Written around the mutation service, so never validated
    let broken = FacetDefinition::range(9, "rating", RangeValueType::Float, Vec::new());
    harness
        .catalog
        .get_one::<dyn SearchConfigurationRepository>()
        .unwrap()
        .save_facet(&broken)
        .await
        .unwrap();
    harness
        .catalog
        .get_one::<dyn SearchConfigurationProvider>()
        .unwrap()
        .invalidate();

    harness.search(FacetedSearchRequest::default()).await;

    assert_eq!(
        harness
            .index_repo
            .last_query()
            .aggregations
            .iter()
            .map(|a| a.key.as_str())
            .collect::<Vec<_>>(),
        vec!["brand", "price", "attributes.color"]
    );
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
// Harness
////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

struct FacetedSearchServiceHarness {
    catalog: Catalog,
    index_repo: Arc<RecordingSearchIndexRepository>,
}

impl FacetedSearchServiceHarness {
    async fn new() -> Self {
        let mut formatters = FormatterRegistry::builder();
        register_builtin_formatters(&mut formatters).unwrap();

        let catalog = {
            let mut b = dill::CatalogBuilder::new();

            b.add_value(FacetedSearchConfig {
                range_filter_fields: vec![RangeFilterFieldConfig {
                    name: "rating".to_string(),
                    label: "Rating".to_string(),
                    field: "rating".to_string(),
                }],
                ..FacetedSearchConfig::default()
            });
            b.add_value(formatters.build());
            b.add_value(RecordingSearchIndexRepository::new(IndexSearchResponse {
                total_hits: 4,
                hits: Vec::new(),
                facets: vec![
                    raw_facet("brand", &[("acme", 4), ("globex", 0)]),
                    raw_facet("price", &[("*_10", 0), ("10_100", 4), ("100_*", 0)]),
                ],
            }))
            .bind::<dyn SearchIndexRepository, RecordingSearchIndexRepository>();
            b.add::<InMemoryAttributeRepository>();
            b.add::<InMemorySearchConfigurationRepository>();

            catalog_search_services::register_dependencies(&mut b);

            b.build()
        };

        catalog
            .get_one::<InMemoryAttributeRepository>()
            .unwrap()
            .add_attributes([Attribute::new("color", "Color", AttributeType::Option)]);

        let mutations = catalog
            .get_one::<dyn SearchConfigurationMutations>()
            .unwrap();

        let mut brand = FacetDefinition::term(1, "brand");
        brand.label = "Brand".to_string();
        brand.formatter = Some("uppercase_formatter".to_string());
        brand.order = 1;

        let mut price = price_facet(2);
        price.order = 2;
        price.enabled_categories.insert(SHOES);

        let mut color = FacetDefinition::term(3, "attributes.color");
        color.order = 3;
        color.disabled_categories.insert(SHOES);

        // Facets go straight to the repository: `brand` is not a product field
        let configuration_repo = catalog
            .get_one::<dyn SearchConfigurationRepository>()
            .unwrap();
        for facet in [brand, price, color] {
            configuration_repo.save_facet(&facet).await.unwrap();
        }

        mutations
            .save_search_field(SearchFieldDefinition::new(1, "title", 3.0))
            .await
            .unwrap();

        let index_repo = catalog
            .get_one::<RecordingSearchIndexRepository>()
            .unwrap();

        Self {
            catalog,
            index_repo,
        }
    }

    async fn search(&self, req: FacetedSearchRequest) -> FacetedSearchResult {
        self.catalog
            .get_one::<dyn FacetedSearchService>()
            .unwrap()
            .search(req)
            .await
            .unwrap()
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
