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
use catalog_search_services::{FacetRegistrationError, FacetedSearch, FacetedSearchState};
use pretty_assertions::assert_eq;
use serde_json::json;

use super::utils::{RecordingSearchIndexRepository, price_facet, raw_facet};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_filter_clauses_follow_fixed_order() {
    let harness = FacetedSearchHarness::new(IndexSearchResponse::default());
    let mut search = harness.search(SearchPage::new(1, 10));

    // Added in reverse order on purpose
    search.add_filter("price", &["*_10".to_string()]).unwrap();
    search.add_filter("brand", &["acme".to_string()]).unwrap();
    search
        .add_filter_query(FilterQuery::term("in_stock", true))
        .unwrap();
    search
        .add_default_filter(FilterQuery::term("is_public", true))
        .unwrap();

    let query = search.build();

    assert_eq!(
        query.filter_clauses(),
        vec![
            &FilterQuery::term("is_public", true),
            &FilterQuery::term("in_stock", true),
            &FilterQuery::terms("brand", ["acme"]),
            &FilterQuery::range(
                "price",
                RangeBounds {
                    lt: Some(json!(10)),
                    ..Default::default()
                }
            ),
        ]
    );
    assert_eq!(
        query
            .aggregations
            .iter()
            .map(|a| a.key.as_str())
            .collect::<Vec<_>>(),
        vec!["brand", "price"]
    );
    assert_eq!(search.state(), FacetedSearchState::Built);
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_filter_on_unknown_facet_is_rejected() {
    let harness = FacetedSearchHarness::new(IndexSearchResponse::default());
    let mut search = harness.search(SearchPage::new(1, 10));

    assert_eq!(
        search.add_filter("color", &["red".to_string()]),
        Err(FilterApplicationError::UnknownFacet {
            facet_key: "color".to_string()
        })
    );
    assert_eq!(
        search.add_filter("price", &["5_6".to_string()]),
        Err(FilterApplicationError::InvalidFilterValue {
            facet_key: "price".to_string(),
            value: "5_6".to_string(),
        })
    );

    assert!(search.selected_values("color").is_empty());
    assert!(search.build().facet_filters.is_empty());
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_repeated_filters_accumulate_values() {
    let harness = FacetedSearchHarness::new(IndexSearchResponse::default());
    let mut search = harness.search(SearchPage::new(1, 10));

    search.add_filter("brand", &["acme".to_string()]).unwrap();
    search
        .add_filter("brand", &["globex".to_string(), "acme".to_string()])
        .unwrap();

    assert_eq!(search.selected_values("brand"), ["acme", "globex"]);
    assert_eq!(
        search.build().selected_values_filter("brand"),
        Some(&FilterQuery::terms("brand", ["acme", "globex"]))
    );
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_registration_errors() {
    let harness = FacetedSearchHarness::new(IndexSearchResponse::default());
    let mut search = harness.search(SearchPage::new(1, 10));

    assert_eq!(
        search.register_facet(Arc::new(FacetDefinition::term(9, "brand"))),
        Err(FacetRegistrationError::DuplicateKey {
            facet_key: "brand".to_string()
        })
    );

    let mut histogram = FacetDefinition::term(10, "weight");
    histogram.facet_type = FacetType::Unsupported("histogram".to_string());
    assert_eq!(
        search.register_facet(Arc::new(histogram)),
        Err(FacetRegistrationError::Compile(
            UnsupportedFacetTypeError {
                field: "weight".to_string(),
                facet_type: "histogram".to_string(),
            }
            .into()
        ))
    );

    assert_eq!(
        search
            .facet_definitions()
            .map(|d| d.key())
            .collect::<Vec<_>>(),
        vec!["brand", "price"]
    );
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_execute_rebuilds_query_and_enriches_buckets() {
    let harness = FacetedSearchHarness::new(IndexSearchResponse {
        total_hits: 4,
        hits: Vec::new(),
        facets: vec![
            raw_facet("brand", &[("acme", 3), ("globex", 1)]),
            raw_facet("discontinued", &[("yes", 2)]),
        ],
    });
    let mut search = harness.search(SearchPage::new(3, 20));

    search.add_filter("brand", &["acme".to_string()]).unwrap();
    let response = search.execute().await.unwrap();

    assert_eq!(search.state(), FacetedSearchState::Executed);
    assert_eq!(response.page_number, 3);
    assert_eq!(response.page_size, 20);

    let brand = response.facet("brand").unwrap();
    assert_eq!(brand.definition.as_ref().map(|d| d.id), Some(FacetDefinitionId(1)));
    assert_eq!(
        brand
            .buckets
            .iter()
            .map(|b| (b.key.as_str(), b.doc_count, b.selected))
            .collect::<Vec<_>>(),
        vec![("acme", 3, true), ("globex", 1, false)]
    );

    // Buckets without a registered facet pass through without a definition
    let discontinued = response.facet("discontinued").unwrap();
    assert!(discontinued.definition.is_none());
    assert_eq!(discontinued.buckets.len(), 1);

    search.add_filter("price", &["100_*".to_string()]).unwrap();
    assert_eq!(search.state(), FacetedSearchState::Configured);

    search.execute().await.unwrap();
    search.mark_reflected();
    assert_eq!(search.state(), FacetedSearchState::Reflected);

    let queries = harness.index_repo.queries();
    assert_eq!(queries.len(), 2);
    assert_eq!(queries[0].facet_filters.len(), 1);
    assert_eq!(queries[1].facet_filters.len(), 2);
    assert_eq!(queries[1].page, SearchPage { offset: 40, limit: 20 });
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_blank_text_query_matches_everything() {
    let harness = FacetedSearchHarness::new(IndexSearchResponse::default());
    let mut search = harness.search(SearchPage::new(1, 10));

    let fields = vec![WeightedField {
        field: "title".to_string(),
        boost: 2.0,
    }];

    search.set_text_query("   ", fields.clone());
    assert_eq!(search.build().text, None);

    search.set_text_query(" shoes ", fields.clone());
    assert_eq!(
        search.build().text,
        Some(TextQuery {
            query: "shoes".to_string(),
            fields,
        })
    );
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_malformed_filter_query_is_rejected() {
    let harness = FacetedSearchHarness::new(IndexSearchResponse::default());
    let mut search = harness.search(SearchPage::new(1, 10));

    let empty_terms = FilterQuery::terms("brand", Vec::<String>::new());
    assert!(matches!(
        search.add_filter_query(empty_terms),
        Err(FilterApplicationError::MalformedFilterQuery(_))
    ));
    assert!(search.build().dynamic_filters.is_empty());
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
// Harness
////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

struct FacetedSearchHarness {
    index_repo: Arc<RecordingSearchIndexRepository>,
}

impl FacetedSearchHarness {
    fn new(response: IndexSearchResponse) -> Self {
        Self {
            index_repo: Arc::new(RecordingSearchIndexRepository::new(response)),
        }
    }

    /// Search with a `brand` term facet and a `price` range facet registered
    fn search(&self, page: SearchPage) -> FacetedSearch {
        let mut search = FacetedSearch::new(self.index_repo.clone(), page);
        search
            .register_facet(Arc::new(FacetDefinition::term(1, "brand")))
            .unwrap();
        search.register_facet(Arc::new(price_facet(2))).unwrap();
        search
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
