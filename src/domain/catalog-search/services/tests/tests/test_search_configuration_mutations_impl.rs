// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::collections::BTreeSet;
use std::sync::{Arc, Mutex};

use catalog_search::*;
use catalog_search_inmem::{InMemoryAttributeRepository, InMemorySearchConfigurationRepository};
use catalog_search_services::{
    AttributeFieldCatalogImpl,
    SearchConfigurationCache,
    SearchConfigurationMutationsImpl,
};
use indoc::indoc;
use internal_error::InternalError;
use pretty_assertions::assert_eq;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_save_range_facet_parses_ranges_and_notifies() {
    let harness = MutationsHarness::new();

    let facet = harness
        .mutations
        .save_facet(SaveFacetRequest {
            range_spec: indoc!(
                "
                Cheap | | 10
                Premium | 100 |
                "
            )
            .to_string(),
            ..range_request(1, "price")
        })
        .await
        .unwrap();

    assert_eq!(
        facet.ranges,
        vec![
            RangeOption {
                label: "Cheap".to_string(),
                lower: None,
                upper: Some(10),
            },
            RangeOption {
                label: "Premium".to_string(),
                lower: Some(100),
                upper: None,
            },
        ]
    );
    assert_eq!(harness.configuration_repo.list_facets().await.unwrap(), vec![facet]);

    harness.assert_events(&["FacetSaved(FacetDefinitionId(1))"]);
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_save_facet_rejections() {
    let harness = MutationsHarness::new();

    let res = harness
        .mutations
        .save_facet(SaveFacetRequest {
            range_spec: "Cheap | ten | 10".to_string(),
            ..range_request(1, "price")
        })
        .await;
    assert!(
        matches!(&res, Err(SaveFacetError::InvalidRanges(e)) if e.invalid_lines[0].line_number == 1),
        "{res:?}"
    );

    let res = harness
        .mutations
        .save_facet(SaveFacetRequest {
            range_spec: "\n  \n".to_string(),
            ..range_request(1, "price")
        })
        .await;
    assert!(
        matches!(res, Err(SaveFacetError::InvalidFacet(FacetCompileError::NoRanges { .. }))),
        "{res:?}"
    );

    let res = harness
        .mutations
        .save_facet(SaveFacetRequest {
            facet_type: FacetType::Unsupported("histogram".to_string()),
            ..range_request(1, "price")
        })
        .await;
    assert!(
        matches!(
            res,
            Err(SaveFacetError::InvalidFacet(FacetCompileError::UnsupportedFacetType(_)))
        ),
        "{res:?}"
    );

    // Nested containers cannot be aggregated directly
    let res = harness
        .mutations
        .save_facet(term_request(1, "categories"))
        .await;
    assert!(
        matches!(&res, Err(SaveFacetError::NotFacetable { field }) if field == "categories"),
        "{res:?}"
    );

    assert!(harness.configuration_repo.list_facets().await.unwrap().is_empty());
    harness.assert_events(&[]);
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_attribute_fields_are_facetable() {
    let harness = MutationsHarness::new();

    harness
        .mutations
        .save_facet(term_request(5, "attributes.color"))
        .await
        .unwrap();

    let res = harness
        .mutations
        .save_facet(term_request(6, "attributes.unknown"))
        .await;
    assert!(matches!(res, Err(SaveFacetError::NotFacetable { .. })));

    harness.assert_events(&["FacetSaved(FacetDefinitionId(5))"]);
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_saved_facet_is_visible_in_next_snapshot() {
    let harness = MutationsHarness::new();

    assert!(harness.cache.snapshot().await.unwrap().facets().is_empty());

    harness
        .mutations
        .save_facet(term_request(1, "upc"))
        .await
        .unwrap();

    let snapshot = harness.cache.snapshot().await.unwrap();
    assert_eq!(
        snapshot.facets().iter().map(|f| f.key()).collect::<Vec<_>>(),
        vec!["upc"]
    );

    harness
        .mutations
        .delete_facet(FacetDefinitionId(1))
        .await
        .unwrap();
    assert!(harness.cache.snapshot().await.unwrap().facets().is_empty());

    assert!(matches!(
        harness.mutations.delete_facet(FacetDefinitionId(1)).await,
        Err(DeleteConfigurationError::NotFound(_))
    ));

    harness.assert_events(&[
        "FacetSaved(FacetDefinitionId(1))",
        "FacetDeleted(FacetDefinitionId(1))",
    ]);
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_search_field_mutations() {
    let harness = MutationsHarness::new();

    harness
        .mutations
        .save_search_field(SearchFieldDefinition::new(1, "title", 3.0))
        .await
        .unwrap();

    let res = harness
        .mutations
        .save_search_field(SearchFieldDefinition::new(2, "price", 1.0))
        .await;
    assert!(
        matches!(&res, Err(SaveSearchFieldError::NotSearchable { field }) if field == "price"),
        "{res:?}"
    );

    let res = harness
        .mutations
        .save_search_field(SearchFieldDefinition::new(3, "title", -1.0))
        .await;
    assert!(matches!(res, Err(SaveSearchFieldError::Invalid(_))), "{res:?}");

    harness
        .mutations
        .delete_search_field(SearchFieldDefinitionId(1))
        .await
        .unwrap();

    harness.assert_events(&[
        "SearchFieldSaved(SearchFieldDefinitionId(1))",
        "SearchFieldDeleted(SearchFieldDefinitionId(1))",
    ]);
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
// Harness
////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

struct MutationsHarness {
    configuration_repo: Arc<InMemorySearchConfigurationRepository>,
    cache: Arc<SearchConfigurationCache>,
    mutations: SearchConfigurationMutationsImpl,
    events: Arc<Mutex<Vec<String>>>,
}

impl MutationsHarness {
    fn new() -> Self {
        let attribute_repo = Arc::new(InMemoryAttributeRepository::new());
        attribute_repo.add_attributes([
            Attribute::new("color", "Color", AttributeType::Option),
            Attribute::new("notes", "Notes", AttributeType::Richtext),
        ]);

        let configuration_repo = Arc::new(InMemorySearchConfigurationRepository::new());
        let cache = Arc::new(SearchConfigurationCache::new(configuration_repo.clone()));
        let events = Arc::new(Mutex::new(Vec::new()));

        let message_consumers: Vec<Arc<dyn SearchConfigurationMessageConsumer>> = vec![
            cache.clone(),
            Arc::new(RecordingConsumer {
                events: events.clone(),
            }),
            Arc::new(FailingConsumer),
        ];

        let mutations = SearchConfigurationMutationsImpl::new(
            configuration_repo.clone(),
            Arc::new(AttributeFieldCatalogImpl::new(
                Arc::new(FacetedSearchConfig::default()),
                attribute_repo,
            )),
            message_consumers,
        );

        Self {
            configuration_repo,
            cache,
            mutations,
            events,
        }
    }

    fn assert_events(&self, expected: &[&str]) {
        let actual = self.events.lock().unwrap().clone();
        assert_eq!(actual, expected);
    }
}

fn term_request(id: u64, field: &str) -> SaveFacetRequest {
    SaveFacetRequest {
        id: FacetDefinitionId(id),
        field: field.to_string(),
        facet_type: FacetType::Term,
        label: String::new(),
        size: DEFAULT_FACET_SIZE,
        formatter: None,
        range_spec: String::new(),
        range_value_type: RangeValueType::Integer,
        order: 0,
        enabled_categories: BTreeSet::new(),
        disabled_categories: BTreeSet::new(),
    }
}

fn range_request(id: u64, field: &str) -> SaveFacetRequest {
    SaveFacetRequest {
        facet_type: FacetType::Range,
        ..term_request(id, field)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

struct RecordingConsumer {
    events: Arc<Mutex<Vec<String>>>,
}

#[async_trait::async_trait]
impl SearchConfigurationMessageConsumer for RecordingConsumer {
    fn consumer_name(&self) -> &'static str {
        "RecordingConsumer"
    }

    async fn consume_message(
        &self,
        message: &SearchConfigurationMessage,
    ) -> Result<(), InternalError> {
        self.events.lock().unwrap().push(format!("{message:?}"));
        Ok(())
    }
}

/// Its failures must not affect the mutation or the other consumers
struct FailingConsumer;

#[async_trait::async_trait]
impl SearchConfigurationMessageConsumer for FailingConsumer {
    fn consumer_name(&self) -> &'static str {
        "FailingConsumer"
    }

    async fn consume_message(&self, _: &SearchConfigurationMessage) -> Result<(), InternalError> {
        InternalError::bail("consumer is down")
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
