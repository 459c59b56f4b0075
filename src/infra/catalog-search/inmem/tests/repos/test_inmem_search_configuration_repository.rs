// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use catalog_search::*;
use catalog_search_inmem::InMemorySearchConfigurationRepository;
use pretty_assertions::assert_eq;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_save_facet_upserts_by_id() {
    let repo = InMemorySearchConfigurationRepository::new();

    repo.save_facet(&FacetDefinition::term(2, "brand"))
        .await
        .unwrap();
    repo.save_facet(&FacetDefinition::term(1, "color"))
        .await
        .unwrap();

    let mut renamed = FacetDefinition::term(2, "brand");
    renamed.label = "Brand".to_string();
    repo.save_facet(&renamed).await.unwrap();

    let facets = repo.list_facets().await.unwrap();
    assert_eq!(facets.len(), 2);
    assert_eq!(facets[0].field, "color");
    assert_eq!(facets[1], renamed);
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_delete_missing_records() {
    let repo = InMemorySearchConfigurationRepository::new();

    repo.save_facet(&FacetDefinition::term(1, "color"))
        .await
        .unwrap();
    repo.delete_facet(FacetDefinitionId(1)).await.unwrap();

    assert!(matches!(
        repo.delete_facet(FacetDefinitionId(1)).await,
        Err(DeleteConfigurationRecordError::NotFound(ConfigurationRecordNotFoundError {
            kind: "facet",
            id: 1
        }))
    ));
    assert!(matches!(
        repo.delete_search_field(SearchFieldDefinitionId(7)).await,
        Err(DeleteConfigurationRecordError::NotFound(ConfigurationRecordNotFoundError {
            id: 7,
            ..
        }))
    ));
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_search_fields_round_trip() {
    let repo = InMemorySearchConfigurationRepository::new();

    let title = SearchFieldDefinition::new(1, "title", 3.0);
    repo.save_search_field(&title).await.unwrap();

    assert_eq!(repo.list_search_fields().await.unwrap(), vec![title]);

    repo.delete_search_field(SearchFieldDefinitionId(1))
        .await
        .unwrap();
    assert!(repo.list_search_fields().await.unwrap().is_empty());
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
