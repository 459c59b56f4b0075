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
use catalog_search_services::AttributeFieldCatalogImpl;
use pretty_assertions::assert_eq;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_attribute_fields_are_cached() {
    let catalog = make_catalog(3600, 1);

    let fields = catalog.attribute_fields().await.unwrap();
    assert_eq!(
        fields.get("color"),
        Some(&FieldSpec::of_type(IndexFieldType::Keyword))
    );
    assert_eq!(
        fields.get("notes"),
        Some(&FieldSpec::of_type(IndexFieldType::Text))
    );

    // Served from cache
    let schema = catalog.document_schema().await.unwrap();
    let choices = catalog.facet_field_choices().await.unwrap();

    assert!(schema.field("attributes").is_some());
    assert!(
        choices
            .iter()
            .any(|c| c.field_ref == "attributes.notes.keyword"
                && c.display_label == "[attribute] attributes.notes.keyword")
    );
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_invalidate_forces_recompute() {
    let catalog = make_catalog(3600, 2);

    catalog.attribute_fields().await.unwrap();
    catalog.invalidate();
    catalog.attribute_fields().await.unwrap();
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_zero_ttl_disables_caching() {
    let catalog = make_catalog(0, 3);

    catalog.attribute_fields().await.unwrap();
    catalog.search_field_choices().await.unwrap();
    catalog.document_schema().await.unwrap();
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

fn make_catalog(ttl_secs: u64, expected_loads: usize) -> AttributeFieldCatalogImpl {
    let mut attribute_repo = MockAttributeRepository::new();
    attribute_repo
        .expect_list_attributes()
        .times(expected_loads)
        .returning(|| {
            Ok(vec![
                Attribute::new("color", "Color", AttributeType::Option),
                Attribute::new("notes", "Notes", AttributeType::Richtext),
            ])
        });

    AttributeFieldCatalogImpl::new(
        Arc::new(FacetedSearchConfig {
            attribute_fields_ttl_secs: ttl_secs,
            ..FacetedSearchConfig::default()
        }),
        Arc::new(attribute_repo),
    )
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
