// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::time::Duration;

use serde::Deserialize;

use crate::FilterQuery;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FacetedSearchConfig {
    /// Object field of the product document holding attribute values
    pub attributes_container: String,

    /// How long derived attribute field types stay cached
    pub attribute_fields_ttl_secs: u64,

    pub default_page_size: usize,

    pub max_page_size: usize,

    /// Applied to every search before any other filter, in this order
    pub default_filter_queries: Vec<FilterQuery>,

    /// Nested field holding product categories
    pub categories_path: String,

    pub category_id_field: String,

    /// Numeric filters rendered in the form without aggregations
    pub range_filter_fields: Vec<RangeFilterFieldConfig>,
}

impl Default for FacetedSearchConfig {
    fn default() -> Self {
        Self {
            attributes_container: "attributes".to_string(),
            attribute_fields_ttl_secs: 3600,
            default_page_size: 10,
            max_page_size: 10_000,
            default_filter_queries: vec![FilterQuery::term("is_public", true)],
            categories_path: "categories".to_string(),
            category_id_field: "categories.id".to_string(),
            range_filter_fields: vec![RangeFilterFieldConfig {
                name: "price".to_string(),
                label: "Price".to_string(),
                field: "price".to_string(),
            }],
        }
    }
}

impl FacetedSearchConfig {
    pub fn attribute_fields_ttl(&self) -> Duration {
        Duration::from_secs(self.attribute_fields_ttl_secs)
    }

    /// Requested page size, or the default one, capped by the maximum
    pub fn effective_page_size(&self, requested: Option<usize>) -> usize {
        requested
            .filter(|size| *size > 0)
            .unwrap_or(self.default_page_size)
            .min(self.max_page_size)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RangeFilterFieldConfig {
    pub name: String,
    pub label: String,
    pub field: String,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////


////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
