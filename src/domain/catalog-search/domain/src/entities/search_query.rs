// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use crate::{CompiledFacet, FilterQuery, WeightedField};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Fully assembled request to the search index.
///
/// Filters are kept in three groups so that the index adapter can place
/// facet selections apart from the rest (see [`SearchQuery::aggregation_filters`]).
#[derive(Debug, Clone, PartialEq)]
pub struct SearchQuery {
    pub text: Option<TextQuery>,
    pub default_filters: Vec<FilterQuery>,
    pub dynamic_filters: Vec<FilterQuery>,
    /// In facet registration order
    pub facet_filters: Vec<FacetFilter>,
    pub aggregations: Vec<FacetAggregation>,
    pub page: SearchPage,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextQuery {
    pub query: String,
    /// Empty list lets the index pick its default fields
    pub fields: Vec<WeightedField>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FacetFilter {
    pub facet_key: String,
    pub query: FilterQuery,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FacetAggregation {
    pub key: String,
    pub facet: CompiledFacet,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchPage {
    pub offset: usize,
    pub limit: usize,
}

impl SearchPage {
    /// `page_number` is 1-based
    pub fn new(page_number: usize, page_size: usize) -> Self {
        Self {
            offset: page_number.saturating_sub(1).saturating_mul(page_size),
            limit: page_size,
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

impl SearchQuery {
    /// Every filter clause in application order: default filters, then
    /// dynamically added ones, then facet selections
    pub fn filter_clauses(&self) -> Vec<&FilterQuery> {
        self.default_filters
            .iter()
            .chain(&self.dynamic_filters)
            .chain(self.facet_filters.iter().map(|f| &f.query))
            .collect()
    }

    /// Facet selections narrowing the buckets of the given aggregation: all
    /// selections except the aggregation's own one
    pub fn aggregation_filters(&self, aggregation_key: &str) -> Vec<&FilterQuery> {
        self.facet_filters
            .iter()
            .filter(|f| f.facet_key != aggregation_key)
            .map(|f| &f.query)
            .collect()
    }

    pub fn selected_values_filter(&self, facet_key: &str) -> Option<&FilterQuery> {
        self.facet_filters
            .iter()
            .find(|f| f.facet_key == facet_key)
            .map(|f| &f.query)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////


////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
