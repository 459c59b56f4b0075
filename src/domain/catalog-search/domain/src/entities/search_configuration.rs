// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::sync::Arc;

use crate::{CategoryId, FacetDefinition, SearchFieldDefinition, WeightedField, weighted_fields};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Immutable view of the operator configuration used by one search request
#[derive(Debug, Clone, Default)]
pub struct SearchConfigurationSnapshot {
    facets: Vec<Arc<FacetDefinition>>,
    search_fields: Vec<SearchFieldDefinition>,
}

impl SearchConfigurationSnapshot {
    pub fn new(
        facets: impl IntoIterator<Item = FacetDefinition>,
        search_fields: impl IntoIterator<Item = SearchFieldDefinition>,
    ) -> Self {
        let mut facets: Vec<_> = facets.into_iter().map(Arc::new).collect();
        facets.sort_by_key(|f| (f.order, f.id));

        Self {
            facets,
            search_fields: search_fields.into_iter().collect(),
        }
    }

    /// All facets in display order
    pub fn facets(&self) -> &[Arc<FacetDefinition>] {
        &self.facets
    }

    pub fn facets_for_category(
        &self,
        category: Option<CategoryId>,
    ) -> impl Iterator<Item = &Arc<FacetDefinition>> {
        self.facets
            .iter()
            .filter(move |f| f.applies_to_category(category))
    }

    pub fn facet_by_key(&self, key: &str) -> Option<&Arc<FacetDefinition>> {
        self.facets.iter().find(|f| f.key() == key)
    }

    pub fn search_fields(&self) -> &[SearchFieldDefinition] {
        &self.search_fields
    }

    pub fn text_query_fields(&self) -> Vec<WeightedField> {
        weighted_fields(&self.search_fields)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////


////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
