// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::collections::BTreeMap;
use std::sync::Arc;

use catalog_search::*;
use internal_error::InternalError;
use thiserror::Error;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FacetedSearchState {
    /// Facets and filters are being assembled
    Configured,
    /// Query reflects the current facets and filters
    Built,
    Executed,
    /// Response was written back onto the form
    Reflected,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

struct RegisteredFacet {
    definition: Arc<FacetDefinition>,
    compiled: CompiledFacet,
}

struct FacetSelection {
    values: Vec<String>,
    query: FilterQuery,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Faceted search over one request.
///
/// The query is assembled only when the search is executed, so filters can
/// be added by several parties after construction. Filter clauses always
/// come in the same order: default filters, dynamic filters, then facet
/// selections in the order facets were registered.
pub struct FacetedSearch {
    index_repo: Arc<dyn SearchIndexRepository>,
    state: FacetedSearchState,
    page: SearchPage,
    text: Option<TextQuery>,
    default_filters: Vec<FilterQuery>,
    dynamic_filters: Vec<FilterQuery>,
    facets: Vec<RegisteredFacet>,
    selections: BTreeMap<String, FacetSelection>,
}

impl FacetedSearch {
    pub fn new(index_repo: Arc<dyn SearchIndexRepository>, page: SearchPage) -> Self {
        Self {
            index_repo,
            state: FacetedSearchState::Configured,
            page,
            text: None,
            default_filters: Vec::new(),
            dynamic_filters: Vec::new(),
            facets: Vec::new(),
            selections: BTreeMap::new(),
        }
    }

    pub fn state(&self) -> FacetedSearchState {
        self.state
    }

    fn touch(&mut self) {
        self.state = FacetedSearchState::Configured;
    }

    /// Blank queries are ignored and the search matches all documents
    pub fn set_text_query(&mut self, query: &str, fields: Vec<WeightedField>) {
        let query = query.trim();
        self.text = (!query.is_empty()).then(|| TextQuery {
            query: query.to_string(),
            fields,
        });
        self.touch();
    }

    pub fn add_default_filter(&mut self, query: FilterQuery) -> Result<(), FilterApplicationError> {
        query.validate()?;
        self.default_filters.push(query);
        self.touch();
        Ok(())
    }

    pub fn add_filter_query(&mut self, query: FilterQuery) -> Result<(), FilterApplicationError> {
        query.validate()?;
        self.dynamic_filters.push(query);
        self.touch();
        Ok(())
    }

    pub fn register_facet(
        &mut self,
        definition: Arc<FacetDefinition>,
    ) -> Result<(), FacetRegistrationError> {
        if self.facet(definition.key()).is_some() {
            return Err(FacetRegistrationError::DuplicateKey {
                facet_key: definition.key().to_string(),
            });
        }

        let compiled = definition.compile()?;
        self.facets.push(RegisteredFacet {
            definition,
            compiled,
        });
        self.touch();
        Ok(())
    }

    pub fn facet_definitions(&self) -> impl Iterator<Item = &Arc<FacetDefinition>> {
        self.facets.iter().map(|f| &f.definition)
    }

    fn facet(&self, facet_key: &str) -> Option<&RegisteredFacet> {
        self.facets.iter().find(|f| f.definition.key() == facet_key)
    }

    /// Restricts results to the given values of a registered facet.
    /// Repeated calls for the same facet accumulate values.
    pub fn add_filter(
        &mut self,
        facet_key: &str,
        values: &[String],
    ) -> Result<(), FilterApplicationError> {
        let Some(facet) = self.facet(facet_key) else {
            return Err(FilterApplicationError::UnknownFacet {
                facet_key: facet_key.to_string(),
            });
        };

        let mut merged = self
            .selections
            .get(facet_key)
            .map(|s| s.values.clone())
            .unwrap_or_default();
        for value in values {
            if !merged.contains(value) {
                merged.push(value.clone());
            }
        }

        let query = facet.compiled.filter_for(&merged)?;
        self.selections.insert(
            facet_key.to_string(),
            FacetSelection {
                values: merged,
                query,
            },
        );
        self.touch();
        Ok(())
    }

    pub fn selected_values(&self, facet_key: &str) -> &[String] {
        self.selections
            .get(facet_key)
            .map(|s| s.values.as_slice())
            .unwrap_or_default()
    }

    /// Assembles the query from the current facets and filters
    pub fn build(&mut self) -> SearchQuery {
        let facet_filters = self
            .facets
            .iter()
            .filter_map(|f| {
                let key = f.definition.key();
                self.selections.get(key).map(|s| FacetFilter {
                    facet_key: key.to_string(),
                    query: s.query.clone(),
                })
            })
            .collect();

        let aggregations = self
            .facets
            .iter()
            .map(|f| FacetAggregation {
                key: f.definition.key().to_string(),
                facet: f.compiled.clone(),
            })
            .collect();

        self.state = FacetedSearchState::Built;

        SearchQuery {
            text: self.text.clone(),
            default_filters: self.default_filters.clone(),
            dynamic_filters: self.dynamic_filters.clone(),
            facet_filters,
            aggregations,
            page: self.page,
        }
    }

    /// Always rebuilds the query before sending it
    #[tracing::instrument(level = "debug", skip_all)]
    pub async fn execute(&mut self) -> Result<FacetedSearchResponse, InternalError> {
        let query = self.build();

        tracing::debug!(
            num_filters = query.filter_clauses().len(),
            num_facets = query.aggregations.len(),
            "Executing faceted search",
        );

        let response = self.index_repo.search(&query).await?;
        self.state = FacetedSearchState::Executed;

        Ok(self.enrich(response))
    }

    pub fn mark_reflected(&mut self) {
        self.state = FacetedSearchState::Reflected;
    }

    /// Pairs returned buckets with the facet definitions that produced them.
    /// Keys without a registered facet are passed through as they are.
    fn enrich(&self, response: IndexSearchResponse) -> FacetedSearchResponse {
        let facets = response
            .facets
            .into_iter()
            .map(|raw| {
                let definition = self.facet(&raw.key).map(|f| Arc::clone(&f.definition));
                if definition.is_none() {
                    tracing::debug!(
                        facet_key = %raw.key,
                        "No facet definition for response buckets, passing through",
                    );
                }

                let selected = self.selected_values(&raw.key);
                let buckets = raw
                    .buckets
                    .into_iter()
                    .map(|b| FacetBucket {
                        selected: selected.contains(&b.key),
                        key: b.key,
                        doc_count: b.doc_count,
                    })
                    .collect();

                FacetResult {
                    key: raw.key,
                    definition,
                    buckets,
                }
            })
            .collect();

        let page_number = if self.page.limit == 0 {
            1
        } else {
            self.page.offset / self.page.limit + 1
        };

        FacetedSearchResponse {
            total_hits: response.total_hits,
            page_number,
            page_size: self.page.limit,
            hits: response.hits,
            facets,
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FacetRegistrationError {
    #[error("Facet '{facet_key}' is already registered")]
    DuplicateKey { facet_key: String },

    #[error(transparent)]
    Compile(#[from] FacetCompileError),
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
