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

use crate::{FacetFormReflector, FacetedSearch};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[dill::component(pub)]
#[dill::interface(dyn FacetedSearchService)]
pub struct FacetedSearchServiceImpl {
    config: Arc<FacetedSearchConfig>,
    configuration_provider: Arc<dyn SearchConfigurationProvider>,
    index_repo: Arc<dyn SearchIndexRepository>,
    reflector: Arc<FacetFormReflector>,
}

impl FacetedSearchServiceImpl {
    fn new_search(&self, req: &FacetedSearchRequest) -> FacetedSearch {
        let page_size = self.config.effective_page_size(req.page_size);
        let page_number = req.page_number.unwrap_or(1).max(1);

        FacetedSearch::new(
            Arc::clone(&self.index_repo),
            SearchPage::new(page_number, page_size),
        )
    }

    fn apply_default_filters(&self, search: &mut FacetedSearch) {
        for query in &self.config.default_filter_queries {
            if let Err(e) = search.add_default_filter(query.clone()) {
                tracing::warn!(error = %e, "Skipping misconfigured default filter");
            }
        }
    }

    fn apply_category_filter(&self, search: &mut FacetedSearch, category_id: CategoryId) {
        let query = FilterQuery::nested(
            self.config.categories_path.as_str(),
            FilterQuery::term(self.config.category_id_field.as_str(), category_id),
        );

        if let Err(e) = search.add_filter_query(query) {
            tracing::warn!(category_id, error = %e, "Skipping category filter");
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[async_trait::async_trait]
impl FacetedSearchService for FacetedSearchServiceImpl {
    #[tracing::instrument(level = "info", skip_all, fields(query = ?req.query, category_id = ?req.category_id))]
    async fn search(
        &self,
        req: FacetedSearchRequest,
    ) -> Result<FacetedSearchResult, FacetedSearchError> {
        let snapshot = self.configuration_provider.snapshot().await?;

        let mut search = self.new_search(&req);

        search.set_text_query(
            req.query.as_deref().unwrap_or_default(),
            snapshot.text_query_fields(),
        );

        self.apply_default_filters(&mut search);

        if let Some(category_id) = req.category_id {
            self.apply_category_filter(&mut search, category_id);
        }

        for definition in snapshot.facets_for_category(req.category_id) {
            if let Err(e) = search.register_facet(Arc::clone(definition)) {
                tracing::warn!(
                    facet_id = %definition.id,
                    error = %e,
                    "Skipping facet that cannot be registered",
                );
            }
        }

        let mut form = FacetFormReflector::build_form(
            search.facet_definitions(),
            &self.config.range_filter_fields,
        );

        let response = self
            .reflector
            .apply_and_reflect(&mut search, &mut form, &req.submission, &req.request_context())
            .await?;

        tracing::debug!(
            total_hits = response.total_hits,
            num_facets = response.facets.len(),
            "Faceted search complete",
        );

        Ok(FacetedSearchResult { response, form })
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
