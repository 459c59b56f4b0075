// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use internal_error::InternalError;

use crate::{CategoryId, FacetForm, FacetedSearchResponse, FormSubmission, RequestContext};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg_attr(any(feature = "testing", test), mockall::automock)]
#[async_trait::async_trait]
pub trait FacetedSearchService: Send + Sync {
    async fn search(
        &self,
        req: FacetedSearchRequest,
    ) -> Result<FacetedSearchResult, FacetedSearchError>;
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, Default)]
pub struct FacetedSearchRequest {
    pub query: Option<String>,
    pub category_id: Option<CategoryId>,
    /// Raw form parameters: facet selections and filter-only fields
    pub submission: FormSubmission,
    /// 1-based
    pub page_number: Option<usize>,
    pub page_size: Option<usize>,
    pub locale: Option<String>,
}

impl FacetedSearchRequest {
    pub fn request_context(&self) -> RequestContext {
        RequestContext {
            query: self.query.clone(),
            category_id: self.category_id,
            locale: self.locale.clone(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct FacetedSearchResult {
    pub response: FacetedSearchResponse,
    /// Form to render next, with choices reflected from the response
    pub form: FacetForm,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, thiserror::Error)]
pub enum FacetedSearchError {
    #[error(transparent)]
    Internal(#[from] InternalError),
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
