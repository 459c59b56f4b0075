// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::collections::BTreeSet;

use internal_error::InternalError;
use thiserror::Error;

use crate::{
    CategoryId,
    DeleteConfigurationRecordError,
    FacetCompileError,
    FacetDefinition,
    FacetDefinitionId,
    FacetType,
    InvalidSearchFieldError,
    RangeSpecValidationError,
    RangeValueType,
    SearchFieldDefinition,
    SearchFieldDefinitionId,
};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Create, update and delete operations over the search configuration.
/// Every successful mutation is announced to configuration consumers.
#[cfg_attr(any(feature = "testing", test), mockall::automock)]
#[async_trait::async_trait]
pub trait SearchConfigurationMutations: Send + Sync {
    async fn save_facet(&self, req: SaveFacetRequest) -> Result<FacetDefinition, SaveFacetError>;

    async fn delete_facet(&self, id: FacetDefinitionId) -> Result<(), DeleteConfigurationError>;

    async fn save_search_field(
        &self,
        definition: SearchFieldDefinition,
    ) -> Result<SearchFieldDefinition, SaveSearchFieldError>;

    async fn delete_search_field(
        &self,
        id: SearchFieldDefinitionId,
    ) -> Result<(), DeleteConfigurationError>;
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Facet as edited by an operator, ranges still in their textual form
#[derive(Debug, Clone)]
pub struct SaveFacetRequest {
    pub id: FacetDefinitionId,
    pub field: String,
    pub facet_type: FacetType,
    pub label: String,
    pub size: u32,
    pub formatter: Option<String>,
    pub range_spec: String,
    pub range_value_type: RangeValueType,
    pub order: u32,
    pub enabled_categories: BTreeSet<CategoryId>,
    pub disabled_categories: BTreeSet<CategoryId>,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Error, Debug)]
pub enum SaveFacetError {
    #[error("Field '{field}' cannot be used for facets")]
    NotFacetable { field: String },

    #[error(transparent)]
    InvalidRanges(#[from] RangeSpecValidationError),

    #[error(transparent)]
    InvalidFacet(#[from] FacetCompileError),

    #[error(transparent)]
    Internal(#[from] InternalError),
}

#[derive(Error, Debug)]
pub enum SaveSearchFieldError {
    #[error("Field '{field}' cannot be used for full-text search")]
    NotSearchable { field: String },

    #[error(transparent)]
    Invalid(#[from] InvalidSearchFieldError),

    #[error(transparent)]
    Internal(#[from] InternalError),
}

#[derive(Error, Debug)]
pub enum DeleteConfigurationError {
    #[error(transparent)]
    NotFound(#[from] ConfigurationRecordNotFoundError),

    #[error(transparent)]
    Internal(#[from] InternalError),
}

impl From<DeleteConfigurationRecordError> for DeleteConfigurationError {
    fn from(value: DeleteConfigurationRecordError) -> Self {
        match value {
            DeleteConfigurationRecordError::NotFound(e) => Self::NotFound(e),
            DeleteConfigurationRecordError::Internal(e) => Self::Internal(e),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Configuration record {kind} '{id}' not found")]
pub struct ConfigurationRecordNotFoundError {
    pub kind: &'static str,
    pub id: u64,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
