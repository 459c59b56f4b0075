// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use internal_error::InternalError;

use crate::{
    ConfigurationRecordNotFoundError,
    FacetDefinition,
    FacetDefinitionId,
    SearchFieldDefinition,
    SearchFieldDefinitionId,
};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Persistent store of operator-edited facet and search field definitions
#[cfg_attr(any(feature = "testing", test), mockall::automock)]
#[async_trait::async_trait]
pub trait SearchConfigurationRepository: Send + Sync {
    async fn list_facets(&self) -> Result<Vec<FacetDefinition>, InternalError>;

    async fn list_search_fields(&self) -> Result<Vec<SearchFieldDefinition>, InternalError>;

    /// Inserts or replaces the record with the same id
    async fn save_facet(&self, facet: &FacetDefinition) -> Result<(), InternalError>;

    async fn delete_facet(
        &self,
        id: FacetDefinitionId,
    ) -> Result<(), DeleteConfigurationRecordError>;

    /// Inserts or replaces the record with the same id
    async fn save_search_field(&self, field: &SearchFieldDefinition) -> Result<(), InternalError>;

    async fn delete_search_field(
        &self,
        id: SearchFieldDefinitionId,
    ) -> Result<(), DeleteConfigurationRecordError>;
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, thiserror::Error)]
pub enum DeleteConfigurationRecordError {
    #[error(transparent)]
    NotFound(#[from] ConfigurationRecordNotFoundError),

    #[error(transparent)]
    Internal(#[from] InternalError),
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
