// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::sync::Arc;

use internal_error::InternalError;

use crate::{AttributeFieldMap, DocumentSchema, FieldChoice};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Field types derived from the attribute metadata of the whole catalogue.
/// Derivation scans every attribute, so results are cached.
#[cfg_attr(any(feature = "testing", test), mockall::automock)]
#[async_trait::async_trait]
pub trait AttributeFieldCatalog: Send + Sync {
    async fn attribute_fields(&self) -> Result<Arc<AttributeFieldMap>, InternalError>;

    /// Product document schema with the attributes container expanded
    async fn document_schema(&self) -> Result<Arc<DocumentSchema>, InternalError>;

    /// Facetable fields, tagged by origin
    async fn facet_field_choices(&self) -> Result<Vec<FieldChoice>, InternalError>;

    async fn search_field_choices(&self) -> Result<Vec<FieldChoice>, InternalError>;

    /// Drops cached derivations, the next call recomputes them
    fn invalidate(&self);
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
