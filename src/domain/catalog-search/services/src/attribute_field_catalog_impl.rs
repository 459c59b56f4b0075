// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::sync::{Arc, RwLock};
use std::time::Instant;

use catalog_search::*;
use internal_error::InternalError;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub struct AttributeFieldCatalogImpl {
    config: Arc<FacetedSearchConfig>,
    attribute_repo: Arc<dyn AttributeRepository>,
    state: RwLock<Option<CachedFields>>,
}

struct CachedFields {
    attribute_fields: Arc<AttributeFieldMap>,
    document_schema: Arc<DocumentSchema>,
    computed_at: Instant,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[dill::component(pub)]
#[dill::scope(dill::Singleton)]
#[dill::interface(dyn AttributeFieldCatalog)]
impl AttributeFieldCatalogImpl {
    pub fn new(
        config: Arc<FacetedSearchConfig>,
        attribute_repo: Arc<dyn AttributeRepository>,
    ) -> Self {
        Self {
            config,
            attribute_repo,
            state: RwLock::new(None),
        }
    }

    fn cached(&self) -> Option<(Arc<AttributeFieldMap>, Arc<DocumentSchema>)> {
        let state = self.state.read().unwrap();
        let cached = state.as_ref()?;

        if cached.computed_at.elapsed() >= self.config.attribute_fields_ttl() {
            return None;
        }

        Some((
            Arc::clone(&cached.attribute_fields),
            Arc::clone(&cached.document_schema),
        ))
    }

    async fn get_or_compute(
        &self,
    ) -> Result<(Arc<AttributeFieldMap>, Arc<DocumentSchema>), InternalError> {
        if let Some(cached) = self.cached() {
            return Ok(cached);
        }

        // Concurrent misses may compute twice, the results are identical
        let attributes = self.attribute_repo.list_attributes().await?;
        let attribute_fields = Arc::new(AttributeFieldMap::build(&attributes));

        let container = &self.config.attributes_container;
        let document_schema = Arc::new(
            DocumentSchema::product_default(container)
                .with_attribute_fields(container, &attribute_fields),
        );

        tracing::debug!(
            num_attributes = attributes.len(),
            num_attribute_fields = attribute_fields.len(),
            "Derived attribute field types",
        );

        let mut state = self.state.write().unwrap();
        *state = Some(CachedFields {
            attribute_fields: Arc::clone(&attribute_fields),
            document_schema: Arc::clone(&document_schema),
            computed_at: Instant::now(),
        });

        Ok((attribute_fields, document_schema))
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[async_trait::async_trait]
impl AttributeFieldCatalog for AttributeFieldCatalogImpl {
    #[tracing::instrument(level = "debug", skip_all)]
    async fn attribute_fields(&self) -> Result<Arc<AttributeFieldMap>, InternalError> {
        let (attribute_fields, _) = self.get_or_compute().await?;
        Ok(attribute_fields)
    }

    #[tracing::instrument(level = "debug", skip_all)]
    async fn document_schema(&self) -> Result<Arc<DocumentSchema>, InternalError> {
        let (_, document_schema) = self.get_or_compute().await?;
        Ok(document_schema)
    }

    async fn facet_field_choices(&self) -> Result<Vec<FieldChoice>, InternalError> {
        let document_schema = self.document_schema().await?;
        Ok(document_schema.facet_field_choices(&self.config.attributes_container))
    }

    async fn search_field_choices(&self) -> Result<Vec<FieldChoice>, InternalError> {
        let document_schema = self.document_schema().await?;
        Ok(document_schema.list_searchable_fields())
    }

    fn invalidate(&self) {
        tracing::debug!("Invalidating attribute field types");
        *self.state.write().unwrap() = None;
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
