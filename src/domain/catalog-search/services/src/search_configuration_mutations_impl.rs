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
use internal_error::InternalError;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[dill::component(pub)]
#[dill::interface(dyn SearchConfigurationMutations)]
pub struct SearchConfigurationMutationsImpl {
    configuration_repo: Arc<dyn SearchConfigurationRepository>,
    attribute_field_catalog: Arc<dyn AttributeFieldCatalog>,
    message_consumers: Vec<Arc<dyn SearchConfigurationMessageConsumer>>,
}

impl SearchConfigurationMutationsImpl {
    async fn is_facetable(&self, field: &str) -> Result<bool, InternalError> {
        let choices = self.attribute_field_catalog.facet_field_choices().await?;
        Ok(choices.iter().any(|c| c.field_ref == field))
    }

    async fn is_searchable(&self, field: &str) -> Result<bool, InternalError> {
        let choices = self.attribute_field_catalog.search_field_choices().await?;
        Ok(choices.iter().any(|c| c.field_ref == field))
    }

    fn facet_from_request(req: SaveFacetRequest) -> Result<FacetDefinition, SaveFacetError> {
        let ranges = match req.facet_type {
            FacetType::Range => parse_range_spec(&req.range_spec)?,
            _ => Vec::new(),
        };

        let definition = FacetDefinition {
            id: req.id,
            field: req.field,
            facet_type: req.facet_type,
            label: req.label.trim().to_string(),
            size: req.size,
            formatter: req.formatter.filter(|name| !name.trim().is_empty()),
            ranges,
            range_value_type: req.range_value_type,
            order: req.order,
            enabled_categories: req.enabled_categories,
            disabled_categories: req.disabled_categories,
        };

        // Rejects unsupported types and range facets without ranges
        definition.compile()?;

        Ok(definition)
    }

    /// Consumer failures are logged and do not fail the mutation
    async fn dispatch(&self, message: SearchConfigurationMessage) {
        for consumer in &self.message_consumers {
            if let Err(e) = consumer.consume_message(&message).await {
                tracing::warn!(
                    consumer = consumer.consumer_name(),
                    ?message,
                    error = ?e,
                    "Search configuration consumer failed",
                );
            }
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[async_trait::async_trait]
impl SearchConfigurationMutations for SearchConfigurationMutationsImpl {
    #[tracing::instrument(level = "info", skip_all, fields(id = %req.id, field = %req.field))]
    async fn save_facet(&self, req: SaveFacetRequest) -> Result<FacetDefinition, SaveFacetError> {
        if !self.is_facetable(&req.field).await? {
            return Err(SaveFacetError::NotFacetable { field: req.field });
        }

        let definition = Self::facet_from_request(req)?;
        self.configuration_repo.save_facet(&definition).await?;

        self.dispatch(SearchConfigurationMessage::FacetSaved(definition.id))
            .await;

        Ok(definition)
    }

    #[tracing::instrument(level = "info", skip_all, fields(%id))]
    async fn delete_facet(&self, id: FacetDefinitionId) -> Result<(), DeleteConfigurationError> {
        self.configuration_repo
            .delete_facet(id)
            .await?;

        self.dispatch(SearchConfigurationMessage::FacetDeleted(id))
            .await;

        Ok(())
    }

    #[tracing::instrument(level = "info", skip_all, fields(id = %definition.id, field = %definition.field))]
    async fn save_search_field(
        &self,
        definition: SearchFieldDefinition,
    ) -> Result<SearchFieldDefinition, SaveSearchFieldError> {
        definition.validate()?;

        if !self.is_searchable(&definition.field).await? {
            return Err(SaveSearchFieldError::NotSearchable {
                field: definition.field,
            });
        }

        self.configuration_repo
            .save_search_field(&definition)
            .await?;

        self.dispatch(SearchConfigurationMessage::SearchFieldSaved(definition.id))
            .await;

        Ok(definition)
    }

    #[tracing::instrument(level = "info", skip_all, fields(%id))]
    async fn delete_search_field(
        &self,
        id: SearchFieldDefinitionId,
    ) -> Result<(), DeleteConfigurationError> {
        self.configuration_repo
            .delete_search_field(id)
            .await?;

        self.dispatch(SearchConfigurationMessage::SearchFieldDeleted(id))
            .await;

        Ok(())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
