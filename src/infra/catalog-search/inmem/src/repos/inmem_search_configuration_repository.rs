// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use dill::*;
use internal_error::InternalError;

use crate::domain::*;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub struct InMemorySearchConfigurationRepository {
    state: Arc<Mutex<State>>,
}

#[derive(Default)]
struct State {
    facets_by_id: BTreeMap<FacetDefinitionId, FacetDefinition>,
    search_fields_by_id: BTreeMap<SearchFieldDefinitionId, SearchFieldDefinition>,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[component(pub)]
#[interface(dyn SearchConfigurationRepository)]
#[scope(Singleton)]
impl InMemorySearchConfigurationRepository {
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(State::default())),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[async_trait::async_trait]
impl SearchConfigurationRepository for InMemorySearchConfigurationRepository {
    async fn list_facets(&self) -> Result<Vec<FacetDefinition>, InternalError> {
        let guard = self.state.lock().unwrap();
        Ok(guard.facets_by_id.values().cloned().collect())
    }

    async fn list_search_fields(&self) -> Result<Vec<SearchFieldDefinition>, InternalError> {
        let guard = self.state.lock().unwrap();
        Ok(guard.search_fields_by_id.values().cloned().collect())
    }

    async fn save_facet(&self, facet: &FacetDefinition) -> Result<(), InternalError> {
        let mut guard = self.state.lock().unwrap();
        guard.facets_by_id.insert(facet.id, facet.clone());
        Ok(())
    }

    async fn delete_facet(
        &self,
        id: FacetDefinitionId,
    ) -> Result<(), DeleteConfigurationRecordError> {
        let mut guard = self.state.lock().unwrap();
        if guard.facets_by_id.remove(&id).is_none() {
            return Err(ConfigurationRecordNotFoundError {
                kind: "facet",
                id: id.0,
            }
            .into());
        }
        Ok(())
    }

    async fn save_search_field(&self, field: &SearchFieldDefinition) -> Result<(), InternalError> {
        let mut guard = self.state.lock().unwrap();
        guard.search_fields_by_id.insert(field.id, field.clone());
        Ok(())
    }

    async fn delete_search_field(
        &self,
        id: SearchFieldDefinitionId,
    ) -> Result<(), DeleteConfigurationRecordError> {
        let mut guard = self.state.lock().unwrap();
        if guard.search_fields_by_id.remove(&id).is_none() {
            return Err(ConfigurationRecordNotFoundError {
                kind: "search field",
                id: id.0,
            }
            .into());
        }
        Ok(())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
