// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

use catalog_search::*;
use internal_error::InternalError;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Keeps the last loaded configuration snapshot until a configuration
/// message arrives.
///
/// A load that overlaps an invalidation is returned to its caller but never
/// cached.
pub struct SearchConfigurationCache {
    configuration_repo: Arc<dyn SearchConfigurationRepository>,
    state: RwLock<Option<Arc<SearchConfigurationSnapshot>>>,
    generation: AtomicU64,
}

#[dill::component(pub)]
#[dill::scope(dill::Singleton)]
#[dill::interface(dyn SearchConfigurationProvider)]
#[dill::interface(dyn SearchConfigurationMessageConsumer)]
impl SearchConfigurationCache {
    pub fn new(configuration_repo: Arc<dyn SearchConfigurationRepository>) -> Self {
        Self {
            configuration_repo,
            state: RwLock::new(None),
            generation: AtomicU64::new(0),
        }
    }

    async fn load(&self) -> Result<SearchConfigurationSnapshot, InternalError> {
        let facets = self.configuration_repo.list_facets().await?;
        let search_fields = self.configuration_repo.list_search_fields().await?;

        tracing::debug!(
            num_facets = facets.len(),
            num_search_fields = search_fields.len(),
            "Loaded search configuration",
        );

        Ok(SearchConfigurationSnapshot::new(facets, search_fields))
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[async_trait::async_trait]
impl SearchConfigurationProvider for SearchConfigurationCache {
    #[tracing::instrument(level = "debug", skip_all)]
    async fn snapshot(&self) -> Result<Arc<SearchConfigurationSnapshot>, InternalError> {
        let cached = self.state.read().unwrap().clone();
        if let Some(snapshot) = cached {
            return Ok(snapshot);
        }

        let generation = self.generation.load(Ordering::Acquire);
        let snapshot = Arc::new(self.load().await?);

        let mut state = self.state.write().unwrap();
        if self.generation.load(Ordering::Acquire) == generation {
            *state = Some(Arc::clone(&snapshot));
        } else {
            tracing::debug!("Configuration changed during load, snapshot not cached");
        }

        Ok(snapshot)
    }

    fn invalidate(&self) {
        let mut state = self.state.write().unwrap();
        self.generation.fetch_add(1, Ordering::AcqRel);
        *state = None;
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[async_trait::async_trait]
impl SearchConfigurationMessageConsumer for SearchConfigurationCache {
    fn consumer_name(&self) -> &'static str {
        "SearchConfigurationCache"
    }

    async fn consume_message(
        &self,
        message: &SearchConfigurationMessage,
    ) -> Result<(), InternalError> {
        tracing::debug!(?message, "Evicting cached search configuration");
        SearchConfigurationProvider::invalidate(self);
        Ok(())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
