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

use thiserror::Error;

use crate::CategoryId;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Request attributes visible to label formatters
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    pub query: Option<String>,
    pub category_id: Option<CategoryId>,
    pub locale: Option<String>,
}

/// Produces the label of a facet choice from `(context, bucket_key,
/// doc_count)`
pub type Formatter = Arc<dyn Fn(&RequestContext, &str, u64) -> String + Send + Sync>;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Named label formatters, populated once at startup and read-only after
#[derive(Default)]
pub struct FormatterRegistry {
    formatters: BTreeMap<String, Formatter>,
}

impl FormatterRegistry {
    pub fn builder() -> FormatterRegistryBuilder {
        FormatterRegistryBuilder::default()
    }

    pub fn get(&self, name: &str) -> Option<&Formatter> {
        self.formatters.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.formatters.keys().map(String::as_str)
    }
}

impl std::fmt::Debug for FormatterRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormatterRegistry")
            .field("formatters", &self.formatters.keys().collect::<Vec<_>>())
            .finish()
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Default)]
pub struct FormatterRegistryBuilder {
    formatters: BTreeMap<String, Formatter>,
}

impl FormatterRegistryBuilder {
    /// Fails on a name that is already taken, keeping the earlier
    /// registration
    pub fn register<F>(
        &mut self,
        name: &str,
        formatter: F,
    ) -> Result<(), FormatterRegistrationError>
    where
        F: Fn(&RequestContext, &str, u64) -> String + Send + Sync + 'static,
    {
        if name.trim().is_empty() {
            return Err(FormatterRegistrationError::EmptyName);
        }
        if self.formatters.contains_key(name) {
            return Err(FormatterRegistrationError::DuplicateName {
                name: name.to_string(),
            });
        }

        tracing::debug!(formatter = %name, "Registering facet label formatter");
        self.formatters.insert(name.to_string(), Arc::new(formatter));
        Ok(())
    }

    pub fn with<F>(mut self, name: &str, formatter: F) -> Result<Self, FormatterRegistrationError>
    where
        F: Fn(&RequestContext, &str, u64) -> String + Send + Sync + 'static,
    {
        self.register(name, formatter)?;
        Ok(self)
    }

    pub fn build(self) -> FormatterRegistry {
        FormatterRegistry {
            formatters: self.formatters,
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatterRegistrationError {
    #[error("Formatter '{name}' is already registered")]
    DuplicateName { name: String },

    #[error("Formatter name is empty")]
    EmptyName,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////


////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
