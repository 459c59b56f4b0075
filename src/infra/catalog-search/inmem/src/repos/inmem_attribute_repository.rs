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

/// Product attributes in code order. One code may be declared several times
/// under different names or types, as product classes do.
pub struct InMemoryAttributeRepository {
    state: Arc<Mutex<State>>,
}

#[derive(Default)]
struct State {
    attributes_by_key: BTreeMap<(String, String, AttributeType), Attribute>,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[component(pub)]
#[interface(dyn AttributeRepository)]
#[scope(Singleton)]
impl InMemoryAttributeRepository {
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(State::default())),
        }
    }

    /// Identical declarations are stored once
    pub fn add_attributes(&self, attributes: impl IntoIterator<Item = Attribute>) {
        let mut guard = self.state.lock().unwrap();
        for attribute in attributes {
            guard.attributes_by_key.insert(
                (
                    attribute.code.clone(),
                    attribute.name.clone(),
                    attribute.attribute_type,
                ),
                attribute,
            );
        }
    }

    /// Removes every declaration of the code, returning how many there were
    pub fn remove_attribute(&self, code: &str) -> usize {
        let mut guard = self.state.lock().unwrap();
        let before = guard.attributes_by_key.len();
        guard.attributes_by_key.retain(|(c, _, _), _| c != code);
        before - guard.attributes_by_key.len()
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[async_trait::async_trait]
impl AttributeRepository for InMemoryAttributeRepository {
    async fn list_attributes(&self) -> Result<Vec<Attribute>, InternalError> {
        let guard = self.state.lock().unwrap();
        Ok(guard.attributes_by_key.values().cloned().collect())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
