// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use serde::{Deserialize, Serialize};
use thiserror::Error;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct SearchFieldDefinitionId(pub u64);

impl std::fmt::Display for SearchFieldDefinitionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Weighting of one field in the full-text part of the query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchFieldDefinition {
    pub id: SearchFieldDefinitionId,
    pub field: String,
    #[serde(default = "default_boost")]
    pub boost: f32,
    #[serde(default)]
    pub disabled: bool,
}

fn default_boost() -> f32 {
    1.0
}

impl SearchFieldDefinition {
    pub fn new(id: u64, field: impl Into<String>, boost: f32) -> Self {
        Self {
            id: SearchFieldDefinitionId(id),
            field: field.into(),
            boost,
            disabled: false,
        }
    }

    pub fn validate(&self) -> Result<(), InvalidSearchFieldError> {
        if self.field.trim().is_empty() {
            return Err(InvalidSearchFieldError::EmptyField);
        }
        if !self.boost.is_finite() || self.boost < 0.0 {
            return Err(InvalidSearchFieldError::InvalidBoost {
                field: self.field.clone(),
                boost: self.boost,
            });
        }
        Ok(())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, PartialEq)]
pub struct WeightedField {
    pub field: String,
    pub boost: f32,
}

/// Fields taking part in full-text matching. Disabled definitions are left
/// out entirely regardless of their boost.
pub fn weighted_fields<'a>(
    definitions: impl IntoIterator<Item = &'a SearchFieldDefinition>,
) -> Vec<WeightedField> {
    definitions
        .into_iter()
        .filter(|d| !d.disabled)
        .map(|d| WeightedField {
            field: d.field.clone(),
            boost: d.boost,
        })
        .collect()
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Error, Debug, Clone, PartialEq)]
pub enum InvalidSearchFieldError {
    #[error("Search field name is empty")]
    EmptyField,

    #[error("Boost of search field '{field}' must be a non-negative number, got {boost}")]
    InvalidBoost { field: String, boost: f32 },
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////


////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
