// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{CompiledFacet, RangeBucketSpec, RangeOption, RangeValueType};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub const DEFAULT_FACET_SIZE: u32 = 10;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct FacetDefinitionId(pub u64);

impl std::fmt::Display for FacetDefinitionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

pub type CategoryId = u64;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FacetType {
    Term,
    Range,
    /// Stored type this version does not know how to compile
    #[serde(untagged)]
    Unsupported(String),
}

impl std::fmt::Display for FacetType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Term => write!(f, "term"),
            Self::Range => write!(f, "range"),
            Self::Unsupported(s) => write!(f, "{s}"),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Operator-configured facet over one field of the product document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FacetDefinition {
    pub id: FacetDefinitionId,
    pub field: String,
    pub facet_type: FacetType,
    #[serde(default)]
    pub label: String,
    #[serde(default = "default_facet_size")]
    pub size: u32,
    #[serde(default)]
    pub formatter: Option<String>,
    #[serde(default)]
    pub ranges: Vec<RangeOption>,
    #[serde(default)]
    pub range_value_type: RangeValueType,
    #[serde(default)]
    pub order: u32,
    #[serde(default)]
    pub enabled_categories: BTreeSet<CategoryId>,
    #[serde(default)]
    pub disabled_categories: BTreeSet<CategoryId>,
}

fn default_facet_size() -> u32 {
    DEFAULT_FACET_SIZE
}

impl FacetDefinition {
    pub fn term(id: u64, field: impl Into<String>) -> Self {
        Self {
            id: FacetDefinitionId(id),
            field: field.into(),
            facet_type: FacetType::Term,
            label: String::new(),
            size: DEFAULT_FACET_SIZE,
            formatter: None,
            ranges: Vec::new(),
            range_value_type: RangeValueType::default(),
            order: 0,
            enabled_categories: BTreeSet::new(),
            disabled_categories: BTreeSet::new(),
        }
    }

    pub fn range(
        id: u64,
        field: impl Into<String>,
        value_type: RangeValueType,
        ranges: Vec<RangeOption>,
    ) -> Self {
        Self {
            facet_type: FacetType::Range,
            ranges,
            range_value_type: value_type,
            ..Self::term(id, field)
        }
    }

    /// Key under which the facet appears in queries and responses
    pub fn key(&self) -> &str {
        &self.field
    }

    pub fn display_label(&self) -> &str {
        if self.label.trim().is_empty() {
            &self.field
        } else {
            &self.label
        }
    }

    /// Visibility of the facet in a category listing. Without a category
    /// every facet is visible. A category present in both sets is denied.
    pub fn applies_to_category(&self, category: Option<CategoryId>) -> bool {
        let Some(category) = category else {
            return true;
        };

        if self.disabled_categories.contains(&category) {
            return false;
        }

        self.enabled_categories.is_empty() || self.enabled_categories.contains(&category)
    }

    pub fn compile(&self) -> Result<CompiledFacet, FacetCompileError> {
        match &self.facet_type {
            FacetType::Term => Ok(CompiledFacet::Terms {
                field: self.field.clone(),
                size: self.size,
            }),
            FacetType::Range => {
                if self.ranges.is_empty() {
                    return Err(FacetCompileError::NoRanges {
                        field: self.field.clone(),
                    });
                }
                Ok(CompiledFacet::Range {
                    field: self.field.clone(),
                    value_type: self.range_value_type,
                    buckets: self
                        .ranges
                        .iter()
                        .map(|o| RangeBucketSpec::from_option(o, self.range_value_type))
                        .collect(),
                })
            }
            FacetType::Unsupported(facet_type) => Err(UnsupportedFacetTypeError {
                field: self.field.clone(),
                facet_type: facet_type.clone(),
            }
            .into()),
        }
    }

    /// Display label of the range bucket with the given key
    pub fn range_label(&self, bucket_key: &str) -> Option<&str> {
        self.ranges
            .iter()
            .find(|o| o.key() == bucket_key)
            .map(|o| o.label.as_str())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FacetCompileError {
    #[error(transparent)]
    UnsupportedFacetType(#[from] UnsupportedFacetTypeError),

    #[error("Range facet on '{field}' has no ranges configured")]
    NoRanges { field: String },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unsupported facet type '{facet_type}' on field '{field}'")]
pub struct UnsupportedFacetTypeError {
    pub field: String,
    pub facet_type: String,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////


////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
