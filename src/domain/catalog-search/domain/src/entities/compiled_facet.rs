// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use thiserror::Error;

use crate::{FilterQuery, MalformedFilterQueryError, RangeBounds, RangeOption, RangeValueType};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Aggregation descriptor produced from a facet definition
#[derive(Debug, Clone, PartialEq)]
pub enum CompiledFacet {
    Terms {
        field: String,
        size: u32,
    },
    Range {
        field: String,
        value_type: RangeValueType,
        buckets: Vec<RangeBucketSpec>,
    },
}

/// Half-open `[from, to)` interval, matching range aggregation semantics
#[derive(Debug, Clone, PartialEq)]
pub struct RangeBucketSpec {
    pub key: String,
    pub from: Option<serde_json::Value>,
    pub to: Option<serde_json::Value>,
}

impl RangeBucketSpec {
    pub fn from_option(option: &RangeOption, value_type: RangeValueType) -> Self {
        Self {
            key: option.key(),
            from: option.lower.map(|v| value_type.coerce(v)),
            to: option.upper.map(|v| value_type.coerce(v)),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

impl CompiledFacet {
    pub fn field(&self) -> &str {
        match self {
            Self::Terms { field, .. } | Self::Range { field, .. } => field,
        }
    }

    /// Translates selected bucket keys into a filter restricting results to
    /// documents falling into any of them
    pub fn filter_for(&self, values: &[String]) -> Result<FilterQuery, FilterApplicationError> {
        if values.is_empty() {
            return Err(FilterApplicationError::InvalidFilterValue {
                facet_key: self.field().to_string(),
                value: String::new(),
            });
        }

        match self {
            Self::Terms { field, .. } => {
                Ok(FilterQuery::terms(field.as_str(), values.iter().cloned()))
            }
            Self::Range {
                field,
                value_type,
                buckets,
            } => {
                let mut clauses = Vec::with_capacity(values.len());
                for value in values {
                    let Some(bucket) = buckets.iter().find(|b| &b.key == value) else {
                        return Err(FilterApplicationError::InvalidFilterValue {
                            facet_key: field.clone(),
                            value: value.clone(),
                        });
                    };
                    clauses.push(FilterQuery::range(
                        field.as_str(),
                        RangeBounds {
                            gte: bucket.from.clone(),
                            lt: bucket.to.clone(),
                            format: value_type.format().map(ToString::to_string),
                            ..Default::default()
                        },
                    ));
                }
                Ok(FilterQuery::any_of(clauses))
            }
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Recoverable failure of a single filter; the request proceeds without it
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FilterApplicationError {
    #[error("Unknown facet '{facet_key}'")]
    UnknownFacet { facet_key: String },

    #[error("Value '{value}' is not valid for facet '{facet_key}'")]
    InvalidFilterValue { facet_key: String, value: String },

    #[error(transparent)]
    MalformedFilterQuery(#[from] MalformedFilterQueryError),
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////


////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
