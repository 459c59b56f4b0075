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

/// Engine-neutral filter construct composed into the search query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterQuery {
    Term {
        field: String,
        value: serde_json::Value,
    },

    Terms {
        field: String,
        values: Vec<serde_json::Value>,
    },

    Range {
        field: String,
        #[serde(flatten)]
        bounds: RangeBounds,
    },

    Bool(BoolFilter),

    Nested {
        path: String,
        query: Box<FilterQuery>,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RangeBounds {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gt: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gte: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lt: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lte: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
}

impl RangeBounds {
    fn is_unbounded(&self) -> bool {
        self.gt.is_none() && self.gte.is_none() && self.lt.is_none() && self.lte.is_none()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoolFilter {
    pub must: Vec<FilterQuery>,
    pub should: Vec<FilterQuery>,
    pub must_not: Vec<FilterQuery>,
    pub filter: Vec<FilterQuery>,
}

impl BoolFilter {
    fn is_empty(&self) -> bool {
        self.must.is_empty()
            && self.should.is_empty()
            && self.must_not.is_empty()
            && self.filter.is_empty()
    }

    fn clauses(&self) -> impl Iterator<Item = &FilterQuery> {
        self.must
            .iter()
            .chain(&self.should)
            .chain(&self.must_not)
            .chain(&self.filter)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

impl FilterQuery {
    pub fn term(field: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        Self::Term {
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn terms<V>(field: impl Into<String>, values: impl IntoIterator<Item = V>) -> Self
    where
        V: Into<serde_json::Value>,
    {
        Self::Terms {
            field: field.into(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    pub fn range(field: impl Into<String>, bounds: RangeBounds) -> Self {
        Self::Range {
            field: field.into(),
            bounds,
        }
    }

    pub fn nested(path: impl Into<String>, query: FilterQuery) -> Self {
        Self::Nested {
            path: path.into(),
            query: Box::new(query),
        }
    }

    /// Matches when any of the clauses matches. A single clause is returned
    /// as is.
    pub fn any_of(mut clauses: Vec<FilterQuery>) -> Self {
        if clauses.len() == 1 {
            return clauses.remove(0);
        }
        Self::Bool(BoolFilter {
            should: clauses,
            ..Default::default()
        })
    }

    /// Rejects constructs the search index would refuse or silently ignore
    pub fn validate(&self) -> Result<(), MalformedFilterQueryError> {
        match self {
            Self::Term { field, value } => {
                check_field(field)?;
                if !is_scalar(value) {
                    return Err(MalformedFilterQueryError::new(format!(
                        "term on '{field}' requires a scalar value"
                    )));
                }
            }
            Self::Terms { field, values } => {
                check_field(field)?;
                if values.is_empty() {
                    return Err(MalformedFilterQueryError::new(format!(
                        "terms on '{field}' requires at least one value"
                    )));
                }
                if !values.iter().all(is_scalar) {
                    return Err(MalformedFilterQueryError::new(format!(
                        "terms on '{field}' accepts scalar values only"
                    )));
                }
            }
            Self::Range { field, bounds } => {
                check_field(field)?;
                if bounds.is_unbounded() {
                    return Err(MalformedFilterQueryError::new(format!(
                        "range on '{field}' has no bounds"
                    )));
                }
                if (bounds.gt.is_some() && bounds.gte.is_some())
                    || (bounds.lt.is_some() && bounds.lte.is_some())
                {
                    return Err(MalformedFilterQueryError::new(format!(
                        "range on '{field}' mixes exclusive and inclusive bounds on one side"
                    )));
                }
            }
            Self::Bool(bool_filter) => {
                if bool_filter.is_empty() {
                    return Err(MalformedFilterQueryError::new("bool query has no clauses"));
                }
                for clause in bool_filter.clauses() {
                    clause.validate()?;
                }
            }
            Self::Nested { path, query } => {
                if path.trim().is_empty() {
                    return Err(MalformedFilterQueryError::new("nested query has no path"));
                }
                query.validate()?;
            }
        }
        Ok(())
    }
}

fn check_field(field: &str) -> Result<(), MalformedFilterQueryError> {
    if field.trim().is_empty() {
        Err(MalformedFilterQueryError::new("field name is empty"))
    } else {
        Ok(())
    }
}

fn is_scalar(value: &serde_json::Value) -> bool {
    matches!(
        value,
        serde_json::Value::String(_) | serde_json::Value::Number(_) | serde_json::Value::Bool(_)
    )
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Malformed filter query: {reason}")]
pub struct MalformedFilterQueryError {
    pub reason: String,
}

impl MalformedFilterQueryError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////


////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
