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

use crate::{FacetDefinition, FacetType, FilterApplicationError, FilterQuery, RangeBounds};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Submitted form values by parameter name
pub type FormSubmission = BTreeMap<String, Vec<String>>;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormFieldKind {
    TermFacet,
    RangeFacet,
    FilterOnly,
}

/// Client-visible field of the search form
#[derive(Debug, Clone, PartialEq)]
pub enum FormField {
    TermFacet(FacetFormField),
    RangeFacet(FacetFormField),
    FilterOnly(RangeFilterField),
}

impl FormField {
    /// Returns `None` for definitions whose type cannot be rendered
    pub fn for_facet(definition: Arc<FacetDefinition>) -> Option<Self> {
        match definition.facet_type {
            FacetType::Term => Some(Self::TermFacet(FacetFormField::new(definition))),
            FacetType::Range => Some(Self::RangeFacet(FacetFormField::new(definition))),
            FacetType::Unsupported(_) => None,
        }
    }

    pub fn kind(&self) -> FormFieldKind {
        match self {
            Self::TermFacet(_) => FormFieldKind::TermFacet,
            Self::RangeFacet(_) => FormFieldKind::RangeFacet,
            Self::FilterOnly(_) => FormFieldKind::FilterOnly,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::TermFacet(f) | Self::RangeFacet(f) => &f.name,
            Self::FilterOnly(f) => &f.name,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::TermFacet(f) | Self::RangeFacet(f) => &f.label,
            Self::FilterOnly(f) => &f.label,
        }
    }

    pub fn as_facet(&self) -> Option<&FacetFormField> {
        match self {
            Self::TermFacet(f) | Self::RangeFacet(f) => Some(f),
            Self::FilterOnly(_) => None,
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, PartialEq)]
pub struct FacetFormField {
    /// Submitted parameter name, equal to the facet key
    pub name: String,
    pub label: String,
    /// Key of the facet in the search response
    pub es_field: String,
    pub definition: Arc<FacetDefinition>,
    pub selected: Vec<String>,
    pub choices: Vec<FormChoice>,
}

impl FacetFormField {
    pub fn new(definition: Arc<FacetDefinition>) -> Self {
        Self {
            name: definition.key().to_string(),
            label: definition.display_label().to_string(),
            es_field: definition.key().to_string(),
            definition,
            selected: Vec::new(),
            choices: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormChoice {
    pub value: String,
    pub label: String,
    pub doc_count: u64,
    pub selected: bool,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Numeric filter without aggregation, submitted as two optional
/// parameters `<name>_min` and `<name>_max`. Both bounds are exclusive.
#[derive(Debug, Clone, PartialEq)]
pub struct RangeFilterField {
    pub name: String,
    pub label: String,
    pub field: String,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl RangeFilterField {
    pub fn new(name: impl Into<String>, label: impl Into<String>, field: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            field: field.into(),
            min: None,
            max: None,
        }
    }

    pub fn min_param(&self) -> String {
        format!("{}_min", self.name)
    }

    pub fn max_param(&self) -> String {
        format!("{}_max", self.name)
    }

    /// Reads the bounds from the submission. Blank values are ignored.
    pub fn bind(&mut self, submission: &FormSubmission) -> Result<(), FilterApplicationError> {
        let min = self.read_bound(submission, &self.min_param())?;
        let max = self.read_bound(submission, &self.max_param())?;
        self.min = min;
        self.max = max;
        Ok(())
    }

    fn read_bound(
        &self,
        submission: &FormSubmission,
        param: &str,
    ) -> Result<Option<f64>, FilterApplicationError> {
        let Some(raw) = submission
            .get(param)
            .and_then(|values| values.first())
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
        else {
            return Ok(None);
        };

        match raw.parse::<f64>() {
            Ok(value) if value.is_finite() => Ok(Some(value)),
            _ => Err(FilterApplicationError::InvalidFilterValue {
                facet_key: param.to_string(),
                value: raw.to_string(),
            }),
        }
    }

    /// `None` when neither bound is set
    pub fn to_query(&self) -> Option<FilterQuery> {
        if self.min.is_none() && self.max.is_none() {
            return None;
        }

        Some(FilterQuery::range(
            self.field.as_str(),
            RangeBounds {
                gt: self.min.map(serde_json::Value::from),
                lt: self.max.map(serde_json::Value::from),
                ..Default::default()
            },
        ))
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Search form rendered alongside results
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FacetForm {
    pub fields: Vec<FormField>,
}

impl FacetForm {
    pub fn field(&self, name: &str) -> Option<&FormField> {
        self.fields.iter().find(|f| f.name() == name)
    }

    pub fn facet_field(&self, name: &str) -> Option<&FacetFormField> {
        self.field(name).and_then(FormField::as_facet)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////


////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
