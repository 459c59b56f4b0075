// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub const KEYWORD_SUBFIELD: &str = "keyword";

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Declared type of a product attribute, as configured in the catalogue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeType {
    Text,
    Richtext,
    Option,
    MultiOption,
    Date,
    Datetime,
    Boolean,
    Integer,
    Float,
    /// File, image, entity and anything added to the catalogue later
    #[serde(other)]
    Unrecognized,
}

impl AttributeType {
    pub fn from_code(code: &str) -> Self {
        match code {
            "text" => Self::Text,
            "richtext" => Self::Richtext,
            "option" => Self::Option,
            "multi_option" => Self::MultiOption,
            "date" => Self::Date,
            "datetime" => Self::Datetime,
            "boolean" => Self::Boolean,
            "integer" => Self::Integer,
            "float" => Self::Float,
            _ => Self::Unrecognized,
        }
    }

    /// Maps the attribute type onto the search index field type
    pub fn resolve(self) -> IndexFieldType {
        match self {
            Self::Text | Self::Option | Self::MultiOption | Self::Unrecognized => {
                IndexFieldType::Keyword
            }
            Self::Richtext => IndexFieldType::Text,
            Self::Date | Self::Datetime => IndexFieldType::Date,
            Self::Boolean => IndexFieldType::Boolean,
            Self::Integer => IndexFieldType::Integer,
            Self::Float => IndexFieldType::Float,
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndexFieldType {
    Keyword,
    Text,
    Date,
    Boolean,
    Integer,
    Float,
}

impl IndexFieldType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Keyword => "keyword",
            Self::Text => "text",
            Self::Date => "date",
            Self::Boolean => "boolean",
            Self::Integer => "integer",
            Self::Float => "float",
        }
    }
}

impl std::fmt::Display for IndexFieldType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    pub code: String,
    pub name: String,
    pub attribute_type: AttributeType,
}

impl Attribute {
    pub fn new(code: impl Into<String>, name: impl Into<String>, attribute_type: AttributeType) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            attribute_type,
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub field_type: IndexFieldType,
    pub has_keyword_subfield: bool,
}

impl FieldSpec {
    pub fn of_type(field_type: IndexFieldType) -> Self {
        Self {
            field_type,
            // Text fields cannot be aggregated directly
            has_keyword_subfield: field_type == IndexFieldType::Text,
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Index field types of all attribute codes observed in the catalogue.
///
/// When one code is declared with different types by different attributes,
/// the entry is coerced to `keyword`, the only type every value can be
/// indexed and aggregated as. Coercion is sticky: a later attribute never
/// turns the entry back into something else, so the resulting map does not
/// depend on the order in which attributes are visited.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributeFieldMap {
    fields: BTreeMap<String, FieldSpec>,
}

impl AttributeFieldMap {
    pub fn build<'a>(attributes: impl IntoIterator<Item = &'a Attribute>) -> Self {
        let mut fields: BTreeMap<String, FieldSpec> = BTreeMap::new();

        for attribute in attributes {
            let resolved = attribute.attribute_type.resolve();

            match fields.get_mut(&attribute.code) {
                None => {
                    fields.insert(attribute.code.clone(), FieldSpec::of_type(resolved));
                }
                Some(existing) if existing.field_type != resolved => {
                    tracing::debug!(
                        attribute_code = %attribute.code,
                        existing_type = %existing.field_type,
                        conflicting_type = %resolved,
                        "Conflicting attribute types, falling back to keyword",
                    );
                    *existing = FieldSpec::of_type(IndexFieldType::Keyword);
                }
                Some(_) => {}
            }
        }

        Self { fields }
    }

    pub fn get(&self, code: &str) -> Option<&FieldSpec> {
        self.fields.get(code)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldSpec)> {
        self.fields.iter().map(|(code, spec)| (code.as_str(), spec))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Reference usable for aggregations, e.g. `attributes.color` or
    /// `attributes.material.keyword`
    pub fn facet_field_ref(&self, container: &str, code: &str) -> Option<String> {
        self.get(code).map(|spec| {
            if spec.has_keyword_subfield {
                format!("{container}.{code}.{KEYWORD_SUBFIELD}")
            } else {
                format!("{container}.{code}")
            }
        })
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////


////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
