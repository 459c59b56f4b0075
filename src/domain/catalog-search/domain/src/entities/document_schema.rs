// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::collections::BTreeMap;

use thiserror::Error;

use crate::{AttributeFieldMap, FieldSpec, IndexFieldType, KEYWORD_SUBFIELD};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MappingFieldType {
    Text,
    Keyword,
    Date,
    Boolean,
    Integer,
    Long,
    Float,
    Double,
    Object,
    Nested,
    Other(String),
}

impl MappingFieldType {
    pub fn parse(s: &str) -> Self {
        match s {
            "text" => Self::Text,
            "keyword" => Self::Keyword,
            "date" => Self::Date,
            "boolean" => Self::Boolean,
            "integer" => Self::Integer,
            "long" => Self::Long,
            "float" => Self::Float,
            "double" => Self::Double,
            "object" => Self::Object,
            "nested" => Self::Nested,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Text => "text",
            Self::Keyword => "keyword",
            Self::Date => "date",
            Self::Boolean => "boolean",
            Self::Integer => "integer",
            Self::Long => "long",
            Self::Float => "float",
            Self::Double => "double",
            Self::Object => "object",
            Self::Nested => "nested",
            Self::Other(s) => s,
        }
    }

    fn is_container(&self) -> bool {
        matches!(self, Self::Object | Self::Nested)
    }
}

impl From<IndexFieldType> for MappingFieldType {
    fn from(value: IndexFieldType) -> Self {
        match value {
            IndexFieldType::Keyword => Self::Keyword,
            IndexFieldType::Text => Self::Text,
            IndexFieldType::Date => Self::Date,
            IndexFieldType::Boolean => Self::Boolean,
            IndexFieldType::Integer => Self::Integer,
            IndexFieldType::Float => Self::Float,
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldMapping {
    pub field_type: MappingFieldType,
    /// Sub-fields indexing the same value differently, e.g. `keyword`
    pub fields: BTreeMap<String, FieldMapping>,
    /// Children of object and nested fields
    pub properties: Vec<(String, FieldMapping)>,
    /// Text field allowing aggregations on its analyzed terms, which is
    /// expensive in memory
    pub raw_aggregatable: bool,
}

impl FieldMapping {
    pub fn of_type(field_type: MappingFieldType) -> Self {
        Self {
            field_type,
            fields: BTreeMap::new(),
            properties: Vec::new(),
            raw_aggregatable: false,
        }
    }

    pub fn text_with_keyword() -> Self {
        let mut mapping = Self::of_type(MappingFieldType::Text);
        mapping.fields.insert(
            KEYWORD_SUBFIELD.to_string(),
            Self::of_type(MappingFieldType::Keyword),
        );
        mapping
    }

    pub fn container(
        field_type: MappingFieldType,
        properties: impl IntoIterator<Item = (String, FieldMapping)>,
    ) -> Self {
        Self {
            properties: properties.into_iter().collect(),
            ..Self::of_type(field_type)
        }
    }

    pub fn from_attribute_spec(spec: &FieldSpec) -> Self {
        if spec.has_keyword_subfield {
            Self::text_with_keyword()
        } else {
            Self::of_type(spec.field_type.into())
        }
    }

    /// Parses one entry of an index mapping document
    pub fn from_json(value: &serde_json::Value) -> Result<Self, InvalidMappingError> {
        let Some(obj) = value.as_object() else {
            return Err(InvalidMappingError::new("field mapping is not an object"));
        };

        let properties = match obj.get("properties") {
            Some(props) => parse_properties(props)?,
            None => Vec::new(),
        };

        let field_type = match obj.get("type") {
            Some(serde_json::Value::String(t)) => MappingFieldType::parse(t),
            Some(_) => return Err(InvalidMappingError::new("field type is not a string")),
            // Fields with properties and no type are implicitly objects
            None if !properties.is_empty() => MappingFieldType::Object,
            None => return Err(InvalidMappingError::new("field type is missing")),
        };

        let mut fields = BTreeMap::new();
        if let Some(subfields) = obj.get("fields") {
            for (name, sub) in parse_properties(subfields)? {
                fields.insert(name, sub);
            }
        }

        Ok(Self {
            field_type,
            fields,
            properties,
            raw_aggregatable: obj
                .get("fielddata")
                .and_then(serde_json::Value::as_bool)
                .unwrap_or(false),
        })
    }

    fn keyword_subfield(&self) -> Option<&str> {
        self.fields
            .iter()
            .find(|(_, m)| m.field_type == MappingFieldType::Keyword)
            .map(|(name, _)| name.as_str())
    }

    /// Reference to aggregate on, if the field supports aggregation at all
    fn facet_ref(&self, path: &str) -> Option<String> {
        match self.field_type {
            MappingFieldType::Text => match self.keyword_subfield() {
                Some(sub) => Some(format!("{path}.{sub}")),
                None if self.raw_aggregatable => Some(path.to_string()),
                None => None,
            },
            MappingFieldType::Object | MappingFieldType::Nested => None,
            _ => Some(path.to_string()),
        }
    }
}

fn parse_properties(
    value: &serde_json::Value,
) -> Result<Vec<(String, FieldMapping)>, InvalidMappingError> {
    let Some(obj) = value.as_object() else {
        return Err(InvalidMappingError::new("properties is not an object"));
    };

    obj.iter()
        .map(|(name, m)| {
            FieldMapping::from_json(m)
                .map(|mapping| (name.clone(), mapping))
                .map_err(|e| InvalidMappingError::new(format!("{name}: {}", e.reason)))
        })
        .collect()
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldOrigin {
    Field,
    Attribute,
}

impl std::fmt::Display for FieldOrigin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Field => write!(f, "field"),
            Self::Attribute => write!(f, "attribute"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldChoice {
    pub field_ref: String,
    pub display_label: String,
    pub origin: FieldOrigin,
}

impl FieldChoice {
    fn new(field_ref: String, origin: FieldOrigin) -> Self {
        Self {
            display_label: field_ref.clone(),
            field_ref,
            origin,
        }
    }

    /// Same choice labeled for grouped selection lists, e.g. `[attribute]
    /// attributes.color`
    pub fn tagged(mut self) -> Self {
        self.display_label = format!("[{}] {}", self.origin, self.field_ref);
        self
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Top-level fields of the indexed product document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentSchema {
    fields: Vec<(String, FieldMapping)>,
}

impl DocumentSchema {
    pub fn new(fields: impl IntoIterator<Item = (String, FieldMapping)>) -> Self {
        Self {
            fields: fields.into_iter().collect(),
        }
    }

    /// Accepts either `{"properties": {...}}` or the bare properties object
    pub fn from_mapping_json(value: &serde_json::Value) -> Result<Self, InvalidMappingError> {
        let properties = value.get("properties").unwrap_or(value);
        Ok(Self {
            fields: parse_properties(properties)?,
        })
    }

    /// Schema of the catalogue product document with an empty attributes
    /// container
    pub fn product_default(attributes_container: &str) -> Self {
        use MappingFieldType as T;

        let scalar = |name: &str, t: T| (name.to_string(), FieldMapping::of_type(t));
        let text = |name: &str| (name.to_string(), FieldMapping::text_with_keyword());

        Self::new([
            text("title"),
            text("description"),
            text("slug"),
            text("absolute_url"),
            scalar("upc", T::Keyword),
            scalar("is_public", T::Boolean),
            scalar("is_discountable", T::Boolean),
            scalar("is_available", T::Boolean),
            scalar("rating", T::Float),
            scalar("price", T::Double),
            scalar("num_in_stock", T::Integer),
            scalar("parent_id", T::Integer),
            scalar("date_created", T::Date),
            scalar("date_updated", T::Date),
            (
                "categories".to_string(),
                FieldMapping::container(
                    T::Nested,
                    [
                        scalar("id", T::Integer),
                        text("name"),
                        text("description"),
                    ],
                ),
            ),
            (
                attributes_container.to_string(),
                FieldMapping::container(T::Object, []),
            ),
        ])
    }

    /// Replaces the children of the attributes container with one field per
    /// attribute code, adding the container when the schema lacks it
    pub fn with_attribute_fields(
        mut self,
        attributes_container: &str,
        attribute_fields: &AttributeFieldMap,
    ) -> Self {
        let properties: Vec<_> = attribute_fields
            .iter()
            .map(|(code, spec)| (code.to_string(), FieldMapping::from_attribute_spec(spec)))
            .collect();

        if let Some((_, container)) = self
            .fields
            .iter_mut()
            .find(|(name, _)| name == attributes_container)
        {
            container.properties = properties;
        } else {
            self.fields.push((
                attributes_container.to_string(),
                FieldMapping::container(MappingFieldType::Object, properties),
            ));
        }
        self
    }

    pub fn fields(&self) -> &[(String, FieldMapping)] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&FieldMapping> {
        self.fields.iter().find(|(n, _)| n == name).map(|(_, m)| m)
    }

    /// Field references a facet can aggregate on. Containers are skipped,
    /// except the attributes container whose children are expanded.
    pub fn list_facetable_fields(&self, attributes_container: &str) -> Vec<FieldChoice> {
        let mut choices = Vec::new();

        for (name, mapping) in &self.fields {
            if name == attributes_container && mapping.field_type.is_container() {
                for (code, child) in &mapping.properties {
                    let path = format!("{name}.{code}");
                    if let Some(field_ref) = child.facet_ref(&path) {
                        choices.push(FieldChoice::new(field_ref, FieldOrigin::Attribute));
                    }
                }
                continue;
            }

            match mapping.facet_ref(name) {
                Some(field_ref) => choices.push(FieldChoice::new(field_ref, FieldOrigin::Field)),
                None => {
                    tracing::trace!(
                        field = %name,
                        field_type = %mapping.field_type.as_str(),
                        "Field is not facetable",
                    );
                }
            }
        }

        choices
    }

    /// Top-level text and keyword fields usable for full-text matching
    pub fn list_searchable_fields(&self) -> Vec<FieldChoice> {
        self.fields
            .iter()
            .filter(|(_, m)| {
                matches!(m.field_type, MappingFieldType::Text | MappingFieldType::Keyword)
            })
            .map(|(name, _)| FieldChoice::new(name.clone(), FieldOrigin::Field))
            .collect()
    }

    /// Facetable fields labeled by origin for selection lists
    pub fn facet_field_choices(&self, attributes_container: &str) -> Vec<FieldChoice> {
        self.list_facetable_fields(attributes_container)
            .into_iter()
            .map(FieldChoice::tagged)
            .collect()
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid index mapping: {reason}")]
pub struct InvalidMappingError {
    pub reason: String,
}

impl InvalidMappingError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////


////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
