// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use catalog_search::{DocumentSchema, FieldMapping, MappingFieldType};
use serde_json::{Map, Value, json};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub const TITLE_ANALYZER: &str = "title_analyzer";
pub const DESCRIPTION_ANALYZER: &str = "description_analyzer";
pub const LOWERCASE_NORMALIZER: &str = "lowercase";

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Index creation body for the product document
pub struct ElasticsearchIndexMappings {}

impl ElasticsearchIndexMappings {
    pub fn build_analysis_settings_json() -> Value {
        json!({
            "filter": {
                "ngram_filter": {
                    "type": "ngram",
                    "min_gram": 3,
                    "max_gram": 15,
                }
            },
            "normalizer": {
                LOWERCASE_NORMALIZER: {
                    "type": "custom",
                    "filter": ["lowercase"],
                }
            },
            "analyzer": {
                TITLE_ANALYZER: {
                    "type": "custom",
                    "tokenizer": "standard",
                    "filter": [
                        "lowercase",
                        "asciifolding",
                        "ngram_filter",
                    ],
                },
                DESCRIPTION_ANALYZER: {
                    "type": "custom",
                    "tokenizer": "standard",
                    "filter": [
                        "lowercase",
                        "asciifolding",
                    ],
                },
            }
        })
    }

    pub fn build_settings_json() -> Value {
        json!({
            "number_of_shards": 1,
            "number_of_replicas": 0,
            // Must cover the spread of the ngram filter
            "max_ngram_diff": 15,
            "analysis": Self::build_analysis_settings_json(),
        })
    }

    /// Mappings of a schema that already carries the attribute properties
    pub fn build(schema: &DocumentSchema) -> Value {
        let properties: Map<_, _> = schema
            .fields()
            .iter()
            .map(|(name, mapping)| {
                let mut field = Self::field_json(mapping);
                if let Some(analyzer) = Self::analyzer_for(name, mapping) {
                    field["analyzer"] = json!(analyzer);
                }
                (name.clone(), field)
            })
            .collect();

        json!({
            "settings": Self::build_settings_json(),
            "mappings": {
                "properties": properties,
            }
        })
    }

    fn analyzer_for(name: &str, mapping: &FieldMapping) -> Option<&'static str> {
        if mapping.field_type != MappingFieldType::Text {
            return None;
        }
        match name {
            "title" => Some(TITLE_ANALYZER),
            "description" => Some(DESCRIPTION_ANALYZER),
            _ => None,
        }
    }

    fn field_json(mapping: &FieldMapping) -> Value {
        let mut field = Map::new();
        field.insert("type".to_string(), json!(mapping.field_type.as_str()));

        if mapping.raw_aggregatable {
            field.insert("fielddata".to_string(), json!(true));
        }

        if !mapping.fields.is_empty() {
            let fields: Map<_, _> = mapping
                .fields
                .iter()
                .map(|(name, sub)| (name.clone(), Self::field_json(sub)))
                .collect();
            field.insert("fields".to_string(), Value::Object(fields));
        }

        if !mapping.properties.is_empty() {
            let properties: Map<_, _> = mapping
                .properties
                .iter()
                .map(|(name, child)| (name.clone(), Self::field_json(child)))
                .collect();
            field.insert("properties".to_string(), Value::Object(properties));
        }

        Value::Object(field)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////


////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
