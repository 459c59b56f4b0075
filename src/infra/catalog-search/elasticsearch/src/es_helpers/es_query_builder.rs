// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use catalog_search::*;
use serde_json::{Map, Value, json};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Name of the bucket aggregation nested under each facet's filter
/// aggregation
pub const AGG_VALUES: &str = "values";

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Translates a [`SearchQuery`] into an Elasticsearch `_search` body.
///
/// Default and dynamic filters narrow both hits and aggregations. Facet
/// selections go to `post_filter`, and each facet aggregation only sees the
/// selections of the other facets, which keeps sibling choices of a
/// selected facet visible.
pub struct ElasticsearchQueryBuilder {}

impl ElasticsearchQueryBuilder {
    pub fn build_search_body(query: &SearchQuery) -> Value {
        let mut body = json!({
            "query": Self::query_argument(query),
            "from": query.page.offset,
            "size": query.page.limit,
            "track_total_hits": true,
        });

        if !query.facet_filters.is_empty() {
            body["post_filter"] = Self::all_of(query.facet_filters.iter().map(|f| &f.query));
        }

        if !query.aggregations.is_empty() {
            body["aggs"] = Self::aggs_argument(query);
        }

        body
    }

    fn query_argument(query: &SearchQuery) -> Value {
        let must = match &query.text {
            Some(text) => Self::text_argument(text),
            None => json!({ "match_all": {} }),
        };

        let filter: Vec<_> = query
            .default_filters
            .iter()
            .chain(&query.dynamic_filters)
            .map(Self::filter_argument)
            .collect();

        json!({
            "bool": {
                "must": [must],
                "filter": filter,
            }
        })
    }

    fn text_argument(text: &TextQuery) -> Value {
        let mut multi_match = json!({
            "query": text.query,
            "type": "best_fields",
        });

        // Without fields the index default (all fields) is searched
        if !text.fields.is_empty() {
            multi_match["fields"] = text
                .fields
                .iter()
                .map(|f| format!("{}^{}", f.field, f.boost))
                .collect();
        }

        json!({ "multi_match": multi_match })
    }

    fn aggs_argument(query: &SearchQuery) -> Value {
        let mut aggs = Map::new();

        for aggregation in &query.aggregations {
            let filters = query.aggregation_filters(&aggregation.key);
            let filter = if filters.is_empty() {
                json!({ "match_all": {} })
            } else {
                Self::all_of(filters)
            };

            aggs.insert(
                aggregation.key.clone(),
                json!({
                    "filter": filter,
                    "aggs": {
                        AGG_VALUES: Self::bucket_agg_argument(&aggregation.facet),
                    },
                }),
            );
        }

        Value::Object(aggs)
    }

    fn bucket_agg_argument(facet: &CompiledFacet) -> Value {
        match facet {
            CompiledFacet::Terms { field, size } => json!({
                "terms": {
                    "field": field,
                    "size": size,
                    "min_doc_count": 0,
                }
            }),
            CompiledFacet::Range {
                field,
                value_type,
                buckets,
            } => {
                let ranges: Vec<_> = buckets
                    .iter()
                    .map(|b| {
                        let mut range = Map::new();
                        range.insert("key".to_string(), json!(b.key));
                        if let Some(from) = &b.from {
                            range.insert("from".to_string(), from.clone());
                        }
                        if let Some(to) = &b.to {
                            range.insert("to".to_string(), to.clone());
                        }
                        Value::Object(range)
                    })
                    .collect();

                match value_type.format() {
                    Some(format) => json!({
                        "date_range": {
                            "field": field,
                            "format": format,
                            "ranges": ranges,
                        }
                    }),
                    None => json!({
                        "range": {
                            "field": field,
                            "ranges": ranges,
                        }
                    }),
                }
            }
        }
    }

    fn all_of<'a>(clauses: impl IntoIterator<Item = &'a FilterQuery>) -> Value {
        let filter: Vec<_> = clauses.into_iter().map(Self::filter_argument).collect();
        json!({ "bool": { "filter": filter } })
    }

    pub fn filter_argument(query: &FilterQuery) -> Value {
        match query {
            FilterQuery::Term { field, value } => keyed("term", field, value.clone()),
            FilterQuery::Terms { field, values } => {
                keyed("terms", field, Value::Array(values.clone()))
            }
            FilterQuery::Range { field, bounds } => {
                keyed("range", field, Self::range_bounds_argument(bounds))
            }
            FilterQuery::Bool(bool_filter) => {
                let mut clauses = Map::new();
                for (occur, queries) in [
                    ("must", &bool_filter.must),
                    ("should", &bool_filter.should),
                    ("must_not", &bool_filter.must_not),
                    ("filter", &bool_filter.filter),
                ] {
                    if !queries.is_empty() {
                        clauses.insert(
                            occur.to_string(),
                            queries.iter().map(Self::filter_argument).collect(),
                        );
                    }
                }
                if !bool_filter.should.is_empty() {
                    clauses.insert("minimum_should_match".to_string(), json!(1));
                }
                json!({ "bool": clauses })
            }
            FilterQuery::Nested { path, query } => json!({
                "nested": {
                    "path": path,
                    "query": Self::filter_argument(query),
                }
            }),
        }
    }

    fn range_bounds_argument(bounds: &RangeBounds) -> Value {
        let mut range = Map::new();
        for (name, bound) in [
            ("gt", &bounds.gt),
            ("gte", &bounds.gte),
            ("lt", &bounds.lt),
            ("lte", &bounds.lte),
        ] {
            if let Some(bound) = bound {
                range.insert(name.to_string(), bound.clone());
            }
        }
        if let Some(format) = &bounds.format {
            range.insert("format".to_string(), json!(format));
        }
        Value::Object(range)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// `{ <kind>: { <field>: <value> } }`
fn keyed(kind: &str, field: &str, value: Value) -> Value {
    let mut inner = Map::new();
    inner.insert(field.to_string(), value);

    let mut outer = Map::new();
    outer.insert(kind.to_string(), Value::Object(inner));
    Value::Object(outer)
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////


////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
