// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

#![allow(dead_code)]

use std::collections::HashMap;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, serde::Deserialize)]
pub struct SearchResponse {
    pub took: u64,
    pub timed_out: bool,
    pub hits: SearchHitsResponse,
    #[serde(default)]
    pub aggregations: HashMap<String, FacetAggregationResponse>,
}

#[derive(Debug, serde::Deserialize)]
pub struct SearchHitsResponse {
    pub total: Option<SearchHitsTotalResponse>,
    pub hits: Vec<SearchHitResponse>,
}

#[derive(Debug, serde::Deserialize)]
pub struct SearchHitsTotalResponse {
    pub value: u64,
    pub relation: SearchHitsTotalRelation,
}

#[derive(Debug, serde::Deserialize)]
pub enum SearchHitsTotalRelation {
    #[serde(rename = "eq")]
    Eq,
    #[serde(rename = "gte")]
    Gte,
}

#[derive(Debug, serde::Deserialize)]
pub struct SearchHitResponse {
    #[serde(rename = "_id")]
    pub id: Option<String>,

    #[serde(rename = "_score")]
    pub score: Option<f64>,

    #[serde(rename = "_source")]
    pub source: Option<serde_json::Value>,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Filter aggregation wrapping the bucket aggregation of one facet
#[derive(Debug, serde::Deserialize)]
pub struct FacetAggregationResponse {
    pub doc_count: u64,
    pub values: BucketAggregationResponse,
}

#[derive(Debug, serde::Deserialize)]
pub struct BucketAggregationResponse {
    pub buckets: Vec<BucketResponse>,
}

#[derive(Debug, serde::Deserialize)]
pub struct BucketResponse {
    pub key: serde_json::Value,
    pub key_as_string: Option<String>,
    pub doc_count: u64,
}

impl BucketResponse {
    /// Booleans and dates come back as numbers with a string rendering
    pub fn display_key(&self) -> String {
        if let Some(key) = &self.key_as_string {
            return key.clone();
        }
        match &self.key {
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
