// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::sync::Arc;

use crate::FacetDefinition;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Response of the search index, before facets are paired with definitions
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IndexSearchResponse {
    pub total_hits: u64,
    pub hits: Vec<SearchHit>,
    pub facets: Vec<RawFacetBuckets>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchHit {
    pub id: String,
    pub score: Option<f64>,
    pub source: serde_json::Value,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RawFacetBuckets {
    pub key: String,
    pub buckets: Vec<RawBucket>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawBucket {
    pub key: String,
    pub doc_count: u64,
}

impl RawBucket {
    pub fn new(key: impl Into<String>, doc_count: u64) -> Self {
        Self {
            key: key.into(),
            doc_count,
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, PartialEq)]
pub struct FacetedSearchResponse {
    pub total_hits: u64,
    pub page_number: usize,
    pub page_size: usize,
    pub hits: Vec<SearchHit>,
    pub facets: Vec<FacetResult>,
}

impl FacetedSearchResponse {
    pub fn facet(&self, key: &str) -> Option<&FacetResult> {
        self.facets.iter().find(|f| f.key == key)
    }

    pub fn total_pages(&self) -> u64 {
        if self.page_size == 0 {
            return 0;
        }
        self.total_hits.div_ceil(self.page_size as u64)
    }
}

/// Buckets of one facet. `definition` is absent when the configuration no
/// longer has a facet with this key.
#[derive(Debug, Clone, PartialEq)]
pub struct FacetResult {
    pub key: String,
    pub definition: Option<Arc<FacetDefinition>>,
    pub buckets: Vec<FacetBucket>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FacetBucket {
    pub key: String,
    pub doc_count: u64,
    pub selected: bool,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
