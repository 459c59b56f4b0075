// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use catalog_search::*;

use crate::es_client::SearchResponse;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub struct ElasticsearchResponseTranslator {}

impl ElasticsearchResponseTranslator {
    /// Facets are returned in the order of the query's aggregations
    pub fn translate(mut response: SearchResponse, query: &SearchQuery) -> IndexSearchResponse {
        let facets = query
            .aggregations
            .iter()
            .filter_map(|aggregation| {
                let Some(facet_response) = response.aggregations.remove(&aggregation.key) else {
                    tracing::debug!(
                        facet_key = %aggregation.key,
                        "Aggregation is missing from the search response",
                    );
                    return None;
                };

                Some(RawFacetBuckets {
                    key: aggregation.key.clone(),
                    buckets: facet_response
                        .values
                        .buckets
                        .iter()
                        .map(|b| RawBucket::new(b.display_key(), b.doc_count))
                        .collect(),
                })
            })
            .collect();

        let total_hits = match &response.hits.total {
            Some(total) => total.value,
            None => response.hits.hits.len() as u64,
        };

        let hits = response
            .hits
            .hits
            .into_iter()
            .map(|hit| SearchHit {
                id: hit.id.unwrap_or_default(),
                score: hit.score,
                source: hit.source.unwrap_or_default(),
            })
            .collect();

        IndexSearchResponse {
            total_hits,
            hits,
            facets,
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////


////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
