// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::time::Duration;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone)]
pub struct ElasticsearchClientConfig {
    pub url: url::Url,
    /// Password of the built-in `elastic` user, when security is enabled
    pub password: Option<String>,
    pub timeout_secs: u64,
    pub enable_compression: bool,
}

impl ElasticsearchClientConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone)]
pub struct ElasticsearchRepositoryConfig {
    pub index_name: String,
}

impl Default for ElasticsearchRepositoryConfig {
    fn default() -> Self {
        Self {
            index_name: "products".to_string(),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
