// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::sync::Arc;

use internal_error::InternalError;

use crate::SearchConfigurationSnapshot;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg_attr(any(feature = "testing", test), mockall::automock)]
#[async_trait::async_trait]
pub trait SearchConfigurationProvider: Send + Sync {
    /// Possibly cached snapshot of facet and search field definitions.
    /// A snapshot taken before an invalidation may still be in use by
    /// in-flight requests.
    async fn snapshot(&self) -> Result<Arc<SearchConfigurationSnapshot>, InternalError>;

    fn invalidate(&self);
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
