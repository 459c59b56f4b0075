// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use internal_error::InternalError;

use crate::{FacetDefinitionId, SearchFieldDefinitionId};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Announces a change of the stored search configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchConfigurationMessage {
    FacetSaved(FacetDefinitionId),
    FacetDeleted(FacetDefinitionId),
    SearchFieldSaved(SearchFieldDefinitionId),
    SearchFieldDeleted(SearchFieldDefinitionId),
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg_attr(any(feature = "testing", test), mockall::automock)]
#[async_trait::async_trait]
pub trait SearchConfigurationMessageConsumer: Send + Sync {
    /// Name used in logs
    fn consumer_name(&self) -> &'static str;

    async fn consume_message(
        &self,
        message: &SearchConfigurationMessage,
    ) -> Result<(), InternalError>;
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
