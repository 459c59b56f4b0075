// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

mod es_index_mappings;
mod es_query_builder;
mod es_response_translator;

pub use es_index_mappings::*;
pub use es_query_builder::*;
pub use es_response_translator::*;
