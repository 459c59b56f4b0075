// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

mod attribute_field_catalog;
mod faceted_search_service;
mod formatter_registry;
mod search_configuration_mutations;
mod search_configuration_provider;

pub use attribute_field_catalog::*;
pub use faceted_search_service::*;
pub use formatter_registry::*;
pub use search_configuration_mutations::*;
pub use search_configuration_provider::*;
