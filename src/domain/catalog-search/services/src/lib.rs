// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

mod attribute_field_catalog_impl;
mod builtin_formatters;
mod dependencies;
mod facet_form_reflector;
mod faceted_search;
mod faceted_search_service_impl;
mod search_configuration_cache;
mod search_configuration_mutations_impl;

pub use attribute_field_catalog_impl::*;
pub use builtin_formatters::*;
pub use dependencies::*;
pub use facet_form_reflector::*;
pub use faceted_search::*;
pub use faceted_search_service_impl::*;
pub use search_configuration_cache::*;
pub use search_configuration_mutations_impl::*;
