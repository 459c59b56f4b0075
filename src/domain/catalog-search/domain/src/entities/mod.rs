// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

mod attribute_field_types;
mod compiled_facet;
mod document_schema;
mod facet_definition;
mod facet_form;
mod filter_query;
mod range_spec;
mod search_configuration;
mod search_field_definition;
mod search_query;
mod search_response;

pub use attribute_field_types::*;
pub use compiled_facet::*;
pub use document_schema::*;
pub use facet_definition::*;
pub use facet_form::*;
pub use filter_query::*;
pub use range_spec::*;
pub use search_configuration::*;
pub use search_field_definition::*;
pub use search_query::*;
pub use search_response::*;
