// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

mod test_attribute_field_catalog_impl;
mod test_faceted_search;
mod test_faceted_search_service_impl;
mod test_search_configuration_mutations_impl;
