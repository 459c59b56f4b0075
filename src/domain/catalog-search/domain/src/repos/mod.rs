// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

mod attribute_repository;
mod search_configuration_repository;
mod search_index_repository;

pub use attribute_repository::*;
pub use search_configuration_repository::*;
pub use search_index_repository::*;
