// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use catalog_search::{FormatterRegistrationError, FormatterRegistryBuilder, RequestContext};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub const UPPERCASE_FORMATTER: &str = "uppercase_formatter";
pub const LOWERCASE_FORMATTER: &str = "lowercase_formatter";

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub fn uppercase_formatter(_: &RequestContext, key: &str, doc_count: u64) -> String {
    format!("{} ({doc_count})", key.to_uppercase())
}

pub fn lowercase_formatter(_: &RequestContext, key: &str, doc_count: u64) -> String {
    format!("{} ({doc_count})", key.to_lowercase())
}

pub fn register_builtin_formatters(
    builder: &mut FormatterRegistryBuilder,
) -> Result<(), FormatterRegistrationError> {
    builder.register(UPPERCASE_FORMATTER, uppercase_formatter)?;
    builder.register(LOWERCASE_FORMATTER, lowercase_formatter)?;
    Ok(())
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
