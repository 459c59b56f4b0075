// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::sync::Arc;

use catalog_search::*;
use internal_error::InternalError;

use crate::FacetedSearch;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Applies submitted form values to a search and writes the returned buckets
/// back onto the form fields
#[dill::component(pub)]
pub struct FacetFormReflector {
    formatters: Arc<FormatterRegistry>,
}

impl FacetFormReflector {
    /// One field per facet in registration order, then the filter-only fields
    pub fn build_form<'a>(
        facets: impl IntoIterator<Item = &'a Arc<FacetDefinition>>,
        range_filter_fields: &[RangeFilterFieldConfig],
    ) -> FacetForm {
        let mut fields: Vec<_> = facets
            .into_iter()
            .filter_map(|definition| FormField::for_facet(Arc::clone(definition)))
            .collect();

        fields.extend(range_filter_fields.iter().map(|c| {
            FormField::FilterOnly(RangeFilterField::new(
                c.name.as_str(),
                c.label.as_str(),
                c.field.as_str(),
            ))
        }));

        FacetForm { fields }
    }

    /// A rejected value never aborts the batch: it is logged and skipped
    #[tracing::instrument(level = "debug", skip_all)]
    pub async fn apply_and_reflect(
        &self,
        search: &mut FacetedSearch,
        form: &mut FacetForm,
        submission: &FormSubmission,
        ctx: &RequestContext,
    ) -> Result<FacetedSearchResponse, InternalError> {
        for field in &mut form.fields {
            match field {
                FormField::TermFacet(facet_field) | FormField::RangeFacet(facet_field) => {
                    Self::apply_facet_field(search, facet_field, submission);
                }
                FormField::FilterOnly(filter_field) => {
                    Self::apply_filter_field(search, filter_field, submission);
                }
            }
        }

        let response = search.execute().await?;

        self.reflect(form, &response, ctx);
        search.mark_reflected();

        Ok(response)
    }

    fn apply_facet_field(
        search: &mut FacetedSearch,
        field: &mut FacetFormField,
        submission: &FormSubmission,
    ) {
        let values = submission
            .get(&field.name)
            .into_iter()
            .flatten()
            .map(|v| v.trim())
            .filter(|v| !v.is_empty());

        // Values are applied one by one so a rejected value leaves the rest intact
        for value in values {
            let value = value.to_string();
            match search.add_filter(&field.es_field, std::slice::from_ref(&value)) {
                Ok(()) => {
                    if !field.selected.contains(&value) {
                        field.selected.push(value);
                    }
                }
                Err(e) => {
                    tracing::warn!(
                        field = %field.name,
                        %value,
                        error = %e,
                        "Ignoring facet selection",
                    );
                }
            }
        }
    }

    fn apply_filter_field(
        search: &mut FacetedSearch,
        field: &mut RangeFilterField,
        submission: &FormSubmission,
    ) {
        if let Err(e) = field.bind(submission) {
            tracing::warn!(field = %field.name, error = %e, "Ignoring filter value");
            return;
        }

        let Some(query) = field.to_query() else {
            return;
        };

        if let Err(e) = search.add_filter_query(query) {
            tracing::warn!(field = %field.name, error = %e, "Ignoring filter query");
        }
    }

    /// Replaces the choices of every facet field found in the response.
    /// Empty range buckets are dropped, empty term buckets are kept.
    pub fn reflect(
        &self,
        form: &mut FacetForm,
        response: &FacetedSearchResponse,
        ctx: &RequestContext,
    ) {
        for field in &mut form.fields {
            let (facet_field, keep_empty) = match field {
                FormField::TermFacet(f) => (f, true),
                FormField::RangeFacet(f) => (f, false),
                FormField::FilterOnly(_) => continue,
            };

            let Some(result) = response.facet(&facet_field.es_field) else {
                continue;
            };

            let formatter = self.resolve_formatter(&facet_field.definition);

            facet_field.choices = result
                .buckets
                .iter()
                .filter(|b| keep_empty || b.doc_count > 0)
                .map(|b| {
                    let display_key = if keep_empty {
                        b.key.as_str()
                    } else {
                        facet_field
                            .definition
                            .range_label(&b.key)
                            .unwrap_or(b.key.as_str())
                    };

                    let label = match formatter {
                        Some(formatter) => formatter(ctx, display_key, b.doc_count),
                        None => default_label(display_key, b.doc_count),
                    };

                    FormChoice {
                        value: b.key.clone(),
                        label,
                        doc_count: b.doc_count,
                        selected: b.selected,
                    }
                })
                .collect();
        }
    }

    fn resolve_formatter(&self, definition: &FacetDefinition) -> Option<&Formatter> {
        let name = definition.formatter.as_deref()?;

        let formatter = self.formatters.get(name);
        if formatter.is_none() {
            tracing::warn!(
                facet_key = %definition.key(),
                formatter = %name,
                "Facet label formatter is not registered, using default labels",
            );
        }
        formatter
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub fn default_label(key: &str, doc_count: u64) -> String {
    format!("{key} ({doc_count})")
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
