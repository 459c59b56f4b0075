// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use serde::{Deserialize, Serialize};
use thiserror::Error;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

const RANGE_PART_SEPARATOR: char = '|';
const OPEN_BOUND_KEY: &str = "*";

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// One bucket of a range facet. At least one bound is present.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RangeOption {
    pub label: String,
    pub lower: Option<u64>,
    pub upper: Option<u64>,
}

impl RangeOption {
    /// Stable bucket key derived from the bounds, e.g. `0_10` or `100_*`
    pub fn key(&self) -> String {
        let bound =
            |b: Option<u64>| b.map_or_else(|| OPEN_BOUND_KEY.to_string(), |v| v.to_string());
        format!("{}_{}", bound(self.lower), bound(self.upper))
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// How digit bounds of a range facet are interpreted when the facet is
/// compiled. Validation of the textual spec does not depend on it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RangeValueType {
    #[default]
    Integer,
    Float,
    Double,
    Decimal,
    Date,
    Datetime,
}

impl RangeValueType {
    #[allow(clippy::cast_precision_loss)]
    pub fn coerce(self, bound: u64) -> serde_json::Value {
        match self {
            Self::Integer | Self::Date | Self::Datetime => serde_json::json!(bound),
            Self::Float | Self::Double | Self::Decimal => serde_json::json!(bound as f64),
        }
    }

    /// Date bounds are epoch milliseconds
    pub fn format(self) -> Option<&'static str> {
        match self {
            Self::Date | Self::Datetime => Some("epoch_millis"),
            Self::Integer | Self::Float | Self::Double | Self::Decimal => None,
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RangeLineDefect {
    WrongPartCount(usize),
    EmptyLabel,
    InvalidFrom(String),
    InvalidTo(String),
    BoundOutOfRange(String),
    NoBounds,
}

impl std::fmt::Display for RangeLineDefect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::WrongPartCount(n) => write!(f, "expected 3 parts separated by '|', got {n}"),
            Self::EmptyLabel => write!(f, "label is empty"),
            Self::InvalidFrom(v) => write!(f, "'from' is not a non-negative integer: '{v}'"),
            Self::InvalidTo(v) => write!(f, "'to' is not a non-negative integer: '{v}'"),
            Self::BoundOutOfRange(v) => write!(f, "bound is too large: '{v}'"),
            Self::NoBounds => write!(f, "at least one of 'from' and 'to' is required"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidRangeLine {
    /// 1-based line number in the submitted text
    pub line_number: usize,
    pub line: String,
    pub defects: Vec<RangeLineDefect>,
}

impl std::fmt::Display for InvalidRangeLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "line {} '{}': ", self.line_number, self.line)?;
        for (i, defect) in self.defects.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{defect}")?;
        }
        Ok(())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid range specification: {}", format_invalid_lines(.invalid_lines))]
pub struct RangeSpecValidationError {
    pub invalid_lines: Vec<InvalidRangeLine>,
}

fn format_invalid_lines(lines: &[InvalidRangeLine]) -> String {
    lines
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Checks every non-blank line of a `label | from | to` range specification.
/// All offending lines are reported, not just the first one.
pub fn validate_range_spec(spec: &str) -> Result<(), RangeSpecValidationError> {
    parse_range_spec(spec).map(|_| ())
}

pub fn parse_range_spec(spec: &str) -> Result<Vec<RangeOption>, RangeSpecValidationError> {
    let mut options = Vec::new();
    let mut invalid_lines = Vec::new();

    for (i, raw_line) in spec.lines().enumerate() {
        let line = raw_line.trim();
        if line.is_empty() {
            continue;
        }

        match parse_line(line) {
            Ok(option) => options.push(option),
            Err(defects) => invalid_lines.push(InvalidRangeLine {
                line_number: i + 1,
                line: line.to_string(),
                defects,
            }),
        }
    }

    if invalid_lines.is_empty() {
        Ok(options)
    } else {
        Err(RangeSpecValidationError { invalid_lines })
    }
}

fn parse_line(line: &str) -> Result<RangeOption, Vec<RangeLineDefect>> {
    let parts: Vec<_> = line.split(RANGE_PART_SEPARATOR).map(str::trim).collect();
    let [label, from, to] = parts[..] else {
        return Err(vec![RangeLineDefect::WrongPartCount(parts.len())]);
    };

    let mut defects = Vec::new();
    if label.is_empty() {
        defects.push(RangeLineDefect::EmptyLabel);
    }

    let lower = parse_bound(from, RangeLineDefect::InvalidFrom, &mut defects);
    let upper = parse_bound(to, RangeLineDefect::InvalidTo, &mut defects);

    if from.is_empty() && to.is_empty() {
        defects.push(RangeLineDefect::NoBounds);
    }

    if !defects.is_empty() {
        return Err(defects);
    }

    Ok(RangeOption {
        label: label.to_string(),
        lower,
        upper,
    })
}

fn parse_bound(
    token: &str,
    invalid: fn(String) -> RangeLineDefect,
    defects: &mut Vec<RangeLineDefect>,
) -> Option<u64> {
    if token.is_empty() {
        return None;
    }
    if !token.bytes().all(|b| b.is_ascii_digit()) {
        defects.push(invalid(token.to_string()));
        return None;
    }
    match token.parse::<u64>() {
        Ok(value) => Some(value),
        Err(_) => {
            defects.push(RangeLineDefect::BoundOutOfRange(token.to_string()));
            None
        }
    }
}

/// Renders options back into the line-oriented text form
pub fn serialize_range_spec(options: &[RangeOption]) -> String {
    options
        .iter()
        .map(|o| {
            let bound = |b: Option<u64>| b.map(|v| v.to_string()).unwrap_or_default();
            format!("{} | {} | {}", o.label, bound(o.lower), bound(o.upper))
        })
        .collect::<Vec<_>>()
        .join("\n")
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////


////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
