//! Overlay config validation.
//!
//! Decoding is lenient: it skips what it does not understand and only fails
//! on structurally broken descriptors. This module reports everything the
//! decoder ignores or cannot check on its own.

// Allow format! appended to String - more readable for building messages
#![allow(clippy::format_push_string)]

use crate::models::InputOverlay;
use crate::parser::flat::FlatConfig;
use crate::parser::keys::{
    classify, desc_attr_key, desc_key, overlay_key, DescAttr, KeyKind, OverlayAttr,
    OVERLAY_COUNT_KEY,
};
use crate::parser::overlay::decode_overlays_with_warnings;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Slack allowed outside `[0, 1]` for normalized coordinates.
const NORMALIZED_TOLERANCE: f64 = 1e-3;

/// Validation result with specific errors and warnings.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ValidationReport {
    /// Problems that make the file unusable
    pub errors: Vec<ValidationError>,
    /// Suspicious content that decodes anyway
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationReport {
    /// Creates a new empty validation report.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Returns true if there are no errors (warnings are allowed).
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Adds an error to the report.
    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    /// Adds a warning to the report.
    pub fn add_warning(&mut self, warning: ValidationWarning) {
        self.warnings.push(warning);
    }

    /// Formats the report as a user-friendly message.
    #[must_use]
    pub fn format_message(&self) -> String {
        let mut message = String::new();

        if !self.errors.is_empty() {
            message.push_str(&format!("✗ {} validation errors:\n", self.errors.len()));
            for (idx, error) in self.errors.iter().enumerate() {
                message.push_str(&format!("  {}. {}\n", idx + 1, error));
            }
        }

        if !self.warnings.is_empty() {
            if !message.is_empty() {
                message.push('\n');
            }
            message.push_str(&format!("⚠ {} warnings:\n", self.warnings.len()));
            for (idx, warning) in self.warnings.iter().enumerate() {
                message.push_str(&format!("  {}. {}\n", idx + 1, warning));
            }
        }

        message
    }
}

/// Where in the file a finding applies.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Location {
    /// Overlay ordinal
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overlay: Option<usize>,
    /// Descriptor ordinal
    #[serde(skip_serializing_if = "Option::is_none")]
    pub desc: Option<usize>,
    /// Config key
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    /// 1-based line number
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
}

impl Location {
    fn is_empty(&self) -> bool {
        self.overlay.is_none() && self.desc.is_none() && self.key.is_none() && self.line.is_none()
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(line) = self.line {
            write!(f, "[line {line}] ")?;
        }
        if let Some(key) = &self.key {
            write!(f, "[{key}] ")
        } else {
            match (self.overlay, self.desc) {
                (Some(overlay), Some(desc)) => write!(f, "[Overlay {overlay} desc {desc}] "),
                (Some(overlay), None) => write!(f, "[Overlay {overlay}] "),
                _ => Ok(()),
            }
        }
    }
}

/// Validation error with context.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationError {
    /// Type of validation error
    pub kind: ValidationErrorKind,
    /// Where the error applies
    #[serde(skip_serializing_if = "Location::is_empty")]
    pub location: Location,
    /// Human-readable error message
    pub message: String,
}

impl ValidationError {
    /// Creates a new validation error.
    pub fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            location: Location::default(),
            message: message.into(),
        }
    }

    /// Sets the overlay (and optionally descriptor) context.
    #[must_use]
    pub const fn at(mut self, overlay: usize, desc: Option<usize>) -> Self {
        self.location.overlay = Some(overlay);
        self.location.desc = desc;
        self
    }

    /// Sets the key context.
    #[must_use]
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.location.key = Some(key.into());
        self
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}: {}", self.location, self.kind, self.message)
    }
}

/// Types of validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationErrorKind {
    /// The file could not be decoded
    DecodeFailure,
    /// A descriptor within the declared count has no tuple
    MissingDescriptor,
    /// A next target names no overlay
    UnresolvedTarget,
}

impl fmt::Display for ValidationErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DecodeFailure => write!(f, "Decode Failure"),
            Self::MissingDescriptor => write!(f, "Missing Descriptor"),
            Self::UnresolvedTarget => write!(f, "Unresolved Target"),
        }
    }
}

/// Validation warning (non-blocking).
#[derive(Debug, Clone, Serialize)]
pub struct ValidationWarning {
    /// Type of warning
    pub kind: ValidationWarningKind,
    /// Where the warning applies
    #[serde(skip_serializing_if = "Location::is_empty")]
    pub location: Location,
    /// Warning message
    pub message: String,
}

impl ValidationWarning {
    /// Creates a new validation warning
    pub fn new(kind: ValidationWarningKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            location: Location::default(),
            message: message.into(),
        }
    }

    /// Sets the key context.
    #[must_use]
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.location.key = Some(key.into());
        self
    }
}

impl fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.location, self.message)
    }
}

/// Types of validation warnings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationWarningKind {
    /// Malformed line, key or scalar, or a value of the wrong kind
    Syntax,
    /// More than one overlay carries the same name
    DuplicateName,
    /// Content beyond a declared count
    Undeclared,
    /// Key outside the known vocabulary
    UnknownKey,
    /// Normalized coordinate outside `[0, 1]`
    OutOfRange,
    /// Both saturation spellings are present
    ConflictingSaturation,
}

/// Validates overlay config text.
#[must_use]
pub fn validate(text: &str) -> ValidationReport {
    let flat = FlatConfig::parse(text);
    validate_flat(&flat)
}

/// Validates an already parsed flat mapping.
///
/// Checks:
/// - The mapping decodes
/// - Every declared descriptor has a tuple
/// - Every next target names an overlay
/// - Keys are known and within the declared counts
/// - Normalized coordinates stay within `[0, 1]`
#[must_use]
pub fn validate_flat(flat: &FlatConfig) -> ValidationReport {
    let mut report = ValidationReport::new();

    for warning in flat.warnings() {
        let mut finding = ValidationWarning::new(ValidationWarningKind::Syntax, &warning.message);
        finding.location.line = warning.line;
        finding.location.key.clone_from(&warning.key);
        report.add_warning(finding);
    }

    check_missing_descriptors(flat, &mut report);
    check_keys(flat, &mut report);

    match decode_overlays_with_warnings(flat) {
        Ok((overlays, warnings)) => {
            for warning in warnings {
                let mut finding =
                    ValidationWarning::new(ValidationWarningKind::Syntax, warning.message);
                finding.location.key = warning.key;
                report.add_warning(finding);
            }
            check_overlays(&overlays, &mut report);
        }
        Err(err) => {
            let already_reported = report
                .errors
                .iter()
                .any(|e| e.kind == ValidationErrorKind::MissingDescriptor);
            let message = format!("{err:#}");
            if !(already_reported && message.contains("Missing descriptor")) {
                report.add_error(ValidationError::new(
                    ValidationErrorKind::DecodeFailure,
                    message,
                ));
            }
        }
    }

    tracing::debug!(
        errors = report.errors.len(),
        warnings = report.warnings.len(),
        "validation finished"
    );
    report
}

fn declared(flat: &FlatConfig, key: &str) -> usize {
    flat.get(key).and_then(|v| v.as_count()).unwrap_or(0)
}

fn check_missing_descriptors(flat: &FlatConfig, report: &mut ValidationReport) {
    let overlay_count = declared(flat, OVERLAY_COUNT_KEY);

    // Walk the keys that exist; the declared counts may be arbitrarily large
    let mut present: BTreeMap<usize, BTreeSet<usize>> = BTreeMap::new();
    for key in flat.keys() {
        match classify(key) {
            KeyKind::Overlay {
                overlay,
                attr: OverlayAttr::Descs,
            } if overlay < overlay_count => {
                present.entry(overlay).or_default();
            }
            KeyKind::DescCore { overlay, desc } if overlay < overlay_count => {
                present.entry(overlay).or_default().insert(desc);
            }
            _ => {}
        }
    }

    for (i, cores) in present {
        let descs_key = overlay_key(i, OverlayAttr::Descs);
        let count = declared(flat, &descs_key);

        let mut next = 0;
        for j in cores.range(..count).copied().chain(std::iter::once(count)) {
            if j > next {
                report.add_error(missing_run(i, &descs_key, next, j));
            }
            next = j + 1;
        }
    }
}

/// One error for the missing descriptors `start..end` of overlay `i`.
fn missing_run(i: usize, descs_key: &str, start: usize, end: usize) -> ValidationError {
    let first = desc_key(i, start);
    let message = if end - start == 1 {
        format!("{descs_key} declares descriptor {start} but {first} is missing")
    } else {
        format!(
            "{descs_key} declares descriptors {start}..{end} but {first} through {} are missing ({} descriptors)",
            desc_key(i, end - 1),
            end - start
        )
    };
    ValidationError::new(ValidationErrorKind::MissingDescriptor, message).at(i, Some(start))
}

fn check_keys(flat: &FlatConfig, report: &mut ValidationReport) {
    let overlay_count = declared(flat, OVERLAY_COUNT_KEY);
    let desc_count = |i: usize| declared(flat, &overlay_key(i, OverlayAttr::Descs));

    for key in flat.keys() {
        let message = match classify(key) {
            KeyKind::OverlayCount => None,
            KeyKind::Unknown => Some((ValidationWarningKind::UnknownKey, "Unknown key".to_string())),
            KeyKind::Overlay { overlay, .. } if overlay >= overlay_count => Some((
                ValidationWarningKind::Undeclared,
                format!("Overlay {overlay} is beyond the declared count of {overlay_count}"),
            )),
            KeyKind::DescCore { overlay, desc } | KeyKind::Desc { overlay, desc, .. }
                if overlay >= overlay_count || desc >= desc_count(overlay) =>
            {
                Some((
                    ValidationWarningKind::Undeclared,
                    format!(
                        "Descriptor {desc} of overlay {overlay} is beyond the declared count and is ignored"
                    ),
                ))
            }
            KeyKind::Desc {
                overlay,
                desc,
                attr: DescAttr::Pct,
            } if flat.contains_key(&desc_attr_key(overlay, desc, DescAttr::SaturatePct)) => Some((
                ValidationWarningKind::ConflictingSaturation,
                "Both pct and saturate_pct are set; saturate_pct wins".to_string(),
            )),
            KeyKind::Overlay { .. } | KeyKind::DescCore { .. } | KeyKind::Desc { .. } => None,
        };

        if let Some((kind, message)) = message {
            report.add_warning(ValidationWarning::new(kind, message).with_key(key));
        }
    }
}

fn check_overlays(overlays: &InputOverlay, report: &mut ValidationReport) {
    for name in overlays.duplicate_names() {
        report.add_warning(ValidationWarning::new(
            ValidationWarningKind::DuplicateName,
            format!("Overlay name '{name}' is used more than once; the first one wins"),
        ));
    }

    let in_range = |v: f64| (-NORMALIZED_TOLERANCE..=1.0 + NORMALIZED_TOLERANCE).contains(&v);

    for (i, overlay) in overlays.iter().enumerate() {
        for (j, region) in overlay.regions.iter().enumerate() {
            if let Some(target) = &region.next_target {
                if overlays.index_of(target).is_none() {
                    report.add_error(
                        ValidationError::new(
                            ValidationErrorKind::UnresolvedTarget,
                            format!("Next target '{target}' does not name any overlay"),
                        )
                        .at(i, Some(j))
                        .with_key(desc_attr_key(i, j, DescAttr::NextTarget)),
                    );
                }
            }

            if region.is_normalized(&overlay.defaults) && !(in_range(region.x) && in_range(region.y))
            {
                report.add_warning(
                    ValidationWarning::new(
                        ValidationWarningKind::OutOfRange,
                        format!(
                            "Normalized center ({}, {}) of '{}' lies outside [0, 1]",
                            region.x, region.y, region.button
                        ),
                    )
                    .with_key(desc_key(i, j)),
                );
            }
        }
    }
}
