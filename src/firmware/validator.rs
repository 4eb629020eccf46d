//! Export-time lint.
//!
//! The editor never checks layer references or names while editing. This
//! pass scans a layout right before export and collects the problems that
//! would make the generated `keymap.c` fail to compile or silently drop keys.
//! Findings are warnings only; export always proceeds.

// Allow format! appended to String - more readable for building messages
#![allow(clippy::format_push_string)]

use crate::models::{Action, Layout, PositionId, PositionSpace};
use regex::Regex;
use serde::Serialize;
use std::collections::HashSet;
use std::sync::OnceLock;

/// Pattern a layer name must match to be usable as a C identifier.
const C_IDENTIFIER: &str = r"^[A-Za-z_][A-Za-z0-9_]*$";

fn identifier_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(C_IDENTIFIER).expect("C identifier pattern is valid"))
}

/// Lint result.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ValidationReport {
    /// Non-blocking findings, in layer order
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationReport {
    /// Creates a new empty report.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            warnings: Vec::new(),
        }
    }

    /// Returns true if nothing was found.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }

    /// Adds a warning to the report.
    pub fn add_warning(&mut self, warning: ValidationWarning) {
        self.warnings.push(warning);
    }

    /// Warnings of one kind.
    pub fn warnings_of(&self, kind: ValidationWarningKind) -> impl Iterator<Item = &ValidationWarning> {
        self.warnings.iter().filter(move |w| w.kind == kind)
    }

    /// Formats the report as a user-friendly message.
    #[must_use]
    pub fn format_message(&self) -> String {
        let mut message = String::new();

        if !self.warnings.is_empty() {
            message.push_str(&format!("⚠️  {} warnings:\n", self.warnings.len()));
            for (idx, warning) in self.warnings.iter().enumerate() {
                message.push_str(&format!("  {}. {}\n", idx + 1, warning));
            }
        }

        message
    }
}

/// Types of lint findings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationWarningKind {
    /// `[Name]` where no layer is currently called `Name`
    DanglingReference,
    /// Layer name that cannot be used in `#define _<name>` / the enum
    InvalidIdentifier,
    /// Binding at a position the board does not have (never exported)
    UnknownPosition,
}

impl std::fmt::Display for ValidationWarningKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DanglingReference => write!(f, "Dangling Reference"),
            Self::InvalidIdentifier => write!(f, "Invalid Identifier"),
            Self::UnknownPosition => write!(f, "Unknown Position"),
        }
    }
}

/// A single lint finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationWarning {
    /// Type of finding
    pub kind: ValidationWarningKind,
    /// Layer index the finding belongs to
    pub layer: usize,
    /// Key position, for per-key findings
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<PositionId>,
    /// Human-readable message
    pub message: String,
}

impl ValidationWarning {
    /// Creates a new warning for a layer.
    pub fn new(kind: ValidationWarningKind, layer: usize, message: impl Into<String>) -> Self {
        Self {
            kind,
            layer,
            position: None,
            message: message.into(),
        }
    }

    /// Sets the position context.
    #[must_use]
    pub fn with_position(mut self, position: PositionId) -> Self {
        self.position = Some(position);
        self
    }
}

impl std::fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(position) = &self.position {
            write!(f, "[Layer {} ({})] {}: {}", self.layer, position, self.kind, self.message)
        } else {
            write!(f, "[Layer {}] {}: {}", self.layer, self.kind, self.message)
        }
    }
}

/// Export lint over a layout and its position space.
pub struct FirmwareValidator<'a, S: PositionSpace + ?Sized> {
    layout: &'a Layout,
    space: &'a S,
}

impl<'a, S: PositionSpace + ?Sized> FirmwareValidator<'a, S> {
    /// Creates a new validator.
    pub const fn new(layout: &'a Layout, space: &'a S) -> Self {
        Self { layout, space }
    }

    /// Runs all checks.
    ///
    /// Checks:
    /// - Layer names are valid C identifiers
    /// - Every `[Name]` reference names an existing layer
    /// - Every bound position exists in the position space
    pub fn validate(&self) -> ValidationReport {
        let mut report = ValidationReport::new();
        let names: HashSet<&str> = self.layout.layer_names().collect();
        let positions: HashSet<PositionId> = self.space.positions().into_iter().collect();

        for (layer_idx, layer) in self.layout.layers.iter().enumerate() {
            if !identifier_regex().is_match(&layer.name) {
                report.add_warning(ValidationWarning::new(
                    ValidationWarningKind::InvalidIdentifier,
                    layer_idx,
                    format!("Layer name '{}' is not a valid C identifier", layer.name),
                ));
            }

            for entry in layer.entries() {
                if !positions.contains(&entry.position) {
                    report.add_warning(
                        ValidationWarning::new(
                            ValidationWarningKind::UnknownPosition,
                            layer_idx,
                            format!("'{}' is bound to a position the keyboard does not have", entry.value),
                        )
                        .with_position(entry.position.clone()),
                    );
                }

                if let Action::LayerRef(target) = entry.action() {
                    if !names.contains(target) {
                        report.add_warning(
                            ValidationWarning::new(
                                ValidationWarningKind::DanglingReference,
                                layer_idx,
                                format!("'{}' references layer '{}', which does not exist", entry.value, target),
                            )
                            .with_position(entry.position.clone()),
                        );
                    }
                }
            }
        }

        report
    }
}
