//! Firmware source generation.
//!
//! This module renders a layout into a QMK `keymap.c` fragment and provides
//! the optional lint pass run before export.

pub mod generator;
pub mod validator;

pub use generator::FirmwareGenerator;
pub use validator::{FirmwareValidator, ValidationReport, ValidationWarning, ValidationWarningKind};
