//! Redox Layout Editor Library
//!
//! Core of a keymap editor for the Redox split keyboard: an ordered list of
//! named layers, each mapping key positions to QMK action strings, with
//! JSON persistence and deterministic `keymap.c` generation.

// Module declarations
pub mod branding;
pub mod cli;
pub mod config;
pub mod error;
pub mod firmware;
pub mod models;
pub mod parser;
pub mod services;

pub use error::LayoutError;
pub use services::LayerEditor;
