//! Markdown format tests
//!
//! Tests for Markdown → Document → ADF JSON conversion.

mod import;
mod properties;
