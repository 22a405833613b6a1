//! Format-agnostic tree reconstruction shared by the parsers.

pub mod flat_to_nested;
