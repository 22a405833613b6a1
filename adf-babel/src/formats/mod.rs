//! Format implementations
//!
//! This module contains all format implementations that convert between
//! the document tree and various text representations.

pub mod adf;
pub mod icons;
pub mod markdown;
pub mod treeviz;

pub use adf::AdfFormat;
pub use markdown::MarkdownFormat;
pub use treeviz::TreevizFormat;
