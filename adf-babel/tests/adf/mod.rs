//! ADF format tests
//!
//! Tests for ADF JSON decoding, re-encoding and validation of decoded trees.

mod decode;
