//! Inspection views over the conversion pipeline
//!
//! Each view stops the pipeline at one stage and renders what it has:
//!
//! 1. **Preprocessing** - raw Markdown → normalized Markdown
//!    - `preprocessed`: the normalized text
//!
//! 2. **Segmentation** - normalized Markdown → raw blocks
//!    - `blocks`: one entry per block, list runs with their indent levels
//!
//! 3. **Assembly** - raw blocks → document tree
//!    - `ir-treeviz`: tree visualization with Unicode icons
//!    - `adf-json`: the final ADF JSON
//!
//! ## Extra Parameters
//!
//! - `inlines`: for `ir-treeviz`, lists inline runs under each node.
//! - `pretty`: for `adf-json`, `false` gives single-line JSON.
//!
//! Example: `adf inspect notes.md ir-treeviz --extra-inlines`

use crate::error::FormatError;
use crate::format::Format;
use crate::formats::adf::AdfFormat;
use crate::formats::markdown::{parser, preprocess};
use crate::formats::treeviz::to_treeviz_str_with_params;
use std::collections::HashMap;

/// All available inspection views
pub const AVAILABLE_VIEWS: &[&str] = &["preprocessed", "blocks", "ir-treeviz", "adf-json"];

/// View used when none is named
pub const DEFAULT_VIEW: &str = "ir-treeviz";

/// Renders `source` (Markdown) through the named view.
pub fn execute_view(
    source: &str,
    view: &str,
    extra_params: &HashMap<String, String>,
) -> Result<String, FormatError> {
    match view {
        "preprocessed" => Ok(preprocess(source)),
        "blocks" => Ok(render_blocks(source)),
        "ir-treeviz" => {
            let doc = parser::parse_from_markdown(source);
            Ok(to_treeviz_str_with_params(&doc, extra_params))
        }
        "adf-json" => {
            let doc = parser::parse_from_markdown(source);
            AdfFormat.serialize_with_options(&doc, extra_params)
        }
        _ => Err(FormatError::NotSupported(format!(
            "Unknown view '{}'. Available views: {}",
            view,
            AVAILABLE_VIEWS.join(", ")
        ))),
    }
}

fn render_blocks(source: &str) -> String {
    let blocks = parser::segment(&preprocess(source));
    let mut output = String::new();
    for (index, block) in blocks.iter().enumerate() {
        output.push_str(&format!("{index:02} {block}\n"));
    }
    output
}
