//! Serde model of the ADF JSON subset this crate reads and writes.
//!
//! These types mirror the wire shape one to one. They carry no invariants of
//! their own: conversion to and from [`crate::ir::nodes::Document`] lives in
//! the serializer and parser modules.

use serde::{Deserialize, Serialize};

/// The `{"type":"doc","version":1,"content":[…]}` envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdfDocument {
    #[serde(rename = "type")]
    pub kind: String,
    pub version: u32,
    #[serde(default)]
    pub content: Vec<AdfNode>,
}

/// Any node below the envelope, discriminated by its `type` key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum AdfNode {
    Heading {
        attrs: HeadingAttrs,
        #[serde(default)]
        content: Vec<AdfNode>,
    },
    Paragraph {
        #[serde(default)]
        content: Vec<AdfNode>,
    },
    BulletList {
        #[serde(default)]
        content: Vec<AdfNode>,
    },
    ListItem {
        #[serde(default)]
        content: Vec<AdfNode>,
    },
    Text {
        text: String,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        marks: Vec<AdfMark>,
    },
}

impl AdfNode {
    /// The ADF `type` string of this node.
    pub fn type_name(&self) -> &'static str {
        match self {
            AdfNode::Heading { .. } => "heading",
            AdfNode::Paragraph { .. } => "paragraph",
            AdfNode::BulletList { .. } => "bulletList",
            AdfNode::ListItem { .. } => "listItem",
            AdfNode::Text { .. } => "text",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeadingAttrs {
    pub level: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum AdfMark {
    Strong,
    Em,
    Code,
    Link { attrs: LinkAttrs },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkAttrs {
    pub href: String,
}
