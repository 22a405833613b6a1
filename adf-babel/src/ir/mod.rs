//! Intermediate Representation (IR) for converted documents.
//!
//! Two shapes live here: the flat, untokenized block stream produced by the
//! line segmenter ([`events`]) and the owned document tree handed to callers
//! ([`nodes`]). Formats convert to and from [`nodes::Document`].

pub mod events;
pub mod nodes;
