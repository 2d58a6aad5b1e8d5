//! Keyword mining and pipeline orchestration for toponymy.
//!
//! This crate ties together the text source, the entry segmenter, the
//! keyword paragraph filter, and the report writer into the `extract`
//! workflow.

pub mod filter;
pub mod pipeline;
pub mod report;
pub mod source;
