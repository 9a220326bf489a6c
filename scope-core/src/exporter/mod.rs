//! Renderers for analysis results.
//!
//! - `report`: the plain-text analysis report
//! - `document`: the combined structure document (structure sections + report)
//! - `json`: machine-readable export of everything

pub mod document;
pub mod json;
pub mod report;
