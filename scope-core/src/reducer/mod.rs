//! Reduction of source files to metrics and compact abstracts.

pub mod abstraction;
pub mod complexity;

pub use abstraction::abstract_file;
