//! pyscore - static quality analyzer for Python source
//!
//! Parses a Python file with tree-sitter, runs six category analyzers over
//! the syntax tree and raw lines, and aggregates their scores into one
//! weighted quality rating.

pub mod cli;
pub mod config;
pub mod detectors;
pub mod error;
pub mod models;
pub mod parsers;
pub mod pipeline;
pub mod reporters;
pub mod scoring;
pub mod source;
