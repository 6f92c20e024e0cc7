//! wiscar-core — Question bank, response collection, and career-fit scoring.
//!
//! This crate defines the question data model, the session that collects
//! responses, and the scoring engine that turns a completed response set
//! into psychometric, technical, and WISCAR scores with a recommendation.

pub mod bank;
pub mod collector;
pub mod config;
pub mod error;
pub mod insights;
pub mod model;
pub mod parser;
pub mod report;
pub mod results;
pub mod scoring;
pub mod statistics;
pub mod traits;
