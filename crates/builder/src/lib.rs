//! Execution-configuration XML documents for Apache Hop.
//!
//! A [`DocumentBuilder`] wraps an existing workflow or pipeline definition
//! with its execution parameters, a merged variable set layered from up to
//! four JSON sources, and a gzip + base64 metastore payload, producing the
//! single XML string the execution service expects.
//!
//! The builder is a pure transformer over its constructor-supplied file
//! paths: no caching, no retries, no state across calls. Every failure
//! (unreadable file, malformed JSON or XML, missing key or section) is
//! surfaced to the caller; there is no partial output.

mod builder;
mod definition;
mod metastore;

pub use builder::DocumentBuilder;
pub use definition::{Parameter, ParametersLocation};
