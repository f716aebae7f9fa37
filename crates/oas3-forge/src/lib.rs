#![allow(clippy::doc_markdown)]
#![allow(clippy::missing_errors_doc)]

//! OpenAPI 3.x document resolution and typed-IR construction.
//!
//! The pipeline is a single-threaded, single-pass batch: acquire bytes,
//! deserialize the document model, resolve every `$ref`, fold the resolved
//! schema graph into a deduplicated type registry plus a function list, and
//! hand that IR to an emission backend. Any failure along the way aborts
//! the run; there is no partial output.

pub mod generator;
pub mod ui;
pub mod utils;
