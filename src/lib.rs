//! Internal library crate for sift.
//!
//! The shipped application is the `sift` binary (`src/main.rs`).
//!
//! This library exists to share code between targets (binary, tests) and to keep modules organized.
//! This API is only used to build the `sift` binary and is not considered a library for external
//! use.

pub mod app;
pub mod config;
pub mod core;
pub mod ui;
pub mod utils;
