//! # NodeLink Test Suite
//!
//! Unified test crate for cross-crate flows:
//!
//! ```text
//! tests/src/
//! └── integration/      # Hub + client + protocol choreography
//!     └── flows.rs
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p nodelink-tests
//!
//! # By category
//! cargo test -p nodelink-tests integration::
//! ```

#![allow(dead_code)]

pub mod integration;
