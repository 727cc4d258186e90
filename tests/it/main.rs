//! Single test binary entry point.
//!
//! All integration tests compile into one binary to keep linking to a single
//! pass.
//!
//! Structure:
//! - helpers: shared fixtures (surfaces, item rows, callback recorders)
//! - integration: full pointer-down → move → up flows across controllers
//! - unit: single-module tests against the public API

mod unit;
