//! # pf-bench
//!
//! Performance benchmarks for PrizeForge.
//!
//! ## Benchmark Categories
//!
//! - **Selection Benchmarks**: table building, row lookup, selection operations
//! - **Success Benchmarks**: Monte Carlo estimates over the banner presets
//!
//! ## Running Benchmarks
//!
//! ```bash
//! # Run all benchmarks
//! cargo bench -p pf-bench
//!
//! # Run specific benchmark
//! cargo bench -p pf-bench -- select
//!
//! # With baseline comparison
//! cargo bench -p pf-bench -- --save-baseline main
//! cargo bench -p pf-bench -- --baseline main
//! ```

pub mod generators;

pub use generators::*;
