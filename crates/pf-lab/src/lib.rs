//! # pf-lab: Weighted prize selection lab for PrizeForge
//!
//! Builds cumulative probability tables, draws prizes from one or more
//! selection domains, and estimates how likely (or how slow) it is to hit
//! a set of prize requirements.
//!
//! ## Features
//!
//! - **Table Builder**: category specs → top-down lower-bound table
//! - **Validator**: structural checks that report every defect
//! - **Selection Engine**: multi-domain draws merged by prize name
//! - **Success Evaluator**: 10,000-trial Monte Carlo estimates
//! - **Presets**: ready-made guaranteed + variable banners
//!
//! ## Architecture
//!
//! ```text
//! Vec<PrizeCategorySpec>
//!     │  build_selection_table
//!     v
//! ProbabilityTable ──> SelectionDomain (table × draw count)
//!                            │
//!                            v
//!                     SelectionEngine ──plan──> SelectionPlan
//!                            │                      │ draw_into
//!                            v                      v
//!                     SuccessEvaluator        ResultTable
//!                            │
//!                            v
//!                  chance (f64) / SuccessInfo
//! ```
//!
//! Every random operation takes the caller's generator; seed it through
//! [`LabConfig`] for reproducible runs.

pub mod config;
pub mod engine;
pub mod presets;
pub mod results;
pub mod stats;
pub mod success;
pub mod table;
pub mod validator;

pub use config::*;
pub use engine::*;
pub use results::*;
pub use success::*;
pub use table::*;
pub use validator::*;
