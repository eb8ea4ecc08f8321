//! # pf-core: PrizeForge data model
//!
//! Records shared by every PrizeForge crate:
//!
//! - **PrizeCategorySpec**: a named prize group with a probability share
//! - **PrizeSelectionRow / ProbabilityTable**: cumulative lower-bound table
//! - **SelectionDomain**: a table plus how many draws to take from it
//! - **PrizeResultRow / ResultTable**: per-prize selection tallies
//! - **SuccessCriteria / SuccessInfo**: Monte Carlo inputs and summaries
//!
//! All records serialize to camelCase JSON with 1-based indices.

pub mod error;
pub mod prize;
pub mod results;

pub use error::*;
pub use prize::*;
pub use results::*;
