//! JSON tool interface for request handlers
//!
//! Request layers (HTTP handlers, form parsers, agent runtimes) hand the
//! engine a JSON mapping and get JSON back through the [`Tool`] trait.

pub mod tool;
pub mod valuation;

pub use tool::Tool;
pub use valuation::ValuationTool;
