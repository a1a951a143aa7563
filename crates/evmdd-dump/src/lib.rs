//! Graphviz/DOT export for EVMDDs, plus (optionally) launching a local
//! viewer on the result.
//!
//! Grounded in `oxidd-dump`'s `visualize` entry point (a single function
//! taking a manager and the edges to render) and in the reference
//! `GraphvizWriter`/`EvmddVisualizer` pair this domain's original
//! implementation uses: one module builds the DOT text, the other hands it
//! to an external tool.
//!
#![doc = document_features::document_features!()]
#![warn(missing_docs)]

#[cfg(feature = "dot")]
mod dot;
#[cfg(feature = "view")]
mod viewer;

#[cfg(feature = "dot")]
pub use dot::to_dot;
#[cfg(feature = "view")]
pub use viewer::{visualize, ViewError};
