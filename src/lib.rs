//! rstree: explore rooted trees from the terminal.
//!
//! Traversal ranks, shortest paths, balance diagnosis and max-heap conversion
//! over JSON trees, with a layered architecture:
//!
//! - `domain`: tree model and pure algorithms
//! - `application`: session and view state
//! - `infrastructure`: tree sources and dependency wiring
//! - `cli`: argument parsing and command dispatch

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
