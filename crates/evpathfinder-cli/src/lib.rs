//! EV pathfinder CLI library.
//!
//! This crate provides the output formatting used by the `evpathfinder-cli`
//! binary so it can be exercised independently of argument parsing.

pub mod output;
