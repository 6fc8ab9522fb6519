// textprobe/src/lib.rs
//! # textprobe CLI Application
//!
//! Command-line front end for the `textprobe-core` evaluation engine. It builds
//! a probe object from a YAML file or inline flags, runs it against the local
//! filesystem and prints the collected object as JSON.

pub mod cli;
pub mod commands;
pub mod logger;
