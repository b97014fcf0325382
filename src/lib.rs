//! Logbook - command-line toolbox with session-correlated structured logging
//!
//! This library provides the core functionality for the logbook binary: the
//! session-scoped logging subsystem and the thin command bodies around it.

pub mod cli;
pub mod commands;
pub mod config;
pub mod logging;
