//! Toolchain detection and external command execution
//!
//! This module provides:
//! - Toolchain detection (is the compiler/package tool on PATH?)
//! - A timeout-bounded runner for the initializer and dependency-fetch commands

pub mod check;
pub mod command;

pub use check::{check_toolchain, RuntimeInfo};
pub use command::{CommandError, CommandSpec};
