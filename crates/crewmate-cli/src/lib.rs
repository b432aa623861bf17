//! Crewmate CLI library.
//!
//! Input loading and the command implementations behind the `crewmate`
//! binary.

pub mod commands;
pub mod input;
