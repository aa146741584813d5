//! Core types and definitions for the BRIGADE fire-response simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! geometric types, commands, state snapshots, events, input records and
//! constants. It has no dependency on any rendering or runtime framework.

pub mod commands;
pub mod constants;
pub mod enums;
pub mod events;
pub mod records;
pub mod state;
pub mod types;

#[cfg(test)]
mod tests;
