//! Maskpack CLI - command-line front-end for the channel transform core.
//!
//! The core in `maskpack-core` is pure and does no I/O; this crate supplies
//! the two collaborators around it: a file codec (PNG and OpenEXR) and the
//! `pack` / `unpack` / `check` subcommands.

pub mod codec;
pub mod commands;
