//! Pokedex CLI Library
//!
//! Exposes the response cache, the PokeAPI client, and the REPL pieces for use
//! by the binary and integration tests.

pub mod cache;
pub mod capture;
pub mod cli;
pub mod commands;
pub mod data;
pub mod repl;
