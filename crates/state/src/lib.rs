//! Trait boundary between the cheat-code layer and the host EVM it rides on.
//!
//! Everything in this crate describes a *collaborator*: the EVM interpreter,
//! its state database, and the pending block/chain context are explicitly
//! out of scope for the cheat-code layer (see the core's system overview).
//! This crate exists only to name the shape of those collaborators so the
//! tracer, dispatcher and catalogue crates can be written against a stable
//! interface instead of a concrete EVM implementation.

mod config;
mod host;
mod reserved;

pub use alloy_primitives::{Address, Bytes, Log, B256, U256};
pub use config::CheatcodeConfig;
pub use host::{BlockContext, ChainConfig, ChainHost, StateDb};
pub use reserved::{sentinel_code, CHEATCODE_ADDRESS, CONSOLE_LOG_ADDRESS, SENTINEL_CODE};
