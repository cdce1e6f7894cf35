//! The cheat-code execution layer of an in-process EVM fuzzing harness: a
//! call-frame tracer, a precompile dispatcher, and the cheat-code
//! catalogue those two drive, wired into one [`CheatcodeInspector`] a host
//! EVM can embed.
//!
//! The four library crates this workspace is split into each own one axis
//! of the problem:
//!
//! - [`evmcheats_state`] — the collaborator contracts (`StateDb`,
//!   `BlockContext`, `ChainConfig`, `ChainHost`, `CheatcodeConfig`, the
//!   reserved addresses).
//! - [`evmcheats_tracer`] — the call-frame tracer and its hook stacks.
//! - [`evmcheats_precompile`] — selector computation and the dispatcher.
//! - [`evmcheats_cheatcodes`] — the concrete handler catalogue.

mod inspector;

pub use evmcheats_cheatcodes as cheatcodes;
pub use evmcheats_precompile as precompile;
pub use evmcheats_state as state;
pub use evmcheats_tracer as tracer;

pub use inspector::{install_reserved_addresses, CheatcodeInspector};
