use alloy_primitives::keccak256;
use evmcheats_state::{Bytes, U256};

use crate::hook::Hook;

/// The outcome of the transaction currently being traced, as understood by
/// the tracer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TxOutcome {
    Success { output: Bytes },
    /// `ExecutionReverted` with the given raw revert payload.
    Reverted { data: Bytes },
    Halted { reason: String },
}

/// Per-transaction accumulator: the execution result plus every
/// `onChainRevertRestore` hook that survived to transaction commit.
/// The outer block/chain layer (out of scope here) stores this on the
/// committed block and, on a block revert, runs `on_chain_revert_hooks` in
/// reverse order.
#[derive(Default)]
pub struct TxResults {
    pub outcome: Option<TxOutcome>,
    pub on_chain_revert_hooks: Vec<Hook>,
}

impl std::fmt::Debug for TxResults {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TxResults")
            .field("outcome", &self.outcome)
            .field("on_chain_revert_hooks", &self.on_chain_revert_hooks.len())
            .finish()
    }
}

impl TxResults {
    pub fn new() -> Self {
        Self::default()
    }
}

/// ABI-encodes `Panic(uint256)` with the given panic code, e.g. `0x01` for
/// a generic assertion failure. Used by [`crate::Tracer::throw_assertion_error`].
pub fn panic_payload(code: u8) -> Bytes {
    let selector = keccak256(b"Panic(uint256)");
    let mut out = Vec::with_capacity(36);
    out.extend_from_slice(&selector[..4]);
    out.extend_from_slice(&U256::from(code).to_be_bytes::<32>());
    Bytes::from(out)
}
