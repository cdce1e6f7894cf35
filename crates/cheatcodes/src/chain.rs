//! Mutations of the pending chain config that outlive the current
//! transaction, restored only on a chain revert via
//! `currentFrame.onChainRevertRestore`.

use std::rc::Rc;

use alloy_dyn_abi::DynSolValue;
use evmcheats_precompile::{CheatsCtxt, HandlerResult};
use evmcheats_state::ChainHost;

use crate::error::revert;

/// `chainId(uint256 newChainId)`.
///
/// Unlike the block-context cheats, the restore hook goes on
/// `onChainRevertRestore`, not `onTopFrameExitRestore`: the chain id change
/// is meant to persist across the rest of this transaction *and* subsequent
/// transactions in the same block, surviving until the block itself is
/// reverted by the outer chain layer.
pub fn chain_id<H: ChainHost + 'static>(
    ccx: &mut CheatsCtxt<'_, H>,
    args: &[DynSolValue],
) -> HandlerResult {
    let (value, _) = args[0].as_uint().ok_or_else(|| revert("chainId: expected uint256"))?;
    let new_chain_id: u64 = value
        .try_into()
        .map_err(|_| revert("chainId: chain id exceeds u64 range"))?;

    let original = ccx.host.borrow().chain_id();
    ccx.host.borrow_mut().set_chain_id(new_chain_id);

    let host = ccx.host.clone();
    ccx.tracer
        .current_frame()
        .expect("chainId dispatched from within a precompile call frame")
        .on_chain_revert_restore
        .push(Rc::new(move || host.borrow_mut().set_chain_id(original)));

    Ok(vec![])
}
