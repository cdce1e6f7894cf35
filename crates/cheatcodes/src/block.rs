//! Transient mutations of the pending block context, restored at the
//! enclosing top-level frame's exit via `currentFrame.onTopFrameExitRestore`.

use std::rc::Rc;

use alloy_dyn_abi::DynSolValue;
use alloy_primitives::B256;
use evmcheats_precompile::{CheatsCtxt, HandlerResult};
use evmcheats_state::ChainHost;

use crate::error::revert;

/// `warp(uint256 newTimestamp)`.
///
/// Guarded against timestamps outside `u64`'s range: the pending block
/// context only has a `u64` timestamp slot to write to,
/// so a value that doesn't fit is a deliberate revert, not a silent
/// truncation.
pub fn warp<H: ChainHost + 'static>(ccx: &mut CheatsCtxt<'_, H>, args: &[DynSolValue]) -> HandlerResult {
    let (value, _) = args[0].as_uint().ok_or_else(|| revert("warp: expected uint256"))?;
    let new_timestamp: u64 = value
        .try_into()
        .map_err(|_| revert("warp: timestamp exceeds u64 range"))?;

    let original = ccx.host.borrow().timestamp();
    ccx.host.borrow_mut().set_timestamp(new_timestamp);

    let host = ccx.host.clone();
    ccx.tracer
        .current_frame()
        .expect("warp dispatched from within a precompile call frame")
        .on_top_frame_exit_restore
        .push(Rc::new(move || host.borrow_mut().set_timestamp(original)));

    Ok(vec![])
}

/// `roll(uint256 newHeight)`.
pub fn roll<H: ChainHost + 'static>(ccx: &mut CheatsCtxt<'_, H>, args: &[DynSolValue]) -> HandlerResult {
    let (value, _) = args[0].as_uint().ok_or_else(|| revert("roll: expected uint256"))?;
    let new_height: u64 = value
        .try_into()
        .map_err(|_| revert("roll: block number exceeds u64 range"))?;

    let original = ccx.host.borrow().block_number();
    ccx.host.borrow_mut().set_block_number(new_height);

    let host = ccx.host.clone();
    ccx.tracer
        .current_frame()
        .expect("roll dispatched from within a precompile call frame")
        .on_top_frame_exit_restore
        .push(Rc::new(move || host.borrow_mut().set_block_number(original)));

    Ok(vec![])
}

/// `fee(uint256 newBasefee)`.
pub fn fee<H: ChainHost + 'static>(ccx: &mut CheatsCtxt<'_, H>, args: &[DynSolValue]) -> HandlerResult {
    let (value, _) = args[0].as_uint().ok_or_else(|| revert("fee: expected uint256"))?;
    let new_fee: u64 = value
        .try_into()
        .map_err(|_| revert("fee: base fee exceeds u64 range"))?;

    let original = ccx.host.borrow().base_fee();
    ccx.host.borrow_mut().set_base_fee(new_fee);

    let host = ccx.host.clone();
    ccx.tracer
        .current_frame()
        .expect("fee dispatched from within a precompile call frame")
        .on_top_frame_exit_restore
        .push(Rc::new(move || host.borrow_mut().set_base_fee(original)));

    Ok(vec![])
}

/// `difficulty(uint256 newDifficulty)`.
///
/// Writes the post-Paris `RANDOM`/`PREVRANDAO` slot only: the pre-Paris
/// `Difficulty` field is never touched, matching the current upstream
/// design rather than older revisions that wrote both.
pub fn difficulty<H: ChainHost + 'static>(
    ccx: &mut CheatsCtxt<'_, H>,
    args: &[DynSolValue],
) -> HandlerResult {
    let (value, _) = args[0]
        .as_uint()
        .ok_or_else(|| revert("difficulty: expected uint256"))?;
    let new_random = B256::from(value.to_be_bytes::<32>());

    let original = ccx.host.borrow().random();
    ccx.host.borrow_mut().set_random(new_random);

    let host = ccx.host.clone();
    ccx.tracer
        .current_frame()
        .expect("difficulty dispatched from within a precompile call frame")
        .on_top_frame_exit_restore
        .push(Rc::new(move || host.borrow_mut().set_random(original)));

    Ok(vec![])
}

/// `coinbase(address newCoinbase)`.
pub fn coinbase<H: ChainHost + 'static>(
    ccx: &mut CheatsCtxt<'_, H>,
    args: &[DynSolValue],
) -> HandlerResult {
    let new_coinbase = args[0]
        .as_address()
        .ok_or_else(|| revert("coinbase: expected address"))?;

    let original = ccx.host.borrow().coinbase();
    ccx.host.borrow_mut().set_coinbase(new_coinbase);

    let host = ccx.host.clone();
    ccx.tracer
        .current_frame()
        .expect("coinbase dispatched from within a precompile call frame")
        .on_top_frame_exit_restore
        .push(Rc::new(move || host.borrow_mut().set_coinbase(original)));

    Ok(vec![])
}
