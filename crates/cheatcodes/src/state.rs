//! Immediate, non-reverting mutations against the state database. None of
//! these push a hook — they are applied directly and stay applied, just
//! like any other state change the tx makes.

use alloy_dyn_abi::DynSolValue;
use alloy_primitives::{B256, U256};
use evmcheats_precompile::{CheatsCtxt, HandlerResult};
use evmcheats_state::ChainHost;

use crate::error::revert;

/// `store(address target, bytes32 slot, bytes32 value)`.
pub fn store<H: ChainHost>(ccx: &mut CheatsCtxt<'_, H>, args: &[DynSolValue]) -> HandlerResult {
    let target = args[0].as_address().ok_or_else(|| revert("store: expected address"))?;
    let slot = args[1]
        .as_fixed_bytes()
        .ok_or_else(|| revert("store: expected bytes32 slot"))?
        .0;
    let value = args[2]
        .as_fixed_bytes()
        .ok_or_else(|| revert("store: expected bytes32 value"))?
        .0;
    let slot = U256::from_be_slice(slot);
    let value = U256::from_be_slice(value);

    ccx.host
        .borrow_mut()
        .set_storage(target, slot, value)
        .map_err(|e| revert(format!("store: state database error: {e:?}")))?;
    Ok(vec![])
}

/// `load(address target, bytes32 slot) -> bytes32`.
pub fn load<H: ChainHost>(ccx: &mut CheatsCtxt<'_, H>, args: &[DynSolValue]) -> HandlerResult {
    let target = args[0].as_address().ok_or_else(|| revert("load: expected address"))?;
    let slot = args[1]
        .as_fixed_bytes()
        .ok_or_else(|| revert("load: expected bytes32 slot"))?
        .0;
    let slot = U256::from_be_slice(slot);

    let value = ccx
        .host
        .borrow_mut()
        .get_storage(target, slot)
        .map_err(|e| revert(format!("load: state database error: {e:?}")))?;
    Ok(vec![DynSolValue::FixedBytes(B256::from(value.to_be_bytes::<32>()), 32)])
}

/// `etch(address target, bytes newCode)`.
pub fn etch<H: ChainHost>(ccx: &mut CheatsCtxt<'_, H>, args: &[DynSolValue]) -> HandlerResult {
    let target = args[0].as_address().ok_or_else(|| revert("etch: expected address"))?;
    let code = args[1].as_bytes().ok_or_else(|| revert("etch: expected bytes"))?;

    ccx.host
        .borrow_mut()
        .set_code(target, code.to_vec().into())
        .map_err(|e| revert(format!("etch: state database error: {e:?}")))?;
    Ok(vec![])
}

/// `deal(address target, uint256 newBalance)`.
///
/// Mints (or burns down to) the requested balance directly — a cheat, not a
/// transfer, so there is no corresponding debit anywhere else.
pub fn deal<H: ChainHost>(ccx: &mut CheatsCtxt<'_, H>, args: &[DynSolValue]) -> HandlerResult {
    let target = args[0].as_address().ok_or_else(|| revert("deal: expected address"))?;
    let (new_balance, _) = args[1].as_uint().ok_or_else(|| revert("deal: expected uint256"))?;

    ccx.host
        .borrow_mut()
        .set_balance(target, new_balance)
        .map_err(|e| revert(format!("deal: state database error: {e:?}")))?;
    Ok(vec![])
}

/// `getNonce(address target) -> uint64`.
pub fn get_nonce<H: ChainHost>(ccx: &mut CheatsCtxt<'_, H>, args: &[DynSolValue]) -> HandlerResult {
    let target = args[0].as_address().ok_or_else(|| revert("getNonce: expected address"))?;

    let nonce = ccx
        .host
        .borrow_mut()
        .get_nonce(target)
        .map_err(|e| revert(format!("getNonce: state database error: {e:?}")))?;
    Ok(vec![DynSolValue::Uint(U256::from(nonce), 64)])
}

/// `setNonce(address target, uint64 newNonce)`.
pub fn set_nonce<H: ChainHost>(ccx: &mut CheatsCtxt<'_, H>, args: &[DynSolValue]) -> HandlerResult {
    let target = args[0].as_address().ok_or_else(|| revert("setNonce: expected address"))?;
    let (raw, _) = args[1].as_uint().ok_or_else(|| revert("setNonce: expected uint64"))?;
    let new_nonce: u64 = raw.try_into().map_err(|_| revert("setNonce: nonce exceeds u64 range"))?;

    ccx.host
        .borrow_mut()
        .set_nonce(target, new_nonce)
        .map_err(|e| revert(format!("setNonce: state database error: {e:?}")))?;
    Ok(vec![])
}

/// `snapshot() -> uint256`. Delegates straight to the state database's
/// snapshot API and surfaces the returned handle unchanged.
pub fn snapshot<H: ChainHost>(ccx: &mut CheatsCtxt<'_, H>, _args: &[DynSolValue]) -> HandlerResult {
    let id = ccx.host.borrow_mut().snapshot();
    Ok(vec![DynSolValue::Uint(id, 256)])
}

/// `revertTo(uint256 snapshotId) -> bool`. Always returns `true`: an
/// unknown or already-consumed id is the caller's mistake, not a
/// reportable failure.
pub fn revert_to<H: ChainHost>(ccx: &mut CheatsCtxt<'_, H>, args: &[DynSolValue]) -> HandlerResult {
    let (id, _) = args[0].as_uint().ok_or_else(|| revert("revertTo: expected uint256"))?;
    let ok = ccx.host.borrow_mut().revert_to(id);
    Ok(vec![DynSolValue::Bool(ok)])
}
