//! Caller-identity cheats: `prank` and `prankHere`.
//!
//! Both mutate a live [`evmcheats_tracer::Scope`]'s `caller` field in place,
//! relying on `Scope`'s `Rc<RefCell<..>>` sharing so that a mutation made
//! here is the same object the running bytecode consults for `msg.sender`
//! — no copy, no propagation step.

use std::rc::Rc;

use alloy_dyn_abi::DynSolValue;
use evmcheats_precompile::{CheatsCtxt, HandlerResult};
use evmcheats_state::ChainHost;

use crate::error::revert;

/// `prank(address newCaller)`.
///
/// Installs a hook on the *previous* frame's `onNextFrameEnter`: it fires
/// exactly once, the moment that frame's next child is entered and its
/// scope becomes valid — a caller that makes two further calls only has
/// the first one see the pranked `msg.sender`, because `onNextFrameEnter`
/// always runs forward-and-cleared.
pub fn prank<H: ChainHost>(ccx: &mut CheatsCtxt<'_, H>, args: &[DynSolValue]) -> HandlerResult {
    let new_caller = args[0].as_address().ok_or_else(|| revert("prank: expected address"))?;

    let previous = ccx
        .tracer
        .previous_frame()
        .ok_or_else(|| revert("prank: no caller frame to install a prank on"))?;

    previous.on_next_frame_enter.push(Rc::new(move |scope, exit_restore| {
        let original = scope.borrow().caller;
        scope.borrow_mut().caller = new_caller;
        let scope = scope.clone();
        exit_restore.push(Rc::new(move || {
            scope.borrow_mut().caller = original;
        }));
    }));

    Ok(vec![])
}

/// `prankHere(address newCaller)`.
///
/// Unlike `prank`, this mutates the caller's scope *immediately*: a
/// precompile call inherits its caller's scope object (precompiles never
/// get their own `onOpcode` callback, so `prankHere`'s effect has to attach
/// to the frame that is already live). Every call the previous frame makes
/// for the rest of its lifetime observes the pranked caller, restored when
/// that frame exits.
pub fn prank_here<H: ChainHost>(ccx: &mut CheatsCtxt<'_, H>, args: &[DynSolValue]) -> HandlerResult {
    let new_caller = args[0].as_address().ok_or_else(|| revert("prankHere: expected address"))?;

    let previous = ccx
        .tracer
        .previous_frame()
        .ok_or_else(|| revert("prankHere: no caller frame to prank"))?;

    let scope = previous
        .scope
        .clone()
        .ok_or_else(|| revert("prankHere: caller frame has no valid scope yet"))?;

    let original = scope.borrow().caller;
    scope.borrow_mut().caller = new_caller;

    let restore_scope = scope.clone();
    previous.on_frame_exit_restore.push(Rc::new(move || {
        restore_scope.borrow_mut().caller = original;
    }));

    Ok(vec![])
}
