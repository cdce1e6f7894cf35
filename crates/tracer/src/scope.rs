use std::cell::RefCell;
use std::rc::Rc;

use evmcheats_state::Address;

/// The one piece of frame state that is only valid from the frame's first
/// opcode onward: caller identity and callee storage only become
/// observable once the frame actually begins executing.
///
/// `Scope` is shared (`Rc<RefCell<..>>`), not copied, because `prank` and
/// `prankHere` mutate a *live* frame's caller address in place so that the
/// running bytecode observes the new `msg.sender` the next time it reads it
/// — a value copy captured at `onOpcode` time would not do that.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScopeData {
    /// `msg.sender` for the executing call.
    pub caller: Address,
    /// The address whose storage this frame operates on (`address(this)`).
    pub contract_address: Address,
    /// The address whose code is executing — differs from
    /// `contract_address` under `DELEGATECALL`.
    pub code_address: Address,
}

pub type Scope = Rc<RefCell<ScopeData>>;

pub fn new_scope(caller: Address, contract_address: Address, code_address: Address) -> Scope {
    Rc::new(RefCell::new(ScopeData {
        caller,
        contract_address,
        code_address,
    }))
}
