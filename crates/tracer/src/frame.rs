use evmcheats_state::Bytes;

use crate::hook::{HookStack, OnEnterHookStack};
use crate::scope::Scope;

/// How a call frame was entered. Mirrors the EVM's own call-type taxonomy
/// (`CALL`/`CALLCODE`/`DELEGATECALL`/`STATICCALL`/`CREATE`/`CREATE2`); the
/// top-level (depth 0) frame is entered as a plain [`CallType::Call`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallType {
    Call,
    CallCode,
    DelegateCall,
    StaticCall,
    Create,
    Create2,
}

/// The error condition a frame exited with, as reported by the host EVM.
/// The tracer does not interpret this beyond "erroring or not"; the payload
/// is kept only so catalogue code (e.g. `ThrowAssertionError`) can inspect
/// or override it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrameError {
    Reverted(Bytes),
    Halted(String),
}

/// Per-call-frame mutable state.
///
/// Exactly one record exists per active depth; it is appended on
/// frame-enter and popped on the matching exit. `pc`/`op`/`scope`/
/// `return_data`/`err` are populated from opcode and exit callbacks only —
/// reading them before the frame's first opcode observes stale (empty)
/// values, which is why `scope` is only valid from the frame's first
/// opcode onward.
#[derive(Default)]
pub struct FrameRecord {
    pub pc: u64,
    pub op: u8,
    pub scope: Option<Scope>,
    pub return_data: Bytes,
    pub err: Option<FrameError>,

    /// Fires on the *next* child frame's first opcode; forward order,
    /// cleared after running. Takes the child's [`Scope`] and its
    /// `onFrameExitRestore` stack as parameters (see [`OnEnterHookStack`]).
    pub on_next_frame_enter: OnEnterHookStack,
    /// Seed for the next child's `onFrameExitRestore`; moved over (not
    /// copied) the instant that child is entered.
    pub on_next_frame_exit_restore: HookStack,
    /// Fires unconditionally when this frame exits, for any reason; reverse
    /// order, cleared after running.
    pub on_frame_exit_restore: HookStack,
    /// Transaction-scoped cleanup; reverse order. Propagated to the parent
    /// on a non-erroring exit at depth > 0, executed in place at depth 0.
    pub on_top_frame_exit_restore: HookStack,
    /// Survives transaction commit; reverse order. Propagated to the parent
    /// on a non-erroring exit, executed immediately on an erroring exit,
    /// otherwise published into the transaction results at depth 0.
    pub on_chain_revert_restore: HookStack,
}

impl FrameRecord {
    pub fn new() -> Self {
        Self::default()
    }
}

impl std::fmt::Debug for FrameRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FrameRecord")
            .field("pc", &self.pc)
            .field("op", &self.op)
            .field("has_scope", &self.scope.is_some())
            .field("err", &self.err)
            .finish()
    }
}
