use evmcheats_state::{Address, Bytes};

use crate::frame::{CallType, FrameError, FrameRecord};
use crate::hook::Direction;
use crate::results::{panic_payload, TxOutcome, TxResults};
use crate::scope::{new_scope, Scope};

/// Minimal capture of the transaction-start environment. The full
/// transaction/VM context is a collaborator of the host EVM and out of
/// scope here; only the fields cheat-code handlers actually read are kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VmContext {
    pub from: Address,
    pub gas_limit: u64,
}

/// Consumes the EVM's lifecycle callbacks and maintains the stack of
/// [`FrameRecord`]s.
///
/// None of these callbacks can fail: violating the invariants below (e.g.
/// an `on_exit` with no matching `on_enter`) is a programmer error in the
/// host EVM and is asserted, not propagated, rather than surfaced as a
/// recoverable error.
#[derive(Default)]
pub struct Tracer {
    depth: usize,
    frames: Vec<FrameRecord>,
    results: Option<TxResults>,
    vm_context: Option<VmContext>,
}

impl Tracer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn vm_context(&self) -> Option<&VmContext> {
        self.vm_context.as_ref()
    }

    /// The frame at the current depth, i.e. the frame the cheat-code call
    /// itself is executing in. `None` before the first `on_enter` of a
    /// transaction.
    pub fn current_frame(&mut self) -> Option<&mut FrameRecord> {
        self.frames.last_mut()
    }

    /// The frame that invoked the current one — where most observable
    /// cheat-code effects (`warp`, `prank`, ...) install their hooks, since
    /// the cheat-code call's own frame exits before its caller does.
    pub fn previous_frame(&mut self) -> Option<&mut FrameRecord> {
        if self.frames.len() < 2 {
            return None;
        }
        let n = self.frames.len();
        self.frames.get_mut(n - 2)
    }

    pub fn results(&self) -> Option<&TxResults> {
        self.results.as_ref()
    }

    pub fn results_mut(&mut self) -> &mut TxResults {
        self.results.get_or_insert_with(TxResults::new)
    }

    /// `onTxStart`.
    pub fn on_tx_start(&mut self, from: Address, gas_limit: u64) {
        self.depth = 0;
        self.frames.clear();
        self.results = Some(TxResults::new());
        self.vm_context = Some(VmContext { from, gas_limit });
    }

    /// `onTxEnd` — a no-op by design; the outer layer reads
    /// [`Tracer::results`] directly.
    pub fn on_tx_end(&mut self) {}

    /// `onEnter`.
    ///
    /// Does *not* run `onNextFrameEnter` hooks here: scope is not valid
    /// until the child's first opcode.
    pub fn on_enter(&mut self, depth: usize, _call_type: CallType) {
        if depth == 0 {
            self.depth = 0;
            self.frames.push(FrameRecord::new());
            return;
        }

        assert!(
            !self.frames.is_empty(),
            "on_enter at depth > 0 with no parent frame — host EVM invariant violated"
        );

        let mut child = FrameRecord::new();
        {
            let parent = self
                .frames
                .last_mut()
                .expect("checked non-empty above");
            let seed = parent.on_next_frame_exit_restore.take();
            child.on_frame_exit_restore.push_all(seed);
        }
        self.frames.push(child);
        self.depth = depth;
    }

    /// `onOpcode`. `scope` is constructed by the caller (the host EVM
    /// adapter) from whatever live handle it has into the interpreter's
    /// execution context; the tracer only stores it.
    #[allow(clippy::too_many_arguments)]
    pub fn on_opcode(
        &mut self,
        pc: u64,
        op: u8,
        scope_caller: Address,
        scope_contract_address: Address,
        scope_code_address: Address,
        return_data: Bytes,
        depth: usize,
        err: Option<FrameError>,
    ) {
        {
            let frame = self
                .frames
                .last_mut()
                .expect("on_opcode with no active frame — host EVM invariant violated");
            // Constructed once, on the frame's first opcode, and reused for
            // every later opcode of the *same* frame: a frame's caller never
            // legitimately changes mid-frame, so the only writer of an
            // existing `Scope` is a cheat-code hook (`prank`/`prankHere`),
            // and those mutations must stay visible to this frame's later
            // opcodes rather than being clobbered by a freshly built one.
            if frame.scope.is_none() {
                frame.scope = Some(new_scope(scope_caller, scope_contract_address, scope_code_address));
            }
            frame.pc = pc;
            frame.op = op;
            frame.return_data = return_data;
            frame.err = err;
        }

        if depth > 0 {
            let parent_idx = self.frames.len() - 2;
            let (head, tail) = self.frames.split_at_mut(parent_idx + 1);
            let parent = &mut head[parent_idx];
            let child = tail
                .last_mut()
                .expect("child frame pushed by on_enter before its first opcode");
            let scope = child
                .scope
                .clone()
                .expect("child scope set just above, unconditionally");
            parent
                .on_next_frame_enter
                .execute(&scope, &mut child.on_frame_exit_restore);
        }
    }

    /// `onExit`.
    pub fn on_exit(
        &mut self,
        depth: usize,
        return_data: Bytes,
        err: Option<FrameError>,
    ) {
        assert!(
            !self.frames.is_empty(),
            "on_exit with no active frame — host EVM invariant violated"
        );

        {
            let frame = self.frames.last_mut().expect("checked non-empty above");
            frame.return_data = return_data;
            frame.err = err.clone();
        }

        self.frames
            .last_mut()
            .expect("checked non-empty above")
            .on_frame_exit_restore
            .execute(Direction::Reverse, true);

        if depth == 0 {
            let mut frame = self.frames.pop().expect("checked non-empty above");
            frame
                .on_top_frame_exit_restore
                .execute(Direction::Reverse, true);

            if err.is_none() {
                let hooks = frame.on_chain_revert_restore.take();
                self.results_mut().on_chain_revert_hooks.extend(hooks);
            } else {
                frame
                    .on_chain_revert_restore
                    .execute(Direction::Reverse, true);
            }
            self.depth = 0;
            return;
        }

        let mut frame = self.frames.pop().expect("checked non-empty above");
        if err.is_none() {
            let top_hooks = frame.on_top_frame_exit_restore.take();
            let revert_hooks = frame.on_chain_revert_restore.take();
            let parent = self
                .frames
                .last_mut()
                .expect("non-top frame exit with no parent — host EVM invariant violated");
            parent.on_top_frame_exit_restore.push_all(top_hooks);
            parent.on_chain_revert_restore.push_all(revert_hooks);
        } else {
            // Nothing is propagated upward on an erroring exit: both
            // unconditional per-frame cleanup stacks run here instead of
            // being handed to the parent.
            frame
                .on_top_frame_exit_restore
                .execute(Direction::Reverse, true);
            frame
                .on_chain_revert_restore
                .execute(Direction::Reverse, true);
        }
        self.depth = depth.saturating_sub(1);
    }

    /// Overrides the current transaction's outcome with a synthetic
    /// `Panic(1)` revert, for expectation failures discovered after the
    /// triggering call already returned successfully.
    pub fn throw_assertion_error(&mut self) {
        self.results_mut().outcome = Some(TxOutcome::Reverted {
            data: panic_payload(1),
        });
    }
}
