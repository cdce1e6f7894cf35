use std::rc::Rc;

use crate::scope::Scope;

/// A deferred, no-argument closure scheduled on a [`HookStack`].
///
/// The tracer runs entirely on the EVM's single logical thread, so hooks
/// are `Rc`, not `Arc`: there is never a second thread to share them with,
/// and `Rc<RefCell<..>>` captures (e.g. a [`crate::Scope`] handle) are the
/// natural way to let a hook reach back into live frame state.
pub type Hook = Rc<dyn Fn()>;

/// Which end of the stack [`HookStack::execute`] starts from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Index 0 first — used for `onNextFrameEnter`.
    Forward,
    /// Last index first — used for the four `*ExitRestore` stacks, so that
    /// cleanup unwinds in the reverse order mutations were applied.
    Reverse,
}

/// An ordered collection of deferred closures.
///
/// `push` appends in O(1). `execute` clones the current list, optionally
/// empties the stack *before* invoking anything, then runs each cloned
/// entry. Cloning before execution (rather than draining) is what lets a
/// handler safely call `push` on the very stack it is being run from: the
/// newly pushed hook lands in the post-clear stack and is simply not part of
/// this execution's snapshot, so it runs on a later cycle instead of
/// recursing into this one.
#[derive(Default)]
pub struct HookStack(Vec<Hook>);

impl HookStack {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn push(&mut self, hook: Hook) {
        self.0.push(hook);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Appends every hook from `other` onto `self`, preserving order. Used
    /// to propagate `onTopFrameExitRestore`/`onChainRevertRestore` from a
    /// non-erroring child exit up onto the parent.
    pub fn extend_from(&mut self, other: &HookStack) {
        self.0.extend(other.0.iter().cloned());
    }

    /// Moves every hook out of `self`, leaving it empty. Used to transfer
    /// `onNextFrameExitRestore` on the parent into `onFrameExitRestore` on
    /// the newly entered child.
    pub fn take(&mut self) -> Vec<Hook> {
        std::mem::take(&mut self.0)
    }

    pub fn push_all(&mut self, hooks: Vec<Hook>) {
        self.0.extend(hooks);
    }

    /// Runs every hook currently on the stack, in `direction` order.
    ///
    /// If `clear` is true the stack is emptied *before* any hook runs, so
    /// hooks that push new entries onto this same stack during execution
    /// are left in place for a future cycle rather than being wiped by this
    /// call's own clear.
    pub fn execute(&mut self, direction: Direction, clear: bool) {
        if self.0.is_empty() {
            return;
        }
        let snapshot = self.0.clone();
        if clear {
            self.0.clear();
        }
        tracing::trace!(count = snapshot.len(), ?direction, clear, "executing hook stack");
        match direction {
            Direction::Forward => {
                for hook in snapshot.iter() {
                    hook();
                }
            }
            Direction::Reverse => {
                for hook in snapshot.iter().rev() {
                    hook();
                }
            }
        }
    }
}

impl std::fmt::Debug for HookStack {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HookStack").field("len", &self.0.len()).finish()
    }
}

/// A hook scheduled on `onNextFrameEnter`.
///
/// This is the one hook stack whose closures take parameters instead of
/// none: `onNextFrameEnter` exists precisely to act at the moment a child's
/// [`Scope`] first becomes valid, and the child frame does not exist yet
/// when the hook is installed (the parent installs it before the child is
/// ever entered). A plain `Rc<dyn Fn()>` has nothing to close over for
/// "the child that doesn't exist yet"; passing the scope and the child's
/// `onFrameExitRestore` stack in at fire time is what lets `prank` read the
/// child's caller, overwrite it, and queue its own restoral without the
/// tracer handing out `&mut Tracer` itself (which the caller — `on_opcode`
/// — cannot re-lend while it is already borrowed).
pub type OnEnterHook = Rc<dyn Fn(&Scope, &mut HookStack)>;

/// Hook stack backing `onNextFrameEnter`. Always forward order, always
/// cleared after firing — no variation on this stack's scheduling.
#[derive(Default)]
pub struct OnEnterHookStack(Vec<OnEnterHook>);

impl OnEnterHookStack {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn push(&mut self, hook: OnEnterHook) {
        self.0.push(hook);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Runs every hook, forward order, against `scope` and the child's
    /// `exit_restore` stack, clearing first so a hook that reinstalls
    /// itself runs on a later child instead of recursing into this one.
    pub fn execute(&mut self, scope: &Scope, exit_restore: &mut HookStack) {
        if self.0.is_empty() {
            return;
        }
        let snapshot = std::mem::take(&mut self.0);
        tracing::trace!(count = snapshot.len(), "executing onNextFrameEnter hooks");
        for hook in snapshot.iter() {
            hook(scope, exit_restore);
        }
    }
}

impl std::fmt::Debug for OnEnterHookStack {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OnEnterHookStack").field("len", &self.0.len()).finish()
    }
}
