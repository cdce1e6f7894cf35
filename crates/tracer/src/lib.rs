//! The call-frame tracer: an EVM lifecycle consumer that maintains a stack
//! of per-frame records and drives deferred "hooks" at exactly the events
//! their name promises.

mod frame;
mod hook;
mod results;
mod scope;
mod tracer;

pub use frame::{CallType, FrameError, FrameRecord};
pub use hook::{Direction, Hook, HookStack, OnEnterHook, OnEnterHookStack};
pub use results::{panic_payload, TxOutcome, TxResults};
pub use scope::{new_scope, Scope, ScopeData};
pub use tracer::{Tracer, VmContext};
