use std::cell::RefCell;
use std::rc::Rc;

use evmcheats_state::{Address, CheatcodeConfig, ChainHost};
use evmcheats_tracer::Tracer;

/// Everything a cheat-code handler needs, bundled into a single borrow.
///
/// The tracer is reachable directly as `&mut Tracer`: the dispatcher
/// receives it from the caller at `run` time and threads it through as an
/// explicit parameter, good enough for every handler that only needs to
/// read or install hooks on the *current* or *previous* frame right now.
/// The host, by contrast, also needs to be reachable *later* — a restore
/// hook captures it inside an `Rc<dyn Fn()>` that fires on some future
/// frame-exit, long after this `CheatsCtxt` has been dropped. `Rc<RefCell<H>>`
/// (interior mutability on a single-threaded handle) is what makes that
/// legal: the restore hook clones the `Rc` and borrows it only when it
/// actually fires, by which point this dispatch's own borrow has already
/// ended.
pub struct CheatsCtxt<'a, H: ChainHost> {
    pub tracer: &'a mut Tracer,
    pub host: Rc<RefCell<H>>,
    pub config: &'a CheatcodeConfig,
    /// The address that invoked the cheat-code precompile — i.e. the
    /// caller recorded in the previous frame's scope, the frame where most
    /// observable effects must be installed.
    pub caller: Address,
}
