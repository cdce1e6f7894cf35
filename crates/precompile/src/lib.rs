//! The cheat-code precompile dispatcher: for each reserved address, a map
//! from 4-byte selector to handler, ABI decoding of inputs, handler
//! invocation, and ABI encoding of outputs or the revert payload.

mod contract;
mod ctxt;
mod error;
mod method;

pub use alloy_dyn_abi::{DynSolType, DynSolValue};
pub use contract::{Contract, PrecompileOutcome};
pub use ctxt::CheatsCtxt;
pub use error::DispatchError;
pub use method::{canonical_signature, HandlerFn, HandlerResult, Method, MethodId};
