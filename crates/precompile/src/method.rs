use std::rc::Rc;

use alloy_dyn_abi::{DynSolType, DynSolValue};
use alloy_primitives::keccak256;
use evmcheats_state::ChainHost;

use crate::ctxt::CheatsCtxt;

/// The 4-byte prefix of `keccak256(canonical_signature)`, the method
/// identifier every Ethereum ABI call starts with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MethodId(pub [u8; 4]);

impl MethodId {
    pub fn from_signature(name: &str, inputs: &[DynSolType]) -> Self {
        let signature = canonical_signature(name, inputs);
        let hash = keccak256(signature.as_bytes());
        let mut id = [0u8; 4];
        id.copy_from_slice(&hash[..4]);
        Self(id)
    }

    /// A fixed-endianness 32-bit table key derived from the id. Any
    /// consistent endianness works; the dispatcher still compares the full
    /// 4-byte id before invoking a handler, so a narrower key scheme could
    /// not silently misroute a call.
    pub fn table_key(self) -> u32 {
        u32::from_le_bytes(self.0)
    }
}

pub fn canonical_signature(name: &str, inputs: &[DynSolType]) -> String {
    let types = inputs
        .iter()
        .map(|t| t.sol_type_name().into_owned())
        .collect::<Vec<_>>()
        .join(",");
    format!("{name}({types})")
}

/// On success, the ABI-encodable return values. On failure, the raw bytes
/// used verbatim as the cheat-code's revert payload.
pub type HandlerResult = Result<Vec<DynSolValue>, Vec<u8>>;

pub type HandlerFn<H> = dyn Fn(&mut CheatsCtxt<'_, H>, &[DynSolValue]) -> HandlerResult;

/// One registered method on a [`crate::Contract`]: its selector, declared
/// ABI shape, and the handler closure that implements it.
pub struct Method<H: ChainHost> {
    pub name: &'static str,
    pub id: MethodId,
    pub inputs: Vec<DynSolType>,
    pub outputs: Vec<DynSolType>,
    pub handler: Rc<HandlerFn<H>>,
}

impl<H: ChainHost> Clone for Method<H> {
    fn clone(&self) -> Self {
        Self {
            name: self.name,
            id: self.id,
            inputs: self.inputs.clone(),
            outputs: self.outputs.clone(),
            handler: self.handler.clone(),
        }
    }
}

impl<H: ChainHost> std::fmt::Debug for Method<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Method")
            .field("name", &self.name)
            .field("id", &self.id)
            .finish()
    }
}
