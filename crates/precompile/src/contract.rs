use std::collections::HashMap;
use std::rc::Rc;

use alloy_dyn_abi::{DynSolType, DynSolValue};
use evmcheats_state::{Address, ChainHost};

use crate::ctxt::CheatsCtxt;
use crate::error::DispatchError;
use crate::method::{HandlerFn, Method, MethodId};

/// The result of running a precompile call: either the ABI-encoded return
/// tuple, or a revert payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrecompileOutcome {
    Return(Vec<u8>),
    Revert(Vec<u8>),
}

/// A cheat-code precompile: a reserved address, a display name, and a
/// method table keyed by selector.
pub struct Contract<H: ChainHost> {
    pub address: Address,
    pub name: &'static str,
    methods: HashMap<u32, Method<H>>,
}

impl<H: ChainHost> Contract<H> {
    pub fn new(address: Address, name: &'static str) -> Self {
        Self {
            address,
            name,
            methods: HashMap::new(),
        }
    }

    /// Registers a method, computing its selector from `(name, inputs)`.
    ///
    /// # Panics
    ///
    /// Panics if `name` is empty, or if a distinct method with a colliding
    /// selector is already registered — both are programmer errors that
    /// must be caught at contract-construction time.
    pub fn add_method<F>(
        &mut self,
        name: &'static str,
        inputs: Vec<DynSolType>,
        outputs: Vec<DynSolType>,
        handler: F,
    ) where
        F: Fn(&mut CheatsCtxt<'_, H>, &[DynSolValue]) -> Result<Vec<DynSolValue>, Vec<u8>> + 'static,
    {
        assert!(!name.is_empty(), "cheat-code method name must not be empty");

        let id = MethodId::from_signature(name, &inputs);
        let key = id.table_key();

        if let Some(existing) = self.methods.get(&key) {
            assert!(
                existing.id == id && existing.name == name,
                "selector collision in contract {}: {} and {} both hash to {:#010x}",
                self.name,
                existing.name,
                name,
                key
            );
        }

        let handler: Rc<HandlerFn<H>> = Rc::new(handler);
        self.methods.insert(
            key,
            Method {
                name,
                id,
                inputs,
                outputs,
                handler,
            },
        );
    }

    /// Cheat codes are free.
    pub fn required_gas(&self, _input: &[u8]) -> u64 {
        0
    }

    /// Decodes the selector, looks up the method, ABI-decodes the
    /// arguments, runs the handler, and ABI-encodes the result.
    pub fn run(
        &self,
        ccx: &mut CheatsCtxt<'_, H>,
        input: &[u8],
    ) -> Result<PrecompileOutcome, DispatchError> {
        if input.len() < 4 {
            return Ok(PrecompileOutcome::Revert(Vec::new()));
        }

        let mut raw_id = [0u8; 4];
        raw_id.copy_from_slice(&input[..4]);
        let key = u32::from_le_bytes(raw_id);

        let Some(method) = self.methods.get(&key) else {
            tracing::warn!(contract = self.name, selector = ?raw_id, "unknown cheat-code selector");
            return Ok(PrecompileOutcome::Revert(Vec::new()));
        };

        if method.id.0 != raw_id {
            return Ok(PrecompileOutcome::Revert(Vec::new()));
        }

        let tail = &input[4..];
        let tuple_ty = DynSolType::Tuple(method.inputs.clone());
        let decoded = tuple_ty
            .abi_decode_params(tail)
            .map_err(|e| DispatchError::AbiDecode(e.to_string()))?;
        let args = match decoded {
            DynSolValue::Tuple(values) => values,
            other => vec![other],
        };

        match (method.handler)(ccx, &args) {
            Ok(values) => {
                let out_tuple = DynSolValue::Tuple(values);
                let encoded = out_tuple.abi_encode_params();
                Ok(PrecompileOutcome::Return(encoded))
            }
            Err(revert_data) => Ok(PrecompileOutcome::Revert(revert_data)),
        }
    }
}

impl<H: ChainHost> std::fmt::Debug for Contract<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Contract")
            .field("address", &self.address)
            .field("name", &self.name)
            .field("methods", &self.methods.len())
            .finish()
    }
}
