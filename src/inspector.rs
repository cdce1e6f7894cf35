use std::cell::RefCell;
use std::rc::Rc;

use evmcheats_precompile::{CheatsCtxt, Contract, PrecompileOutcome};
use evmcheats_state::{
    sentinel_code, Address, ChainHost, CheatcodeConfig, StateDb, CHEATCODE_ADDRESS,
    CONSOLE_LOG_ADDRESS,
};
use evmcheats_tracer::{CallType, FrameError, Tracer};

/// Installs the sentinel bytecode both reserved addresses need in genesis
/// so that Solidity's `extcodesize` guard on external calls does not treat
/// them as empty accounts.
pub fn install_reserved_addresses<H: StateDb>(db: &mut H) -> Result<(), H::Error> {
    db.set_code(CHEATCODE_ADDRESS, sentinel_code())?;
    db.set_code(CONSOLE_LOG_ADDRESS, sentinel_code())?;
    Ok(())
}

/// Ties the [`Tracer`] and the two cheat-code [`Contract`]s together into
/// the single object a host EVM drives: lifecycle callbacks pass straight
/// through to the tracer, and [`CheatcodeInspector::call`] is the one
/// entry point the host needs for routing a call to either reserved
/// address through the dispatcher.
pub struct CheatcodeInspector<H: ChainHost + 'static> {
    pub tracer: Tracer,
    host: Rc<RefCell<H>>,
    config: CheatcodeConfig,
    cheats: Contract<H>,
    console: Contract<H>,
}

impl<H: ChainHost + 'static> CheatcodeInspector<H> {
    pub fn new(host: Rc<RefCell<H>>, config: CheatcodeConfig) -> Self {
        Self {
            tracer: Tracer::new(),
            host,
            config,
            cheats: evmcheats_cheatcodes::build_cheats_contract(),
            console: evmcheats_cheatcodes::build_console_log_contract(),
        }
    }

    pub fn config(&self) -> &CheatcodeConfig {
        &self.config
    }

    /// Whether `to` is one of the two reserved addresses this inspector
    /// answers to — the host EVM should consult this before actually
    /// running the sentinel bytecode at either address.
    pub fn handles(&self, to: Address) -> bool {
        self.config.cheatcodes_enabled && (to == CHEATCODE_ADDRESS || to == CONSOLE_LOG_ADDRESS)
    }

    pub fn on_tx_start(&mut self, from: Address, gas_limit: u64) {
        self.tracer.on_tx_start(from, gas_limit);
    }

    pub fn on_tx_end(&mut self) {
        self.tracer.on_tx_end();
    }

    pub fn on_enter(&mut self, depth: usize, call_type: CallType) {
        self.tracer.on_enter(depth, call_type);
    }

    #[allow(clippy::too_many_arguments)]
    pub fn on_opcode(
        &mut self,
        pc: u64,
        op: u8,
        scope_caller: Address,
        scope_contract_address: Address,
        scope_code_address: Address,
        return_data: evmcheats_state::Bytes,
        depth: usize,
        err: Option<FrameError>,
    ) {
        self.tracer.on_opcode(
            pc,
            op,
            scope_caller,
            scope_contract_address,
            scope_code_address,
            return_data,
            depth,
            err,
        );
    }

    pub fn on_exit(
        &mut self,
        depth: usize,
        return_data: evmcheats_state::Bytes,
        err: Option<FrameError>,
    ) {
        self.tracer.on_exit(depth, return_data, err);
    }

    /// Routes `input` to whichever reserved-address contract `to` names,
    /// through that contract's dispatcher. Returns `None` when `to` is not
    /// a reserved address or cheat codes are disabled — the host should
    /// fall through to ordinary bytecode execution in that case.
    ///
    /// A dispatcher-level ABI decode/encode failure is logged and
    /// surfaced as an empty-payload revert rather than propagated, since
    /// none of this layer's callers have anywhere to route a hard error to.
    pub fn call(&mut self, to: Address, input: &[u8]) -> Option<PrecompileOutcome> {
        if !self.config.cheatcodes_enabled {
            return None;
        }

        let contract = if to == CHEATCODE_ADDRESS {
            &self.cheats
        } else if to == CONSOLE_LOG_ADDRESS {
            &self.console
        } else {
            return None;
        };

        let caller = self
            .tracer
            .previous_frame()
            .and_then(|frame| frame.scope.as_ref())
            .map(|scope| scope.borrow().caller)
            .unwrap_or_default();

        let mut ccx = CheatsCtxt {
            tracer: &mut self.tracer,
            host: self.host.clone(),
            config: &self.config,
            caller,
        };

        match contract.run(&mut ccx, input) {
            Ok(outcome) => Some(outcome),
            Err(err) => {
                tracing::error!(contract = contract.name, %err, "cheat-code dispatch failed");
                Some(PrecompileOutcome::Revert(Vec::new()))
            }
        }
    }
}
