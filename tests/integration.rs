//! End-to-end exercises of the cheat-code layer's concrete scenarios,
//! driven through [`evmcheats::CheatcodeInspector`] against an in-memory
//! [`MockHost`] the way a real EVM would drive it: `on_tx_start` →
//! `on_enter` → `on_opcode`* → [`CheatcodeInspector::call`] for any
//! reserved address → `on_exit`.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use alloy_dyn_abi::{DynSolType, DynSolValue};
use alloy_primitives::{address, U256};

use evmcheats::precompile::{MethodId, PrecompileOutcome};
use evmcheats::state::{
    Address, BlockContext, Bytes, ChainConfig, CheatcodeConfig, StateDb, B256,
};
use evmcheats::tracer::{CallType, FrameError};
use evmcheats::CheatcodeInspector;

/// Routes this crate's `tracing` output (hook-stack execution, ffi
/// invocations, dispatch failures) to stdout under `RUST_LOG`, the same way
/// a fuzzing harness would wire up a collector. `try_init` so running
/// several tests in one process doesn't panic on the second call.
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

#[derive(Default)]
struct MockHost {
    storage: HashMap<(Address, U256), U256>,
    code: HashMap<Address, Bytes>,
    nonces: HashMap<Address, u64>,
    balances: HashMap<Address, U256>,
    logs: Vec<evmcheats::state::Log>,
    next_snapshot: u64,

    chain_id: u64,
    timestamp: u64,
    block_number: u64,
    base_fee: u64,
    random: B256,
    coinbase: Address,
}

impl StateDb for MockHost {
    type Error = std::convert::Infallible;

    fn get_storage(&mut self, address: Address, slot: U256) -> Result<U256, Self::Error> {
        Ok(*self.storage.get(&(address, slot)).unwrap_or(&U256::ZERO))
    }
    fn set_storage(&mut self, address: Address, slot: U256, value: U256) -> Result<(), Self::Error> {
        self.storage.insert((address, slot), value);
        Ok(())
    }
    fn get_code(&mut self, address: Address) -> Result<Bytes, Self::Error> {
        Ok(self.code.get(&address).cloned().unwrap_or_default())
    }
    fn set_code(&mut self, address: Address, code: Bytes) -> Result<(), Self::Error> {
        self.code.insert(address, code);
        Ok(())
    }
    fn get_nonce(&mut self, address: Address) -> Result<u64, Self::Error> {
        Ok(*self.nonces.get(&address).unwrap_or(&0))
    }
    fn set_nonce(&mut self, address: Address, nonce: u64) -> Result<(), Self::Error> {
        self.nonces.insert(address, nonce);
        Ok(())
    }
    fn get_balance(&mut self, address: Address) -> Result<U256, Self::Error> {
        Ok(*self.balances.get(&address).unwrap_or(&U256::ZERO))
    }
    fn set_balance(&mut self, address: Address, balance: U256) -> Result<(), Self::Error> {
        self.balances.insert(address, balance);
        Ok(())
    }
    fn snapshot(&mut self) -> U256 {
        let id = self.next_snapshot;
        self.next_snapshot += 1;
        U256::from(id)
    }
    fn revert_to(&mut self, _id: U256) -> bool {
        true
    }
    fn append_log(&mut self, log: evmcheats::state::Log) {
        self.logs.push(log);
    }
}

impl BlockContext for MockHost {
    fn timestamp(&self) -> u64 {
        self.timestamp
    }
    fn set_timestamp(&mut self, value: u64) {
        self.timestamp = value;
    }
    fn block_number(&self) -> u64 {
        self.block_number
    }
    fn set_block_number(&mut self, value: u64) {
        self.block_number = value;
    }
    fn base_fee(&self) -> u64 {
        self.base_fee
    }
    fn set_base_fee(&mut self, value: u64) {
        self.base_fee = value;
    }
    fn random(&self) -> B256 {
        self.random
    }
    fn set_random(&mut self, value: B256) {
        self.random = value;
    }
    fn coinbase(&self) -> Address {
        self.coinbase
    }
    fn set_coinbase(&mut self, value: Address) {
        self.coinbase = value;
    }
}

impl ChainConfig for MockHost {
    fn chain_id(&self) -> u64 {
        self.chain_id
    }
    fn set_chain_id(&mut self, value: u64) {
        self.chain_id = value;
    }
}

fn encode_call(name: &str, inputs: &[DynSolType], values: Vec<DynSolValue>) -> Vec<u8> {
    let id = MethodId::from_signature(name, inputs);
    let mut calldata = id.0.to_vec();
    calldata.extend_from_slice(&DynSolValue::Tuple(values).abi_encode_params());
    calldata
}

fn new_inspector(config: CheatcodeConfig) -> (CheatcodeInspector<MockHost>, Rc<RefCell<MockHost>>) {
    init_tracing();
    let host = Rc::new(RefCell::new(MockHost::default()));
    (CheatcodeInspector::new(host.clone(), config), host)
}

fn enabled_config() -> CheatcodeConfig {
    CheatcodeConfig {
        cheatcodes_enabled: true,
        enable_ffi: false,
        code_size_check_disabled: false,
    }
}

const CHEATS: Address = evmcheats::state::CHEATCODE_ADDRESS;

fn expect_return(outcome: Option<PrecompileOutcome>) -> Vec<u8> {
    match outcome.expect("cheat-code call should have been routed") {
        PrecompileOutcome::Return(bytes) => bytes,
        PrecompileOutcome::Revert(bytes) => {
            panic!("expected success, got revert: {bytes:?}")
        }
    }
}

fn expect_revert(outcome: Option<PrecompileOutcome>) -> Vec<u8> {
    match outcome.expect("cheat-code call should have been routed") {
        PrecompileOutcome::Revert(bytes) => bytes,
        PrecompileOutcome::Return(bytes) => {
            panic!("expected revert, got success: {bytes:?}")
        }
    }
}

/// `warp(1000)` runs from inside a call nested one level under the top
/// frame. The restore hook lives on the *cheat call's*
/// `onTopFrameExitRestore`, so it is still pending (and `timestamp() == 1000`)
/// after the cheat call returns, survives an unrelated sibling call that
/// reverts, and only fires when the top-level frame itself exits.
#[test]
fn warp_scoped_revert() {
    let (mut insp, host) = new_inspector(enabled_config());
    let a = address!("0000000000000000000000000000000000000a");
    let b = address!("0000000000000000000000000000000000000b");

    insp.on_tx_start(a, 1_000_000);
    insp.on_enter(0, CallType::Call);
    insp.on_opcode(0, 0x00, a, a, a, Bytes::new(), 0, None);

    insp.on_enter(1, CallType::Call);
    let calldata = encode_call("warp", &[DynSolType::Uint(256)], vec![DynSolValue::Uint(U256::from(1000u64), 256)]);
    expect_return(insp.call(CHEATS, &calldata));
    insp.on_exit(1, Bytes::new(), None);

    assert_eq!(host.borrow().timestamp(), 1000, "warp takes effect immediately");

    // An unrelated nested call that reverts must not touch the pending restore.
    insp.on_enter(1, CallType::Call);
    insp.on_opcode(0, 0x00, a, b, b, Bytes::new(), 1, None);
    insp.on_exit(1, Bytes::new(), Some(FrameError::Reverted(Bytes::new())));
    assert_eq!(host.borrow().timestamp(), 1000, "warp survives an unrelated revert");

    insp.on_exit(0, Bytes::new(), None);
    assert_eq!(host.borrow().timestamp(), 0, "warp is undone once the top frame exits");
}

/// A pranks 0xBEEF, then calls B (sees 0xBEEF), then calls C (sees A
/// again) — the hook runs exactly once.
#[test]
fn prank_single_shot() {
    let (mut insp, _host) = new_inspector(enabled_config());
    let a = address!("0000000000000000000000000000000000000a");
    let b = address!("0000000000000000000000000000000000000b");
    let c = address!("0000000000000000000000000000000000000c");
    let beef = address!("0000000000000000000000000000000000beef");

    insp.on_tx_start(a, 1_000_000);
    insp.on_enter(0, CallType::Call);
    insp.on_opcode(0, 0x00, a, a, a, Bytes::new(), 0, None);

    insp.on_enter(1, CallType::Call);
    let calldata = encode_call("prank", &[DynSolType::Address], vec![DynSolValue::Address(beef)]);
    expect_return(insp.call(CHEATS, &calldata));
    insp.on_exit(1, Bytes::new(), None);

    // A calls B: sees the pranked caller.
    insp.on_enter(1, CallType::Call);
    insp.on_opcode(0, 0x00, a, b, b, Bytes::new(), 1, None);
    assert_eq!(insp.tracer.current_frame().unwrap().scope.as_ref().unwrap().borrow().caller, beef);
    insp.on_exit(1, Bytes::new(), None);

    // A calls C: prank has been consumed, caller is A again.
    insp.on_enter(1, CallType::Call);
    insp.on_opcode(0, 0x00, a, c, c, Bytes::new(), 1, None);
    assert_eq!(insp.tracer.current_frame().unwrap().scope.as_ref().unwrap().borrow().caller, a);
    insp.on_exit(1, Bytes::new(), None);

    insp.on_exit(0, Bytes::new(), None);
}

/// Every call X makes for the rest of its own frame's lifetime sees the
/// pranked caller; it is restored on X's own exit.
#[test]
fn prank_here_span() {
    let (mut insp, _host) = new_inspector(enabled_config());
    let a = address!("0000000000000000000000000000000000000a");
    let x = address!("0000000000000000000000000000000000000b");
    let beef = address!("0000000000000000000000000000000000beef");

    insp.on_tx_start(a, 1_000_000);
    insp.on_enter(0, CallType::Call);
    insp.on_opcode(0, 0x00, a, a, a, Bytes::new(), 0, None);

    // X is entered at depth 1, called by A.
    insp.on_enter(1, CallType::Call);
    insp.on_opcode(0, 0x00, a, x, x, Bytes::new(), 1, None);
    assert_eq!(insp.tracer.current_frame().unwrap().scope.as_ref().unwrap().borrow().caller, a);

    // X calls cheats.prankHere(0xBEEF) as a nested (depth 2) precompile call.
    insp.on_enter(2, CallType::Call);
    let calldata = encode_call("prankHere", &[DynSolType::Address], vec![DynSolValue::Address(beef)]);
    expect_return(insp.call(CHEATS, &calldata));
    insp.on_exit(2, Bytes::new(), None);

    // X's own frame now reports the pranked caller for the rest of its life.
    assert_eq!(insp.tracer.current_frame().unwrap().scope.as_ref().unwrap().borrow().caller, beef);

    // Restored the moment X's own frame exits.
    insp.on_exit(1, Bytes::new(), None);
    insp.on_exit(0, Bytes::new(), None);
}

/// The chain id restore hook outlives the transaction and is only ever
/// handed to `TxResults::on_chain_revert_hooks`, never executed
/// just because the top frame exited cleanly.
#[test]
fn chain_id_permanence() {
    let (mut insp, host) = new_inspector(enabled_config());
    let a = address!("0000000000000000000000000000000000000a");

    insp.on_tx_start(a, 1_000_000);
    insp.on_enter(0, CallType::Call);
    insp.on_opcode(0, 0x00, a, a, a, Bytes::new(), 0, None);

    insp.on_enter(1, CallType::Call);
    let calldata = encode_call("chainId", &[DynSolType::Uint(256)], vec![DynSolValue::Uint(U256::from(42u64), 256)]);
    expect_return(insp.call(CHEATS, &calldata));
    insp.on_exit(1, Bytes::new(), None);

    insp.on_exit(0, Bytes::new(), None);

    assert_eq!(host.borrow().chain_id(), 42, "chain id persists past top-frame exit");
    assert_eq!(
        insp.tracer.results().unwrap().on_chain_revert_hooks.len(),
        1,
        "the restore hook is handed to the tx results, not discarded"
    );

    // Simulate the outer chain layer reverting the block this tx landed in.
    for hook in insp.tracer.results().unwrap().on_chain_revert_hooks.iter().rev() {
        hook();
    }
    assert_eq!(host.borrow().chain_id(), 0, "a chain revert restores the original chain id");
}

/// `ffi` reverts when disabled in the chain configuration.
#[test]
fn ffi_disabled_reverts_with_descriptive_payload() {
    let config = CheatcodeConfig {
        cheatcodes_enabled: true,
        enable_ffi: false,
        code_size_check_disabled: false,
    };
    let (mut insp, _host) = new_inspector(config);
    let a = address!("0000000000000000000000000000000000000a");

    insp.on_tx_start(a, 1_000_000);
    insp.on_enter(0, CallType::Call);
    insp.on_opcode(0, 0x00, a, a, a, Bytes::new(), 0, None);
    insp.on_enter(1, CallType::Call);

    let argv = DynSolValue::Array(vec![
        DynSolValue::String("echo".to_string()),
        DynSolValue::String("hi".to_string()),
    ]);
    let calldata = encode_call(
        "ffi",
        &[DynSolType::Array(Box::new(DynSolType::String))],
        vec![argv],
    );
    let revert_data = expect_revert(insp.call(CHEATS, &calldata));

    // Error(string) selector followed by the ABI-encoded message.
    let decoded = DynSolType::String
        .abi_decode_params(&revert_data[4..])
        .unwrap();
    assert_eq!(
        decoded,
        DynSolValue::String("ffi is not enabled in the chain configuration".to_string())
    );
}

/// `addr(k)` must equal the address `ecrecover` derives from `sign(k,
/// h)`'s `(v, r, s)`.
#[test]
fn sign_addr_parity() {
    let (mut insp, _host) = new_inspector(enabled_config());
    let a = address!("0000000000000000000000000000000000000a");

    insp.on_tx_start(a, 1_000_000);
    insp.on_enter(0, CallType::Call);
    insp.on_opcode(0, 0x00, a, a, a, Bytes::new(), 0, None);
    insp.on_enter(1, CallType::Call);

    let privkey = U256::from(0xC0FFEEu64);
    let digest = B256::repeat_byte(0x42);

    let addr_calldata = encode_call("addr", &[DynSolType::Uint(256)], vec![DynSolValue::Uint(privkey, 256)]);
    let addr_out = expect_return(insp.call(CHEATS, &addr_calldata));
    let addr_value = match DynSolType::Address.abi_decode_params(&addr_out).unwrap() {
        DynSolValue::Address(a) => a,
        other => panic!("unexpected decode: {other:?}"),
    };

    let sign_calldata = encode_call(
        "sign",
        &[DynSolType::Uint(256), DynSolType::FixedBytes(32)],
        vec![DynSolValue::Uint(privkey, 256), DynSolValue::FixedBytes(digest, 32)],
    );
    let sign_out = expect_return(insp.call(CHEATS, &sign_calldata));
    let decoded = DynSolType::Tuple(vec![
        DynSolType::Uint(8),
        DynSolType::FixedBytes(32),
        DynSolType::FixedBytes(32),
    ])
    .abi_decode_params(&sign_out)
    .unwrap();
    let DynSolValue::Tuple(values) = decoded else {
        panic!("expected tuple")
    };
    let (v, r, s) = match &values[..] {
        [DynSolValue::Uint(v, _), DynSolValue::FixedBytes(r, _), DynSolValue::FixedBytes(s, _)] => {
            (v.to::<u64>() as u8, *r, *s)
        }
        other => panic!("unexpected sign() return shape: {other:?}"),
    };

    let recovered = ecrecover(digest, v, r, s);
    assert_eq!(recovered, addr_value);
}

fn ecrecover(digest: B256, v: u8, r: B256, s: B256) -> Address {
    use alloy_primitives::keccak256;
    use k256::ecdsa::{RecoveryId, Signature, VerifyingKey};

    let recovery_id = RecoveryId::from_byte(v - 27).expect("valid recovery id");
    let mut sig_bytes = [0u8; 64];
    sig_bytes[..32].copy_from_slice(r.as_slice());
    sig_bytes[32..].copy_from_slice(s.as_slice());
    let signature = Signature::from_slice(&sig_bytes).expect("valid signature");

    let verifying_key = VerifyingKey::recover_from_prehash(digest.as_slice(), &signature, recovery_id)
        .expect("recoverable signature");
    let encoded = verifying_key.to_encoded_point(false);
    let hash = keccak256(&encoded.as_bytes()[1..]);
    Address::from_slice(&hash[12..])
}

/// `snapshot`/`revertTo` is an inverse pair for state changes made
/// strictly between them (here, exercised against `store`/`load`).
#[test]
fn snapshot_revert_to_round_trips_with_store_load() {
    let (mut insp, host) = new_inspector(enabled_config());
    let a = address!("0000000000000000000000000000000000000a");
    let target = address!("00000000000000000000000000000000000001");
    let slot = U256::from(7u64);

    insp.on_tx_start(a, 1_000_000);
    insp.on_enter(0, CallType::Call);
    insp.on_opcode(0, 0x00, a, a, a, Bytes::new(), 0, None);
    insp.on_enter(1, CallType::Call);

    let snap_calldata = encode_call("snapshot", &[], vec![]);
    let snap_out = expect_return(insp.call(CHEATS, &snap_calldata));
    let DynSolValue::Uint(snapshot_id, _) = DynSolType::Uint(256).abi_decode_params(&snap_out).unwrap() else {
        panic!("expected uint256")
    };

    let store_calldata = encode_call(
        "store",
        &[DynSolType::Address, DynSolType::FixedBytes(32), DynSolType::FixedBytes(32)],
        vec![
            DynSolValue::Address(target),
            DynSolValue::FixedBytes(B256::from(slot.to_be_bytes::<32>()), 32),
            DynSolValue::FixedBytes(B256::repeat_byte(0xAA), 32),
        ],
    );
    expect_return(insp.call(CHEATS, &store_calldata));
    assert_eq!(host.borrow_mut().get_storage(target, slot).unwrap(), U256::from_be_bytes(B256::repeat_byte(0xAA).0));

    let revert_calldata = encode_call("revertTo", &[DynSolType::Uint(256)], vec![DynSolValue::Uint(snapshot_id, 256)]);
    let revert_out = expect_return(insp.call(CHEATS, &revert_calldata));
    assert_eq!(
        DynSolType::Bool.abi_decode_params(&revert_out).unwrap(),
        DynSolValue::Bool(true)
    );
}

/// After `on_tx_end`, depth is zero and the frame stack is empty, for any
/// well-formed sequence of callbacks.
#[test]
fn depth_and_frames_reset_after_tx_end() {
    let (mut insp, _host) = new_inspector(enabled_config());
    let a = address!("0000000000000000000000000000000000000a");
    let b = address!("0000000000000000000000000000000000000b");

    insp.on_tx_start(a, 1_000_000);
    insp.on_enter(0, CallType::Call);
    insp.on_opcode(0, 0x00, a, a, a, Bytes::new(), 0, None);
    insp.on_enter(1, CallType::Call);
    insp.on_opcode(0, 0x00, a, b, b, Bytes::new(), 1, None);
    insp.on_exit(1, Bytes::new(), None);
    insp.on_exit(0, Bytes::new(), None);
    insp.on_tx_end();

    assert_eq!(insp.tracer.depth(), 0);
    assert!(insp.tracer.current_frame().is_none());
}

/// Cheat codes must not be routed at all when the config flag is off.
#[test]
fn cheatcodes_disabled_is_not_routed() {
    let config = CheatcodeConfig::default();
    let (mut insp, _host) = new_inspector(config);
    let calldata = encode_call("warp", &[DynSolType::Uint(256)], vec![DynSolValue::Uint(U256::from(1u64), 256)]);
    assert!(insp.call(CHEATS, &calldata).is_none());
}

/// Truncated/unknown calldata reverts with an empty payload rather than
/// propagating a hard error.
#[test]
fn unknown_selector_and_short_calldata_revert_empty() {
    let (mut insp, _host) = new_inspector(enabled_config());
    assert_eq!(expect_revert(insp.call(CHEATS, &[0xde, 0xad, 0xbe, 0xef])), Vec::<u8>::new());
    assert_eq!(expect_revert(insp.call(CHEATS, &[0x01, 0x02])), Vec::<u8>::new());
}
