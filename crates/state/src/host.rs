use alloy_primitives::{Address, Bytes, Log, B256, U256};

/// The world state database the EVM executes against.
///
/// This is a narrow slice of what a real state database exposes — just the
/// operations the cheat-code catalogue needs: direct, immediate,
/// non-reverting mutation of storage, code, nonce and balance, plus the
/// snapshot/revert pair used by `vm.snapshot` / `vm.revertTo`.
///
/// Implementations are expected to be backed by something like `revm`'s
/// journaled state; this trait intentionally does not require a journal,
/// checkpoints, or warm/cold tracking, none of which the cheat-code layer
/// needs to know about.
pub trait StateDb {
    /// Error type surfaced by the backing database (e.g. an RPC error when
    /// forking). Cheat codes that hit this error treat it as fatal.
    type Error: core::fmt::Debug;

    fn get_storage(&mut self, address: Address, slot: U256) -> Result<U256, Self::Error>;
    fn set_storage(&mut self, address: Address, slot: U256, value: U256) -> Result<(), Self::Error>;

    fn get_code(&mut self, address: Address) -> Result<Bytes, Self::Error>;
    fn set_code(&mut self, address: Address, code: Bytes) -> Result<(), Self::Error>;

    fn get_nonce(&mut self, address: Address) -> Result<u64, Self::Error>;
    fn set_nonce(&mut self, address: Address, nonce: u64) -> Result<(), Self::Error>;

    fn get_balance(&mut self, address: Address) -> Result<U256, Self::Error>;
    fn set_balance(&mut self, address: Address, balance: U256) -> Result<(), Self::Error>;

    /// Captures a point-in-time snapshot id. The id is an opaque handle
    /// defined entirely by the backing database; the cheat-code layer never
    /// interprets it, only stores and replays it.
    fn snapshot(&mut self) -> U256;

    /// Reverts the database to a previously captured snapshot. Returns
    /// `true` unconditionally, matching real `revertTo` semantics: an
    /// unknown or already-consumed id is the caller's mistake, not a
    /// reportable failure.
    fn revert_to(&mut self, id: U256) -> bool;

    fn append_log(&mut self, log: Log);
}

/// The pending block's mutable header fields — the half of the "chain hook
/// interface" that is scoped to the current block, restored at the
/// enclosing top-level frame's exit by the cheats that mutate it.
pub trait BlockContext {
    fn timestamp(&self) -> u64;
    fn set_timestamp(&mut self, value: u64);

    fn block_number(&self) -> u64;
    fn set_block_number(&mut self, value: u64);

    fn base_fee(&self) -> u64;
    fn set_base_fee(&mut self, value: u64);

    /// Post-Paris `RANDOM`/`PREVRANDAO` opcode source.
    fn random(&self) -> B256;
    fn set_random(&mut self, value: B256);

    fn coinbase(&self) -> Address;
    fn set_coinbase(&mut self, value: Address);
}

/// The pending chain config's mutable fields — the half of the "chain hook
/// interface" that outlives a single block, restored only on a chain
/// revert.
pub trait ChainConfig {
    fn chain_id(&self) -> u64;
    fn set_chain_id(&mut self, value: u64);
}

/// The full collaborator surface a cheat-code handler needs: state
/// database, pending block context, and pending chain config, bundled
/// behind one bound so catalogue code can stay generic over a single type
/// parameter instead of three.
pub trait ChainHost: StateDb + BlockContext + ChainConfig {}

impl<T: StateDb + BlockContext + ChainConfig> ChainHost for T {}
