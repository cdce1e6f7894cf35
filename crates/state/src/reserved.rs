use alloy_primitives::{address, Address, Bytes};

/// The standard cheat-code precompile address (the historical `hevm`
/// address every `forge`/`medusa`-style cheat-code layer reuses).
pub const CHEATCODE_ADDRESS: Address = address!("7109709ECfa91a80626fF3989D68f67F5b1DD12D");

/// The `console.log` precompile address: the 20-byte ASCII tail `console.log`
/// zero-padded on the left.
pub const CONSOLE_LOG_ADDRESS: Address = address!("000000000000000000636F6e736F6c652e6c6f67");

/// Sentinel bytecode installed at both reserved addresses in genesis so that
/// Solidity's `extcodesize` guard on external calls does not treat the
/// precompiles as empty accounts.
pub fn sentinel_code() -> Bytes {
    Bytes::from_static(&SENTINEL_CODE)
}

/// Single non-empty byte used as the reserved addresses' genesis code.
pub const SENTINEL_CODE: [u8; 1] = [0xFF];
