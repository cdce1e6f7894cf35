//! The cheat-code catalogue: concrete handlers for the standard cheats
//! precompile and the `console.log` precompile, plus the two `Contract`
//! builders the root crate wires into a running dispatcher.

mod block;
mod chain;
pub mod console;
mod convert;
mod crypto;
pub mod error;
mod ffi;
mod prank;
mod state;

use alloy_dyn_abi::DynSolType;
use evmcheats_precompile::Contract;
use evmcheats_state::{ChainHost, CHEATCODE_ADDRESS, CONSOLE_LOG_ADDRESS};

pub use crypto::address_of;

fn uint256() -> DynSolType {
    DynSolType::Uint(256)
}

fn bytes32() -> DynSolType {
    DynSolType::FixedBytes(32)
}

fn address() -> DynSolType {
    DynSolType::Address
}

fn bytes() -> DynSolType {
    DynSolType::Bytes
}

fn string() -> DynSolType {
    DynSolType::String
}

/// Builds the standard cheats contract (address
/// `0x7109709ECfa91a80626fF3989D68f67F5b1DD12D`) with every handler
/// registered under its canonical signature.
pub fn build_cheats_contract<H: ChainHost + 'static>() -> Contract<H> {
    let mut contract = Contract::new(CHEATCODE_ADDRESS, "Cheats");

    // Block-context cheats, restored at top-frame exit.
    contract.add_method("warp", vec![uint256()], vec![], block::warp);
    contract.add_method("roll", vec![uint256()], vec![], block::roll);
    contract.add_method("fee", vec![uint256()], vec![], block::fee);
    contract.add_method("difficulty", vec![uint256()], vec![], block::difficulty);
    contract.add_method("coinbase", vec![address()], vec![], block::coinbase);

    // Chain-config cheats, restored only on a chain revert.
    contract.add_method("chainId", vec![uint256()], vec![], chain::chain_id);

    // Immediate, non-reverting state-DB mutations.
    contract.add_method("store", vec![address(), bytes32(), bytes32()], vec![], state::store);
    contract.add_method(
        "load",
        vec![address(), bytes32()],
        vec![bytes32()],
        state::load,
    );
    contract.add_method("etch", vec![address(), bytes()], vec![], state::etch);
    contract.add_method("deal", vec![address(), uint256()], vec![], state::deal);
    contract.add_method(
        "getNonce",
        vec![address()],
        vec![DynSolType::Uint(64)],
        state::get_nonce,
    );
    contract.add_method(
        "setNonce",
        vec![address(), DynSolType::Uint(64)],
        vec![],
        state::set_nonce,
    );
    contract.add_method("snapshot", vec![], vec![uint256()], state::snapshot);
    contract.add_method(
        "revertTo",
        vec![uint256()],
        vec![DynSolType::Bool],
        state::revert_to,
    );

    // Caller-identity cheats.
    contract.add_method("prank", vec![address()], vec![], prank::prank);
    contract.add_method("prankHere", vec![address()], vec![], prank::prank_here);

    // FFI.
    contract.add_method(
        "ffi",
        vec![DynSolType::Array(Box::new(string()))],
        vec![bytes()],
        ffi::ffi,
    );

    // Crypto.
    contract.add_method("addr", vec![uint256()], vec![address()], crypto::addr);
    contract.add_method(
        "sign",
        vec![uint256(), bytes32()],
        vec![DynSolType::Uint(8), bytes32(), bytes32()],
        crypto::sign,
    );

    // Conversions: toString.
    contract.add_method(
        "toString",
        vec![address()],
        vec![string()],
        convert::to_string_address,
    );
    contract.add_method(
        "toString",
        vec![DynSolType::Bool],
        vec![string()],
        convert::to_string_bool,
    );
    contract.add_method(
        "toString",
        vec![uint256()],
        vec![string()],
        convert::to_string_uint,
    );
    contract.add_method(
        "toString",
        vec![DynSolType::Int(256)],
        vec![string()],
        convert::to_string_int,
    );
    contract.add_method(
        "toString",
        vec![bytes32()],
        vec![string()],
        convert::to_string_bytes32,
    );
    contract.add_method(
        "toString",
        vec![bytes()],
        vec![string()],
        convert::to_string_bytes,
    );

    // Conversions: parse*.
    contract.add_method("parseBytes", vec![string()], vec![bytes()], convert::parse_bytes);
    contract.add_method(
        "parseBytes32",
        vec![string()],
        vec![bytes32()],
        convert::parse_bytes32,
    );
    contract.add_method(
        "parseAddress",
        vec![string()],
        vec![address()],
        convert::parse_address,
    );
    contract.add_method("parseUint", vec![string()], vec![uint256()], convert::parse_uint);
    contract.add_method(
        "parseInt",
        vec![string()],
        vec![DynSolType::Int(256)],
        convert::parse_int,
    );
    contract.add_method(
        "parseBool",
        vec![string()],
        vec![DynSolType::Bool],
        convert::parse_bool,
    );

    contract
}

/// Builds the `console.log` contract (address
/// `0x000000000000000000636F6e736F6c652e6c6f67`).
pub fn build_console_log_contract<H: ChainHost + 'static>() -> Contract<H> {
    let mut contract = Contract::new(CONSOLE_LOG_ADDRESS, "console.log");
    console::register(&mut contract);
    contract
}
