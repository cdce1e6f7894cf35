//! `toString`/`parse*` conversions: pure formatting and parsing, no host or
//! tracer access at all.

use alloy_dyn_abi::DynSolValue;
use alloy_primitives::{Address, B256, I256, U256};
use evmcheats_precompile::{CheatsCtxt, HandlerResult};
use evmcheats_state::ChainHost;

use crate::error::revert;

pub fn to_string_address<H: ChainHost>(
    _ccx: &mut CheatsCtxt<'_, H>,
    args: &[DynSolValue],
) -> HandlerResult {
    let value = args[0].as_address().ok_or_else(|| revert("toString: expected address"))?;
    Ok(vec![DynSolValue::String(value.to_string())])
}

pub fn to_string_bool<H: ChainHost>(
    _ccx: &mut CheatsCtxt<'_, H>,
    args: &[DynSolValue],
) -> HandlerResult {
    let value = args[0].as_bool().ok_or_else(|| revert("toString: expected bool"))?;
    Ok(vec![DynSolValue::String(value.to_string())])
}

pub fn to_string_uint<H: ChainHost>(
    _ccx: &mut CheatsCtxt<'_, H>,
    args: &[DynSolValue],
) -> HandlerResult {
    let (value, _) = args[0].as_uint().ok_or_else(|| revert("toString: expected uint256"))?;
    Ok(vec![DynSolValue::String(value.to_string())])
}

pub fn to_string_int<H: ChainHost>(
    _ccx: &mut CheatsCtxt<'_, H>,
    args: &[DynSolValue],
) -> HandlerResult {
    let (value, _) = args[0].as_int().ok_or_else(|| revert("toString: expected int256"))?;
    Ok(vec![DynSolValue::String(value.to_string())])
}

pub fn to_string_bytes32<H: ChainHost>(
    _ccx: &mut CheatsCtxt<'_, H>,
    args: &[DynSolValue],
) -> HandlerResult {
    let value = args[0]
        .as_fixed_bytes()
        .ok_or_else(|| revert("toString: expected bytes32"))?
        .0;
    Ok(vec![DynSolValue::String(format!("0x{}", hex::encode(value)))])
}

pub fn to_string_bytes<H: ChainHost>(
    _ccx: &mut CheatsCtxt<'_, H>,
    args: &[DynSolValue],
) -> HandlerResult {
    let value = args[0].as_bytes().ok_or_else(|| revert("toString: expected bytes"))?;
    Ok(vec![DynSolValue::String(format!("0x{}", hex::encode(value)))])
}

fn strip_0x(s: &str) -> &str {
    s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")).unwrap_or(s)
}

pub fn parse_bytes<H: ChainHost>(
    _ccx: &mut CheatsCtxt<'_, H>,
    args: &[DynSolValue],
) -> HandlerResult {
    let s = args[0].as_str().ok_or_else(|| revert("parseBytes: expected string"))?;
    let decoded =
        hex::decode(strip_0x(s)).map_err(|e| revert(format!("parseBytes: invalid hex: {e}")))?;
    Ok(vec![DynSolValue::Bytes(decoded)])
}

pub fn parse_bytes32<H: ChainHost>(
    _ccx: &mut CheatsCtxt<'_, H>,
    args: &[DynSolValue],
) -> HandlerResult {
    let s = args[0].as_str().ok_or_else(|| revert("parseBytes32: expected string"))?;
    let decoded =
        hex::decode(strip_0x(s)).map_err(|e| revert(format!("parseBytes32: invalid hex: {e}")))?;
    if decoded.len() != 32 {
        return Err(revert("parseBytes32: expected exactly 32 bytes"));
    }
    Ok(vec![DynSolValue::FixedBytes(B256::from_slice(&decoded), 32)])
}

pub fn parse_address<H: ChainHost>(
    _ccx: &mut CheatsCtxt<'_, H>,
    args: &[DynSolValue],
) -> HandlerResult {
    let s = args[0].as_str().ok_or_else(|| revert("parseAddress: expected string"))?;
    let value: Address = s.parse().map_err(|e| revert(format!("parseAddress: {e}")))?;
    Ok(vec![DynSolValue::Address(value)])
}

pub fn parse_uint<H: ChainHost>(
    _ccx: &mut CheatsCtxt<'_, H>,
    args: &[DynSolValue],
) -> HandlerResult {
    let s = args[0].as_str().ok_or_else(|| revert("parseUint: expected string"))?;
    let value: U256 = s.parse().map_err(|e| revert(format!("parseUint: {e}")))?;
    Ok(vec![DynSolValue::Uint(value, 256)])
}

pub fn parse_int<H: ChainHost>(
    _ccx: &mut CheatsCtxt<'_, H>,
    args: &[DynSolValue],
) -> HandlerResult {
    let s = args[0].as_str().ok_or_else(|| revert("parseInt: expected string"))?;
    let value: I256 = s.parse().map_err(|e| revert(format!("parseInt: {e}")))?;
    Ok(vec![DynSolValue::Int(value, 256)])
}

pub fn parse_bool<H: ChainHost>(
    _ccx: &mut CheatsCtxt<'_, H>,
    args: &[DynSolValue],
) -> HandlerResult {
    let s = args[0].as_str().ok_or_else(|| revert("parseBool: expected string"))?;
    let value = match s {
        "true" => true,
        "false" => false,
        other => return Err(revert(format!("parseBool: invalid boolean string \"{other}\""))),
    };
    Ok(vec![DynSolValue::Bool(value)])
}
