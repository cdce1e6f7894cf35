use alloy_dyn_abi::DynSolValue;
use alloy_primitives::{keccak256, Address, B256, U256};
use evmcheats_precompile::{CheatsCtxt, HandlerResult};
use evmcheats_state::ChainHost;
use k256::ecdsa::{RecoveryId, Signature, SigningKey};

use crate::error::revert;

/// Builds a [`SigningKey`] from the low-order 256 bits of a cheat-code
/// private key argument, matching `addr`/`sign`'s shared semantics.
fn signing_key_from_u256(privkey: U256) -> Result<SigningKey, Vec<u8>> {
    let bytes: [u8; 32] = privkey.to_be_bytes();
    SigningKey::from_bytes((&bytes).into())
        .map_err(|e| revert(format!("invalid private key: {e}")))
}

/// The Ethereum address derived from a private key's public key
/// (`keccak256(pubkey)[12..32]`).
pub fn address_of(privkey: U256) -> Result<Address, Vec<u8>> {
    let key = signing_key_from_u256(privkey)?;
    let verifying_key = key.verifying_key();
    let encoded = verifying_key.to_encoded_point(false);
    let hash = keccak256(&encoded.as_bytes()[1..]);
    Ok(Address::from_slice(&hash[12..]))
}

/// `addr(privkey) -> address`.
pub fn addr<H: ChainHost>(_ccx: &mut CheatsCtxt<'_, H>, args: &[DynSolValue]) -> HandlerResult {
    let privkey = args[0].as_uint().ok_or_else(|| revert("addr: expected uint256"))?.0;
    let address = address_of(privkey)?;
    Ok(vec![DynSolValue::Address(address)])
}

/// `sign(privkey, digest) -> (v, r, s)`.
pub fn sign<H: ChainHost>(_ccx: &mut CheatsCtxt<'_, H>, args: &[DynSolValue]) -> HandlerResult {
    let privkey = args[0].as_uint().ok_or_else(|| revert("sign: expected uint256 privkey"))?.0;
    let digest = args[1]
        .as_fixed_bytes()
        .ok_or_else(|| revert("sign: expected bytes32 digest"))?
        .0;

    let key = signing_key_from_u256(privkey)?;
    let (signature, recovery_id): (Signature, RecoveryId) = key
        .sign_prehash_recoverable(digest)
        .map_err(|e| revert(format!("sign: {e}")))?;

    let rs = signature.to_bytes();
    let r = B256::from_slice(&rs[..32]);
    let s = B256::from_slice(&rs[32..]);
    let v = recovery_id.to_byte() as u64 + 27;

    Ok(vec![
        DynSolValue::Uint(U256::from(v), 8),
        DynSolValue::FixedBytes(r, 32),
        DynSolValue::FixedBytes(s, 32),
    ])
}
