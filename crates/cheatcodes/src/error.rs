use alloy_dyn_abi::DynSolValue;
use alloy_primitives::keccak256;

/// Selector for Solidity's builtin `Error(string)`, the revert shape every
/// `require`/`revert("...")` in a contract (and every cheat-code deliberate
/// revert here) produces.
fn error_string_selector() -> [u8; 4] {
    let hash = keccak256(b"Error(string)");
    let mut selector = [0u8; 4];
    selector.copy_from_slice(&hash[..4]);
    selector
}

/// Builds the raw revert payload for a cheat-code that deliberately fails:
/// the `Error(string)` selector followed by the ABI-encoded message, so a
/// caller decoding the revert data sees an ordinary Solidity revert string.
pub fn revert(message: impl Into<String>) -> Vec<u8> {
    let mut payload = error_string_selector().to_vec();
    payload.extend_from_slice(&DynSolValue::String(message.into()).abi_encode_params());
    payload
}
