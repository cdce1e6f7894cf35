/// Dispatcher-level failures.
///
/// Truncated calldata, an unknown selector, and a selector-table mismatch are
/// not exceptional — `Contract::run` turns them into an empty-payload revert
/// directly, the same way a real EVM treats a call to an address with no
/// matching function, so they never reach this type. `AbiDecode` is the one
/// genuine error: a selector resolved to a method whose declared input shape
/// doesn't match the calldata, which is not something a caller can have
/// intended.
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error("failed to ABI-decode cheat-code call arguments: {0}")]
    AbiDecode(String),
}
