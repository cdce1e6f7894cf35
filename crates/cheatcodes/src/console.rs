//! `console.log` family: a no-op precompile whose only job is to make
//! calldata observable to whatever external trace consumer is watching —
//! it never mutates tracer or host state.
//!
//! Real `console.sol` exposes `log` over every arity/type combination a
//! Solidity test author might reach for; reproducing that table by hand
//! would be hundreds of near-identical `add_method` calls, so it is built
//! here the same way `forge-std`'s own `console.sol` is: generated from a
//! small set of argument types instead of transcribed one overload at a
//! time.

use alloy_dyn_abi::{DynSolType, DynSolValue};
use evmcheats_precompile::{CheatsCtxt, Contract, HandlerResult};
use evmcheats_state::ChainHost;

/// The four types every multi-argument `log` overload combines (mirrors
/// `console.sol`, which only offers 2-, 3- and 4-arg overloads over this
/// set — `bytes`, `int256` and the fixed-size `bytesN` family only ever
/// appear alone).
fn core_types() -> [DynSolType; 4] {
    [
        DynSolType::Uint(256),
        DynSolType::String,
        DynSolType::Bool,
        DynSolType::Address,
    ]
}

/// Types that only ever appear as the sole argument of a `log` overload.
fn single_arg_only_types() -> Vec<DynSolType> {
    let mut types = vec![DynSolType::Int(256), DynSolType::Bytes];
    types.extend((1..=32u32).map(DynSolType::FixedBytes));
    types
}

/// Every ordered tuple of length `arity` drawn from `items`, with
/// repetition — `log(uint256,uint256)` and `log(uint256,string)` are both
/// real overloads, so this is a cartesian power, not a combination.
fn cartesian_power(items: &[DynSolType], arity: usize) -> Vec<Vec<DynSolType>> {
    let mut tuples = vec![Vec::new()];
    for _ in 0..arity {
        let mut next = Vec::with_capacity(tuples.len() * items.len());
        for prefix in &tuples {
            for item in items {
                let mut tuple = prefix.clone();
                tuple.push(item.clone());
                next.push(tuple);
            }
        }
        tuples = next;
    }
    tuples
}

/// Every `log` overload this precompile answers to, single-arg types first.
fn all_overloads() -> Vec<Vec<DynSolType>> {
    let core = core_types();
    let mut overloads: Vec<Vec<DynSolType>> = core.iter().map(|t| vec![t.clone()]).collect();
    overloads.extend(single_arg_only_types().into_iter().map(|t| vec![t]));
    for arity in 2..=4 {
        overloads.extend(cartesian_power(&core, arity));
    }
    overloads
}

/// `log(...)` — always succeeds, never touches the tracer or the host.
/// Logged at `info` so a collector subscribed to `tracing` can recover the
/// decoded call the same way it would read any other EVM trace event.
fn log<H: ChainHost>(_ccx: &mut CheatsCtxt<'_, H>, args: &[DynSolValue]) -> HandlerResult {
    tracing::info!(?args, "console.log");
    Ok(vec![])
}

/// Registers every `log` overload onto `contract`.
pub fn register<H: ChainHost + 'static>(contract: &mut Contract<H>) {
    for inputs in all_overloads() {
        contract.add_method("log", inputs, vec![], log);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use evmcheats_state::Address;

    #[test]
    fn overload_count_matches_console_sol_shape() {
        // 4 single-arg core + 34 single-arg-only + 4^2 + 4^3 + 4^4 combos.
        let expected = 4 + 34 + 16 + 64 + 256;
        assert_eq!(all_overloads().len(), expected);
    }

    #[test]
    fn every_overload_has_a_distinct_selector() {
        use evmcheats_precompile::MethodId;
        use std::collections::HashSet;

        let mut seen = HashSet::new();
        for inputs in all_overloads() {
            let id = MethodId::from_signature("log", &inputs);
            assert!(seen.insert(id), "duplicate selector for log{inputs:?}");
        }
    }

    #[test]
    fn registering_all_overloads_does_not_panic_on_collision() {
        // `Contract::add_method` asserts on a genuine selector collision;
        // registering the whole generated table exercises that guard for
        // the real shape this precompile ships, on top of the narrower
        // std::convert::Infallible-backed host used by the precompile
        // crate's own dispatcher tests.
        struct Unused;
        impl evmcheats_state::StateDb for Unused {
            type Error = std::convert::Infallible;
            fn get_storage(&mut self, _: Address, _: evmcheats_state::U256) -> Result<evmcheats_state::U256, Self::Error> { Ok(evmcheats_state::U256::ZERO) }
            fn set_storage(&mut self, _: Address, _: evmcheats_state::U256, _: evmcheats_state::U256) -> Result<(), Self::Error> { Ok(()) }
            fn get_code(&mut self, _: Address) -> Result<evmcheats_state::Bytes, Self::Error> { Ok(evmcheats_state::Bytes::new()) }
            fn set_code(&mut self, _: Address, _: evmcheats_state::Bytes) -> Result<(), Self::Error> { Ok(()) }
            fn get_nonce(&mut self, _: Address) -> Result<u64, Self::Error> { Ok(0) }
            fn set_nonce(&mut self, _: Address, _: u64) -> Result<(), Self::Error> { Ok(()) }
            fn get_balance(&mut self, _: Address) -> Result<evmcheats_state::U256, Self::Error> { Ok(evmcheats_state::U256::ZERO) }
            fn set_balance(&mut self, _: Address, _: evmcheats_state::U256) -> Result<(), Self::Error> { Ok(()) }
            fn snapshot(&mut self) -> evmcheats_state::U256 { evmcheats_state::U256::ZERO }
            fn revert_to(&mut self, _: evmcheats_state::U256) -> bool { true }
            fn append_log(&mut self, _: evmcheats_state::Log) {}
        }
        impl evmcheats_state::BlockContext for Unused {
            fn timestamp(&self) -> u64 { 0 }
            fn set_timestamp(&mut self, _: u64) {}
            fn block_number(&self) -> u64 { 0 }
            fn set_block_number(&mut self, _: u64) {}
            fn base_fee(&self) -> u64 { 0 }
            fn set_base_fee(&mut self, _: u64) {}
            fn random(&self) -> evmcheats_state::B256 { evmcheats_state::B256::ZERO }
            fn set_random(&mut self, _: evmcheats_state::B256) {}
            fn coinbase(&self) -> Address { Address::ZERO }
            fn set_coinbase(&mut self, _: Address) {}
        }
        impl evmcheats_state::ChainConfig for Unused {
            fn chain_id(&self) -> u64 { 0 }
            fn set_chain_id(&mut self, _: u64) {}
        }

        let mut contract: Contract<Unused> = Contract::new(Address::ZERO, "console.log");
        register(&mut contract);
    }
}
