//! `ffi(string[] argv) -> bytes`: the one cheat that talks to the outside
//! world, and the one operation in this whole layer that can block the
//! EVM's thread synchronously.

use std::process::Command;

use alloy_dyn_abi::DynSolValue;
use evmcheats_precompile::{CheatsCtxt, HandlerResult};
use evmcheats_state::ChainHost;

use crate::error::revert;

pub fn ffi<H: ChainHost>(ccx: &mut CheatsCtxt<'_, H>, args: &[DynSolValue]) -> HandlerResult {
    if !ccx.config.enable_ffi {
        return Err(revert("ffi is not enabled in the chain configuration"));
    }

    let argv = args[0]
        .as_array()
        .ok_or_else(|| revert("ffi: expected string[]"))?
        .iter()
        .map(|v| v.as_str().map(str::to_owned).ok_or_else(|| revert("ffi: expected string[]")))
        .collect::<Result<Vec<String>, Vec<u8>>>()?;

    let Some((program, rest)) = argv.split_first() else {
        return Err(revert("ffi: argv must not be empty"));
    };

    tracing::debug!(?argv, "running ffi command");
    let output = Command::new(program)
        .args(rest)
        .output()
        .map_err(|e| ffi_failure(e.to_string(), &[]))?;

    if !output.status.success() {
        return Err(ffi_failure(
            format!("exit status {}", output.status),
            &output_combined(&output.stdout, &output.stderr),
        ));
    }
    tracing::debug!(status = ?output.status, "ffi command finished");

    let stdout = String::from_utf8_lossy(&output.stdout);
    let stdout_trimmed = stdout.trim();
    let hex_part = stdout_trimmed.strip_prefix("0x").unwrap_or(stdout_trimmed);

    let decoded = match hex::decode(hex_part) {
        Ok(bytes) => bytes,
        Err(_) => output.stdout,
    };

    Ok(vec![DynSolValue::Bytes(decoded)])
}

fn output_combined(stdout: &[u8], stderr: &[u8]) -> Vec<u8> {
    let mut combined = stdout.to_vec();
    combined.extend_from_slice(stderr);
    combined
}

fn ffi_failure(error: impl std::fmt::Display, combined_output: &[u8]) -> Vec<u8> {
    revert(format!(
        "ffi: cmd failed with the following error: {error}\nOutput: {}",
        String::from_utf8_lossy(combined_output)
    ))
}
