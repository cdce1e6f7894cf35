/// Chain-level configuration gates for the cheat-code layer.
///
/// These three flags are the complete configuration surface consumed by the
/// cheat-code layer; everything else (compiler settings, fuzzer seeds,
/// reporting) belongs to the surrounding harness and is out of scope here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CheatcodeConfig {
    /// Gates installation of the cheat-code precompiles and the tracer
    /// binding altogether. When `false` the host should not route calls to
    /// [`crate::CHEATCODE_ADDRESS`] or [`crate::CONSOLE_LOG_ADDRESS`] through
    /// this layer at all.
    pub cheatcodes_enabled: bool,
    /// Gates only the `ffi` handler. Every other handler ignores this flag.
    pub enable_ffi: bool,
    /// Consumed by the host EVM to suppress its contract code-size guard;
    /// relevant because the cheat-code addresses hold only sentinel code.
    pub code_size_check_disabled: bool,
}
