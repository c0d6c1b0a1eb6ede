/// Runtime switches threaded through the context constructors.
#[derive(Debug, Clone, Copy)]
pub struct ContextConfig {
    /// Request the Khronos validation layer and install the debug utils
    /// messenger when true.
    pub enable_validations: bool,
}

impl Default for ContextConfig {
    /// Follows the `enable_validations` cargo feature, so builds keep their
    /// usual behavior while callers (and tests) can still flip the switch at
    /// runtime.
    fn default() -> Self {
        Self {
            enable_validations: cfg!(feature = "enable_validations"),
        }
    }
}
