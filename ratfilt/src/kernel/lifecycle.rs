use super::ConfigError;

/// Constructor validation lifecycle shared by kernel structs.
///
/// A kernel built through [`KernelLifecycle::try_new`] has a fully validated
/// configuration, so its run methods only need to check per-call inputs.
pub trait KernelLifecycle: Sized {
    /// Kernel config type.
    type Config;

    /// Construct a validated kernel from config.
    fn try_new(config: Self::Config) -> Result<Self, ConfigError>;
}
