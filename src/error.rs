use std::fmt;

use ash::vk;
use thiserror::Error;

/// Which kind of named instance capability a support check ran against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CapabilityKind {
    Extensions,
    Layers,
}

impl fmt::Display for CapabilityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CapabilityKind::Extensions => write!(f, "extensions"),
            CapabilityKind::Layers => write!(f, "layers"),
        }
    }
}

/// Fatal failures while bringing up the Vulkan context. Recoverable
/// conditions (like a missing debug messenger extension) are logged and
/// degraded instead of surfacing here.
#[derive(Debug, Error)]
pub enum SetupError {
    /// The host does not expose every requested extension or layer. Retrying
    /// with the same request set cannot succeed.
    #[error("required {kind} not available: {}", .missing.join(", "))]
    MissingCapabilities {
        kind: CapabilityKind,
        missing: Vec<String>,
    },

    /// Zero physical devices were enumerated.
    #[error("no physical devices with Vulkan support found")]
    NoPhysicalDevice,

    /// Devices were enumerated, but every one of them failed a hard
    /// requirement.
    #[error("none of the enumerated physical devices is suitable")]
    NoSuitableDevice,

    /// The driver rejected logical device creation.
    #[error("logical device creation failed: {0}")]
    DeviceCreation(#[source] vk::Result),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_capabilities_lists_every_missing_name() {
        let error = SetupError::MissingCapabilities {
            kind: CapabilityKind::Extensions,
            missing: vec![
                "VK_KHR_surface".to_owned(),
                "VK_KHR_win32_surface".to_owned(),
            ],
        };
        let message = error.to_string();
        assert!(message.contains("VK_KHR_surface"));
        assert!(message.contains("VK_KHR_win32_surface"));
        assert!(message.contains("extensions"));
    }

    #[test]
    fn enumeration_and_suitability_failures_stay_distinct() {
        assert_ne!(
            SetupError::NoPhysicalDevice.to_string(),
            SetupError::NoSuitableDevice.to_string()
        );
    }
}
