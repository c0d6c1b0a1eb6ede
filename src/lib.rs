pub mod config;
pub mod error;
pub mod logging;
pub mod vulkan;
pub mod window;

pub use config::ContextConfig;
pub use error::{CapabilityKind, SetupError};
pub use vulkan::{
    DebugUtilsGuard, InstanceGuard, LogicalDevice, PhysicalDevice, PhysicalDeviceManager,
};
pub use window::WindowManager;
