mod debug_utils_guard;
mod instance_guard;
mod logical_device;
mod physical_device_manager;
mod queue_families;
mod support;

pub use debug_utils_guard::DebugUtilsGuard;
pub use instance_guard::InstanceGuard;
pub use logical_device::LogicalDevice;
pub use physical_device_manager::{PhysicalDevice, PhysicalDeviceManager, Suitability};
pub use queue_families::{find_queue_families, QueueFamilyIndicies};
pub use support::{SupportReport, SupportStatus};
