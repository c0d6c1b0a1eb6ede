use anyhow::Result;
use ash::Entry;
use tracing::info;
use vulkan_bootstrap::{
    logging, ContextConfig, DebugUtilsGuard, InstanceGuard, LogicalDevice, PhysicalDeviceManager,
    WindowManager,
};

fn main() -> Result<()> {
    logging::init()?;
    let config = ContextConfig::default();

    let mut window_manager = WindowManager::try_new()?;

    info!("Initialize Vulkan");
    let entry = Entry::linked();
    let instance =
        InstanceGuard::try_new(&entry, window_manager.required_extensions()?, &config)?;
    let _debug_utils = DebugUtilsGuard::try_new(&entry, &instance, &config)?;

    let physical_device = PhysicalDeviceManager::new(&instance).select_physical_device()?;
    info!("Using device {}", physical_device.name());

    let device = LogicalDevice::try_new(&instance, &physical_device)?;
    info!("Graphics queue ready: {:?}", device.graphics_queue());

    window_manager.run_event_loop();

    info!("Cleanup resources");
    // locals drop in reverse declaration order: device, then the debug
    // messenger, then the instance, then the window
    Ok(())
}
