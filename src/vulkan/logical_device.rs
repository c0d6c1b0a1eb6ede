use anyhow::{Context, Result};
use ash::{
    vk::{DeviceCreateInfo, DeviceQueueCreateInfo, PhysicalDeviceFeatures, Queue},
    Device,
};
use tracing::debug;

use crate::error::SetupError;
use crate::vulkan::{InstanceGuard, PhysicalDevice};

/// Owns the logical device opened against the selected physical device, plus
/// the graphics queue derived from it.
pub struct LogicalDevice {
    device: Device,
    graphics_queue: Queue,
}

impl LogicalDevice {
    /// Opens a logical device with a single queue on the physical device's
    /// graphics family.
    pub fn try_new(
        instance_guard: &InstanceGuard,
        physical_device: &PhysicalDevice,
    ) -> Result<Self> {
        let graphics_queue_index = physical_device
            .queue_families()
            .graphics_family
            .context("selected physical device has no graphics queue family")?;

        let priorities = [1.0f32];
        let queue_infos = [DeviceQueueCreateInfo::builder()
            .queue_family_index(graphics_queue_index)
            .queue_priorities(&priorities)
            .build()];

        // the scorer already rejected devices without geometry shaders
        let features = PhysicalDeviceFeatures::builder().geometry_shader(true);

        let device_create_info = DeviceCreateInfo::builder()
            .queue_create_infos(&queue_infos)
            .enabled_features(&features);

        let device = unsafe {
            instance_guard
                .instance
                .create_device(physical_device.physical_device, &device_create_info, None)
                .map_err(SetupError::DeviceCreation)?
        };
        let graphics_queue = unsafe { device.get_device_queue(graphics_queue_index, 0) };
        debug!(
            "Logical device created with graphics queue family {}",
            graphics_queue_index
        );

        Ok(Self {
            device,
            graphics_queue,
        })
    }

    pub fn graphics_queue(&self) -> Queue {
        self.graphics_queue
    }
}

impl Drop for LogicalDevice {
    fn drop(&mut self) {
        unsafe { self.device.destroy_device(None) };
    }
}
