use std::ffi::CStr;

use ash::vk::{
    self, PhysicalDeviceFeatures, PhysicalDeviceProperties, PhysicalDeviceType,
    QueueFamilyProperties,
};
use tracing::debug;

use crate::vulkan::queue_families::{find_queue_families, QueueFamilyIndicies};

// Discrete GPUs have a significant performance advantage
const DISCRETE_GPU_SCORE: u32 = 1000;

/// Verdict of rating a physical device. Hard requirement failures stay apart
/// from legitimately low scores, so a weak but usable device is never
/// confused with an unusable one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Suitability {
    Disqualified,
    Eligible(u32),
}

/// One enumerated physical device. The handle is a non-owning reference into
/// the instance; properties, features and queue families are cached up front
/// so rating needs no further driver calls.
pub struct PhysicalDevice {
    pub physical_device: vk::PhysicalDevice,
    props: PhysicalDeviceProperties,
    features: PhysicalDeviceFeatures,
    queue_family_props: Vec<QueueFamilyProperties>,
}

impl PhysicalDevice {
    pub fn new(instance: &ash::Instance, physical_device: vk::PhysicalDevice) -> Self {
        let props = unsafe { instance.get_physical_device_properties(physical_device) };
        let features = unsafe { instance.get_physical_device_features(physical_device) };
        let queue_family_props =
            unsafe { instance.get_physical_device_queue_family_properties(physical_device) };

        Self {
            physical_device,
            props,
            features,
            queue_family_props,
        }
    }

    pub fn name(&self) -> String {
        // device_name is a fixed size NUL terminated C buffer
        unsafe { CStr::from_ptr(self.props.device_name.as_ptr()) }
            .to_string_lossy()
            .into_owned()
    }

    /// The queue family indexes this device exposes. Recomputed per call,
    /// never cached.
    pub fn queue_families(&self) -> QueueFamilyIndicies {
        find_queue_families(&self.queue_family_props)
    }

    /// Rates this device for use by the application.
    pub fn rate(&self) -> Suitability {
        debug!(
            "Device {} of type {:?}, max image dimension 2d: {}",
            self.name(),
            self.props.device_type,
            self.props.limits.max_image_dimension2_d,
        );
        debug!(
            "Device {} supports geometry shader: {}",
            self.name(),
            self.features.geometry_shader == vk::TRUE,
        );

        let indicies = self.queue_families();
        debug!(
            "Device {} has a graphics queue family: {}",
            self.name(),
            indicies.is_complete(),
        );

        let suitability = rate_device(&self.props, &self.features, &indicies);
        debug!("Device {} rated: {:?}", self.name(), suitability);
        suitability
    }
}

/// Scores a device from its capabilities. The application cannot function
/// without geometry shaders or a graphics capable queue family; anything else
/// only moves the score.
fn rate_device(
    props: &PhysicalDeviceProperties,
    features: &PhysicalDeviceFeatures,
    indicies: &QueueFamilyIndicies,
) -> Suitability {
    if features.geometry_shader != vk::TRUE {
        return Suitability::Disqualified;
    }
    if !indicies.is_complete() {
        return Suitability::Disqualified;
    }

    let mut score = 0;
    if props.device_type == PhysicalDeviceType::DISCRETE_GPU {
        score += DISCRETE_GPU_SCORE;
    }
    // maximum possible size of textures affects graphics quality
    score += props.limits.max_image_dimension2_d;

    Suitability::Eligible(score)
}
