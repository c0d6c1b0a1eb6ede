use std::ffi::{CStr, CString};

use anyhow::Result;
use ash::{
    extensions::ext::DebugUtils,
    vk::{make_api_version, ApplicationInfo, InstanceCreateInfo, API_VERSION_1_3},
    Entry, Instance,
};
use tracing::debug;

use crate::config::ContextConfig;
use crate::error::CapabilityKind;
use crate::vulkan::debug_utils_guard::DebugUtilsGuard;
use crate::vulkan::support::SupportReport;

const API_VERSION: u32 = API_VERSION_1_3;
const VALIDATION_LAYER_NAME: &str = "VK_LAYER_KHRONOS_validation";

/// Simple wrapper around Instance to ensure expected Vulkan calls are made,
/// especially cleanup on drop
pub struct InstanceGuard {
    pub instance: Instance,
}

impl InstanceGuard {
    /// Creates an Instance to interact with the core of Vulkan. Every
    /// extension and layer about to be requested is first verified against
    /// what the host actually exposes; requesting something the host lacks is
    /// a fatal capability error, not a driver crash later.
    pub fn try_new(
        entry: &Entry,
        required_window_extensions: Vec<String>,
        config: &ContextConfig,
    ) -> Result<Self> {
        let appname = CString::new(env!("CARGO_PKG_NAME"))?;
        let version_major = env!("CARGO_PKG_VERSION_MAJOR").parse::<u32>()?;
        let version_minor = env!("CARGO_PKG_VERSION_MINOR").parse::<u32>()?;
        let version_patch = env!("CARGO_PKG_VERSION_PATCH").parse::<u32>()?;
        let app_version = make_api_version(0, version_major, version_minor, version_patch);

        let app_info = ApplicationInfo::builder()
            .application_name(&appname)
            .application_version(app_version)
            .api_version(API_VERSION)
            .engine_name(&appname)
            .engine_version(app_version);

        // union the windowing and diagnostic extensions before the single
        // support check pass
        let extensions = Self::gen_required_extensions(required_window_extensions, config)?;
        Self::check_extension_support(entry, &extensions)?;
        let extensions = extensions
            .into_iter()
            .map(CString::new)
            .collect::<Result<Vec<_>, _>>()?;
        let extension_name_pointers: Vec<*const i8> = extensions
            .iter()
            .map(|extension| extension.as_ptr())
            .collect::<Vec<_>>();

        let layers = Self::gen_required_layers(config);
        Self::check_layer_support(entry, &layers)?;
        let layers = layers
            .into_iter()
            .map(CString::new)
            .collect::<Result<Vec<_>, _>>()?;
        let layer_name_pointers: Vec<*const i8> = layers
            .iter()
            .map(|layer| layer.as_ptr())
            .collect::<Vec<_>>();

        let mut create_info = InstanceCreateInfo::builder()
            .application_info(&app_info)
            .enabled_layer_names(&layer_name_pointers)
            .enabled_extension_names(&extension_name_pointers);

        let mut debug_create_info = DebugUtilsGuard::get_debug_create_info();
        if config.enable_validations {
            create_info = create_info.push_next(&mut debug_create_info);
        }

        let instance = unsafe { entry.create_instance(&create_info, None)? };
        debug!("Instance created");

        Ok(Self { instance })
    }

    /// Returns the instance extensions to request: the ones the windowing
    /// system needs, plus the debug utils extension when validations are
    /// enabled.
    fn gen_required_extensions(
        required_window_extensions: Vec<String>,
        config: &ContextConfig,
    ) -> Result<Vec<String>> {
        let mut extensions = required_window_extensions;
        if config.enable_validations {
            extensions.push(DebugUtils::name().to_str()?.to_owned());
        }
        Ok(extensions)
    }

    /// Returns the layers to request. Notably, includes the validation layer
    /// if validations are enabled.
    fn gen_required_layers(config: &ContextConfig) -> Vec<String> {
        let mut layer_names = vec![];
        if config.enable_validations {
            layer_names = vec![VALIDATION_LAYER_NAME.to_owned()];
        }
        debug!("Layers to enable: {}", layer_names.join(", "));
        layer_names
    }

    fn check_extension_support(entry: &Entry, requested: &[String]) -> Result<()> {
        let available = entry
            .enumerate_instance_extension_properties(None)?
            .into_iter()
            .map(|properties| {
                let name = unsafe { CStr::from_ptr(properties.extension_name.as_ptr()) };
                Ok(name.to_str()?.to_owned())
            })
            .collect::<Result<Vec<_>>>()?;

        let report = SupportReport::check(
            CapabilityKind::Extensions,
            available,
            requested.iter().cloned(),
        );
        report.log_statuses();
        report.into_result()?;
        Ok(())
    }

    fn check_layer_support(entry: &Entry, requested: &[String]) -> Result<()> {
        let available = entry
            .enumerate_instance_layer_properties()?
            .into_iter()
            .map(|properties| {
                let name = unsafe { CStr::from_ptr(properties.layer_name.as_ptr()) };
                Ok(name.to_str()?.to_owned())
            })
            .collect::<Result<Vec<_>>>()?;

        let report =
            SupportReport::check(CapabilityKind::Layers, available, requested.iter().cloned());
        report.log_statuses();
        report.into_result()?;
        Ok(())
    }
}

impl Drop for InstanceGuard {
    fn drop(&mut self) {
        unsafe { self.instance.destroy_instance(None) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validations_add_the_debug_utils_extension() {
        let config = ContextConfig {
            enable_validations: true,
        };
        let extensions = InstanceGuard::gen_required_extensions(
            vec!["VK_KHR_surface".to_owned()],
            &config,
        )
        .unwrap();
        assert!(extensions.contains(&"VK_KHR_surface".to_owned()));
        assert!(extensions.contains(&DebugUtils::name().to_str().unwrap().to_owned()));
    }

    #[test]
    fn window_extensions_pass_through_untouched_without_validations() {
        let config = ContextConfig {
            enable_validations: false,
        };
        let extensions = InstanceGuard::gen_required_extensions(
            vec!["VK_KHR_surface".to_owned(), "VK_KHR_win32_surface".to_owned()],
            &config,
        )
        .unwrap();
        assert_eq!(
            extensions,
            vec!["VK_KHR_surface".to_owned(), "VK_KHR_win32_surface".to_owned()]
        );
    }

    #[test]
    fn no_layers_requested_without_validations() {
        let config = ContextConfig {
            enable_validations: false,
        };
        assert!(InstanceGuard::gen_required_layers(&config).is_empty());
    }

    #[test]
    fn validation_layer_requested_with_validations() {
        let config = ContextConfig {
            enable_validations: true,
        };
        assert_eq!(
            InstanceGuard::gen_required_layers(&config),
            vec![VALIDATION_LAYER_NAME.to_owned()]
        );
    }
}
