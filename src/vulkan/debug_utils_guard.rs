use std::ffi::CStr;

use anyhow::Result;
use ash::{
    extensions::ext::DebugUtils,
    vk::{
        Bool32, DebugUtilsMessageSeverityFlagsEXT, DebugUtilsMessageTypeFlagsEXT,
        DebugUtilsMessengerCallbackDataEXT, DebugUtilsMessengerCreateInfoEXT,
        DebugUtilsMessengerCreateInfoEXTBuilder, DebugUtilsMessengerEXT,
    },
    Entry,
};
use tracing::{event, warn, Level};

use crate::config::ContextConfig;
use crate::vulkan::InstanceGuard;

/// Owns the debug utils messenger registration so it is torn down before the
/// instance it hangs off of.
pub struct DebugUtilsGuard {
    debug_utils: DebugUtils,
    extension: DebugUtilsMessengerEXT,
}

impl DebugUtilsGuard {
    /// Installs the debug messenger when validations are enabled. A host
    /// without the debug utils extension is not fatal: a warning is logged
    /// and the context runs without diagnostics.
    pub fn try_new(
        entry: &Entry,
        instance_guard: &InstanceGuard,
        config: &ContextConfig,
    ) -> Result<Option<Self>> {
        if !config.enable_validations {
            return Ok(None);
        }
        if !Self::is_available(entry)? {
            warn!("Debug utils extension not present, continuing without diagnostics");
            return Ok(None);
        }

        let debug_utils = DebugUtils::new(entry, &instance_guard.instance);
        let debug_create_info = Self::get_debug_create_info();
        let extension =
            unsafe { debug_utils.create_debug_utils_messenger(&debug_create_info, None)? };

        Ok(Some(Self {
            debug_utils,
            extension,
        }))
    }

    fn is_available(entry: &Entry) -> Result<bool> {
        let extension_properties = entry.enumerate_instance_extension_properties(None)?;
        Ok(extension_properties.iter().any(|properties| {
            let name = unsafe { CStr::from_ptr(properties.extension_name.as_ptr()) };
            name == DebugUtils::name()
        }))
    }

    pub fn get_debug_create_info<'a>() -> DebugUtilsMessengerCreateInfoEXTBuilder<'a> {
        DebugUtilsMessengerCreateInfoEXT::builder()
            .message_severity(
                DebugUtilsMessageSeverityFlagsEXT::ERROR
                    | DebugUtilsMessageSeverityFlagsEXT::WARNING
                    | DebugUtilsMessageSeverityFlagsEXT::INFO
                    | DebugUtilsMessageSeverityFlagsEXT::VERBOSE,
            )
            .message_type(
                DebugUtilsMessageTypeFlagsEXT::GENERAL
                    | DebugUtilsMessageTypeFlagsEXT::PERFORMANCE
                    | DebugUtilsMessageTypeFlagsEXT::VALIDATION,
            )
            .pfn_user_callback(Some(vulkan_debug_utils_callback))
    }
}

impl Drop for DebugUtilsGuard {
    fn drop(&mut self) {
        unsafe {
            self.debug_utils
                .destroy_debug_utils_messenger(self.extension, None)
        }
    }
}

/// Maps a messenger severity onto the level the logging collaborator
/// understands. Severities outside the four known ones map to nothing and
/// their messages are dropped.
fn severity_log_level(message_severity: DebugUtilsMessageSeverityFlagsEXT) -> Option<Level> {
    match message_severity {
        DebugUtilsMessageSeverityFlagsEXT::VERBOSE => Some(Level::TRACE),
        DebugUtilsMessageSeverityFlagsEXT::INFO => Some(Level::INFO),
        DebugUtilsMessageSeverityFlagsEXT::WARNING => Some(Level::WARN),
        DebugUtilsMessageSeverityFlagsEXT::ERROR => Some(Level::ERROR),
        _ => None,
    }
}

unsafe extern "system" fn vulkan_debug_utils_callback(
    message_severity: DebugUtilsMessageSeverityFlagsEXT,
    message_type: DebugUtilsMessageTypeFlagsEXT,
    p_callback_data: *const DebugUtilsMessengerCallbackDataEXT,
    _p_user_data: *mut std::ffi::c_void,
) -> Bool32 {
    let message = format!("{:?}", CStr::from_ptr((*p_callback_data).p_message));
    let ty = format!("{:?}", message_type).to_lowercase();

    match severity_log_level(message_severity) {
        Some(level) if level == Level::TRACE => event!(Level::TRACE, message = message, ty = ty),
        Some(level) if level == Level::INFO => event!(Level::INFO, message = message, ty = ty),
        Some(level) if level == Level::WARN => event!(Level::WARN, message = message, ty = ty),
        Some(level) if level == Level::ERROR => event!(Level::ERROR, message = message, ty = ty),
        _ => {}
    }
    // dont skip driver
    ash::vk::FALSE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_severities_map_to_matching_levels() {
        assert_eq!(
            severity_log_level(DebugUtilsMessageSeverityFlagsEXT::VERBOSE),
            Some(Level::TRACE)
        );
        assert_eq!(
            severity_log_level(DebugUtilsMessageSeverityFlagsEXT::INFO),
            Some(Level::INFO)
        );
        assert_eq!(
            severity_log_level(DebugUtilsMessageSeverityFlagsEXT::WARNING),
            Some(Level::WARN)
        );
        assert_eq!(
            severity_log_level(DebugUtilsMessageSeverityFlagsEXT::ERROR),
            Some(Level::ERROR)
        );
    }

    #[test]
    fn unknown_severities_are_dropped() {
        assert_eq!(
            severity_log_level(DebugUtilsMessageSeverityFlagsEXT::empty()),
            None
        );
        assert_eq!(
            severity_log_level(
                DebugUtilsMessageSeverityFlagsEXT::VERBOSE
                    | DebugUtilsMessageSeverityFlagsEXT::ERROR
            ),
            None
        );
    }
}
