use ash::vk::{QueueFamilyProperties, QueueFlags};

/// Holds the indexes of the relevant queue families for a physical device.
/// Created from a find_queue_families call. Only graphics submission matters
/// for now.
#[derive(Debug, Default, Clone, Copy)]
pub struct QueueFamilyIndicies {
    /// family capable of running graphics related commands
    pub graphics_family: Option<u32>,
}

impl QueueFamilyIndicies {
    /// True if all required queue families are available. A device without a
    /// complete set cannot be used no matter how well it scores otherwise.
    pub fn is_complete(&self) -> bool {
        self.graphics_family.is_some()
    }
}

/// Scans the families in order and records the first one matching each
/// required capability.
pub fn find_queue_families(
    queue_family_properties: &[QueueFamilyProperties],
) -> QueueFamilyIndicies {
    fn find_queue_family_index(
        queue_family_properties: &[QueueFamilyProperties],
        flags: QueueFlags,
    ) -> Option<u32> {
        queue_family_properties
            .iter()
            .position(|queue_family_props| queue_family_props.queue_flags.contains(flags))
            .map(|index| index as u32)
    }

    QueueFamilyIndicies {
        graphics_family: find_queue_family_index(queue_family_properties, QueueFlags::GRAPHICS),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn family(flags: QueueFlags) -> QueueFamilyProperties {
        QueueFamilyProperties {
            queue_flags: flags,
            queue_count: 1,
            ..Default::default()
        }
    }

    #[test]
    fn incomplete_when_no_family_supports_graphics() {
        let families = [family(QueueFlags::COMPUTE), family(QueueFlags::TRANSFER)];
        let indicies = find_queue_families(&families);
        assert_eq!(indicies.graphics_family, None);
        assert!(!indicies.is_complete());
    }

    #[test]
    fn first_qualifying_family_wins() {
        let families = [
            family(QueueFlags::TRANSFER),
            family(QueueFlags::GRAPHICS | QueueFlags::COMPUTE),
            family(QueueFlags::GRAPHICS),
        ];
        assert_eq!(find_queue_families(&families).graphics_family, Some(1));
    }

    #[test]
    fn complete_with_a_single_graphics_family() {
        let families = [family(QueueFlags::GRAPHICS)];
        assert!(find_queue_families(&families).is_complete());
    }

    #[test]
    fn empty_family_list_is_incomplete() {
        assert!(!find_queue_families(&[]).is_complete());
    }
}
