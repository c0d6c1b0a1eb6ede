mod physical_device;

use std::collections::BTreeMap;

use anyhow::Result;
use tracing::debug;

use crate::error::SetupError;
use crate::vulkan::InstanceGuard;

pub use self::physical_device::{PhysicalDevice, Suitability};

/// Wraps the Vulkan APIs to interact with physical devices
pub struct PhysicalDeviceManager<'instance> {
    instance_guard: &'instance InstanceGuard,
}

impl<'instance> PhysicalDeviceManager<'instance> {
    /// Creates a new PhysicalDeviceManager for the given instance.
    pub fn new(instance_guard: &'instance InstanceGuard) -> Self {
        Self { instance_guard }
    }

    /// Enumerates the physical devices on this machine and picks the highest
    /// rated one. Finding no devices at all and finding only disqualified
    /// devices are reported as distinct failures.
    pub fn select_physical_device(&self) -> Result<PhysicalDevice> {
        let physical_devices =
            unsafe { self.instance_guard.instance.enumerate_physical_devices()? };
        debug!("Detected {} devices", physical_devices.len());
        if physical_devices.is_empty() {
            return Err(SetupError::NoPhysicalDevice.into());
        }

        let candidates = physical_devices
            .into_iter()
            .map(|physical_device| {
                let physical_device =
                    PhysicalDevice::new(&self.instance_guard.instance, physical_device);
                (physical_device.rate(), physical_device)
            })
            .collect::<Vec<_>>();

        let (score, winner) = best_candidate(candidates).ok_or(SetupError::NoSuitableDevice)?;
        debug!("Device {} chosen with score: {}", winner.name(), score);
        Ok(winner)
    }
}

/// Ranks eligible candidates by score and takes the maximum. Ties break
/// arbitrarily; disqualified candidates never win.
fn best_candidate<T>(candidates: impl IntoIterator<Item = (Suitability, T)>) -> Option<(u32, T)> {
    let mut ranking: BTreeMap<u32, Vec<T>> = BTreeMap::new();
    for (suitability, candidate) in candidates {
        if let Suitability::Eligible(score) = suitability {
            ranking.entry(score).or_default().push(candidate);
        }
    }
    ranking
        .into_iter()
        .next_back()
        .and_then(|(score, mut winners)| winners.pop().map(|winner| (score, winner)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn highest_scoring_candidate_wins() {
        let candidates = vec![
            (Suitability::Disqualified, "llvmpipe"),
            (Suitability::Eligible(250), "integrated"),
            (Suitability::Eligible(1300), "discrete"),
            (Suitability::Disqualified, "headless"),
        ];
        assert_eq!(best_candidate(candidates), Some((1300, "discrete")));
    }

    #[test]
    fn no_candidates_yields_none() {
        assert_eq!(best_candidate(Vec::<(Suitability, &str)>::new()), None);
    }

    #[test]
    fn all_disqualified_yields_none() {
        let candidates = vec![
            (Suitability::Disqualified, "a"),
            (Suitability::Disqualified, "b"),
        ];
        assert_eq!(best_candidate(candidates), None);
    }

    #[test]
    fn ties_resolve_to_one_of_the_tied_candidates() {
        let candidates = vec![
            (Suitability::Eligible(500), "first"),
            (Suitability::Eligible(500), "second"),
        ];
        let (score, winner) = best_candidate(candidates).unwrap();
        assert_eq!(score, 500);
        assert!(winner == "first" || winner == "second");
    }

    #[test]
    fn an_eligible_zero_score_still_wins_over_disqualified() {
        let candidates = vec![
            (Suitability::Disqualified, "broken"),
            (Suitability::Eligible(0), "weak"),
        ];
        assert_eq!(best_candidate(candidates), Some((0, "weak")));
    }
}
