use std::collections::BTreeMap;

use tracing::info;

use crate::error::{CapabilityKind, SetupError};

/// Availability of one named capability with respect to a requirement list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SupportStatus {
    /// Requested and exposed by the host.
    Satisfied,
    /// Exposed by the host but not requested.
    Unused,
    /// Requested but nowhere to be found.
    Missing,
}

impl SupportStatus {
    fn icon(&self) -> &'static str {
        match self {
            SupportStatus::Satisfied => "[x]",
            SupportStatus::Unused => "[ ]",
            SupportStatus::Missing => " ! ",
        }
    }
}

/// Result of matching a requested capability name set against what the host
/// exposes. Built fresh per requirement list and never mutated afterwards, so
/// running the same check again always gives the same verdict. Requirement
/// sets that arrive in pieces (windowing extensions plus optional debug
/// extensions) must be unioned by the caller before checking.
pub struct SupportReport {
    kind: CapabilityKind,
    entries: BTreeMap<String, SupportStatus>,
}

impl SupportReport {
    /// Matches `requested` names against the `available` ones. Names match by
    /// exact, case sensitive comparison; duplicates on either side collapse.
    pub fn check<A, R>(kind: CapabilityKind, available: A, requested: R) -> Self
    where
        A: IntoIterator,
        A::Item: Into<String>,
        R: IntoIterator,
        R::Item: Into<String>,
    {
        let mut entries = available
            .into_iter()
            .map(|name| (name.into(), SupportStatus::Unused))
            .collect::<BTreeMap<String, SupportStatus>>();

        for name in requested {
            let name = name.into();
            let status = match entries.get(&name) {
                None | Some(SupportStatus::Missing) => SupportStatus::Missing,
                Some(_) => SupportStatus::Satisfied,
            };
            entries.insert(name, status);
        }

        Self { kind, entries }
    }

    /// True iff every requested name was found.
    pub fn all_supported(&self) -> bool {
        !self
            .entries
            .values()
            .any(|status| *status == SupportStatus::Missing)
    }

    /// The requested names the host does not expose.
    pub fn missing(&self) -> Vec<String> {
        self.entries
            .iter()
            .filter(|(_, status)| **status == SupportStatus::Missing)
            .map(|(name, _)| name.clone())
            .collect()
    }

    /// Logs one icon annotated line per known name.
    pub fn log_statuses(&self) {
        info!("{} status:", self.kind);
        for (name, status) in &self.entries {
            info!("\t {} {}", status.icon(), name);
        }
    }

    /// Turns an unsupported verdict into the fatal capability error.
    pub fn into_result(self) -> Result<(), SetupError> {
        if self.all_supported() {
            Ok(())
        } else {
            Err(SetupError::MissingCapabilities {
                kind: self.kind,
                missing: self.missing(),
            })
        }
    }
}
