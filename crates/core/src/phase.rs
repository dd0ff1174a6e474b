//! Screening phase constants and validation.
//!
//! A pipeline entry always carries a phase as a `(key, status)` pair where
//! `status` is the human-readable label for `key`. The set of phases is
//! closed; transitions between them are not restricted.

use serde::{Deserialize, Serialize};

/// Company is tracked but the investor has not decided yet.
pub const PHASE_WAITING: &str = "WAITING";

/// Investor moved the company to a first meeting.
pub const PHASE_FIRST_MEETING: &str = "FIRST_MEETING";

/// Investor discarded the company after screening.
pub const PHASE_DISCARDED: &str = "DISCARDED";

/// Every known phase key paired with its display label.
pub const PHASES: &[(&str, &str)] = &[
    (PHASE_WAITING, "Waiting Decision"),
    (PHASE_FIRST_MEETING, "First Meeting"),
    (PHASE_DISCARDED, "Discarded after Screening"),
];

/// A screening phase as stored on a pipeline entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Phase {
    pub key: String,
    pub status: String,
}

impl Phase {
    /// The phase every freshly tracked company starts in.
    pub fn waiting() -> Self {
        Self {
            key: PHASE_WAITING.to_string(),
            status: status_label(PHASE_WAITING)
                .unwrap_or_default()
                .to_string(),
        }
    }
}

/// Look up the display label for a phase key.
pub fn status_label(key: &str) -> Option<&'static str> {
    PHASES
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, label)| *label)
}

/// Validate a requested phase and fill in its canonical label.
///
/// `status` may be omitted. When given it must equal the label paired with
/// `key`, so that key and label never drift apart on an entry.
pub fn resolve_phase(key: &str, status: Option<&str>) -> Result<Phase, String> {
    let label = status_label(key).ok_or_else(|| {
        let keys: Vec<&str> = PHASES.iter().map(|(k, _)| *k).collect();
        format!("Unknown phase '{key}'. Must be one of: {}", keys.join(", "))
    })?;

    if let Some(status) = status {
        if status != label {
            return Err(format!(
                "Status '{status}' does not match phase '{key}' (expected '{label}')"
            ));
        }
    }

    Ok(Phase {
        key: key.to_string(),
        status: label.to_string(),
    })
}
