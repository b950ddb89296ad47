//! Engine configuration.

use serde::{Deserialize, Serialize};

use crate::error::{PanelError, PanelResult};
use crate::family::PanelFamily;

/// How the first report after connecting is treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InitialReportPolicy {
    /// Diff the first report against all zeros, so every control already
    /// engaged at connection is reported as newly active.
    #[default]
    SeedZero,
    /// Take the first report as the baseline without emitting control
    /// events. Sensor values are still captured.
    SeedCurrent,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub initial_report: InitialReportPolicy,
    /// Raises the family's minimum accepted report length. Values below the
    /// family minimum are ignored.
    pub min_report_len_override: Option<usize>,
    /// Trace bit transitions that match no control.
    pub log_unmapped_bits: bool,
    /// Capacity of channels created with [`EngineConfig::event_channel`].
    pub event_capacity: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            initial_report: InitialReportPolicy::SeedZero,
            min_report_len_override: None,
            log_unmapped_bits: false,
            event_capacity: 256,
        }
    }
}

impl EngineConfig {
    pub fn from_json_str(json: &str) -> PanelResult<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| PanelError::Config(e.to_string()))?;
        if config.event_capacity == 0 {
            return Err(PanelError::Config(
                "event_capacity must be at least 1".to_string(),
            ));
        }
        Ok(config)
    }

    pub fn effective_min_len<F: PanelFamily>(&self) -> usize {
        self.min_report_len_override
            .map_or(F::MIN_REPORT_LEN, |len| len.max(F::MIN_REPORT_LEN))
    }

    pub fn event_channel<C>(
        &self,
    ) -> (
        crossbeam::channel::Sender<crate::PanelEvent<C>>,
        crossbeam::channel::Receiver<crate::PanelEvent<C>>,
    ) {
        crate::event::event_channel(self.event_capacity.max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_json_is_default() -> PanelResult<()> {
        assert_eq!(EngineConfig::from_json_str("{}")?, EngineConfig::default());
        Ok(())
    }

    #[test]
    fn parses_policy_names() -> PanelResult<()> {
        let config = EngineConfig::from_json_str(
            r#"{ "initial_report": "seed_current", "log_unmapped_bits": true }"#,
        )?;
        assert_eq!(config.initial_report, InitialReportPolicy::SeedCurrent);
        assert!(config.log_unmapped_bits);
        assert_eq!(config.event_capacity, 256);
        Ok(())
    }

    #[test]
    fn rejects_bad_input() {
        assert!(matches!(
            EngineConfig::from_json_str(r#"{ "initial_report": "sometimes" }"#),
            Err(PanelError::Config(_))
        ));
        assert!(matches!(
            EngineConfig::from_json_str(r#"{ "event_capacity": 0 }"#),
            Err(PanelError::Config(_))
        ));
    }
}
