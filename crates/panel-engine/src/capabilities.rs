//! Static feature flags a panel family advertises to higher layers.

use serde::{Deserialize, Serialize};

/// Which displays and modes a front panel provides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct FrontpanelCapabilities {
    pub has_speed_display: bool,
    pub has_heading_display: bool,
    pub has_altitude_display: bool,
    pub has_vertical_speed_display: bool,
    pub can_display_barometric_pressure: bool,
    pub can_display_qnh_qfe: bool,
    pub has_pilot_course_display: bool,
    pub has_copilot_course_display: bool,
    pub supports_alphanumeric_display: bool,
    pub has_flight_level_mode: bool,
    pub has_mach_speed_mode: bool,
}

impl FrontpanelCapabilities {
    /// A panel with no displays at all.
    pub const NONE: Self = Self {
        has_speed_display: false,
        has_heading_display: false,
        has_altitude_display: false,
        has_vertical_speed_display: false,
        can_display_barometric_pressure: false,
        can_display_qnh_qfe: false,
        has_pilot_course_display: false,
        has_copilot_course_display: false,
        supports_alphanumeric_display: false,
        has_flight_level_mode: false,
        has_mach_speed_mode: false,
    };

    pub fn has_any_display(&self) -> bool {
        self.has_speed_display
            || self.has_heading_display
            || self.has_altitude_display
            || self.has_vertical_speed_display
            || self.can_display_barometric_pressure
            || self.has_pilot_course_display
            || self.has_copilot_course_display
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn none_equals_default() {
        assert_eq!(FrontpanelCapabilities::NONE, FrontpanelCapabilities::default());
        assert!(!FrontpanelCapabilities::NONE.has_any_display());
    }

    #[test]
    fn serializes_every_flag() -> Result<(), serde_json::Error> {
        let caps = FrontpanelCapabilities {
            has_heading_display: true,
            ..FrontpanelCapabilities::NONE
        };
        let json = serde_json::to_value(caps)?;
        let flags = json.as_object().map(|o| o.len());
        assert_eq!(flags, Some(11));
        assert_eq!(json["has_heading_display"], true);
        assert!(caps.has_any_display());
        Ok(())
    }
}
