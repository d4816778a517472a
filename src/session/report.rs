//! Serializable snapshot of a session, printed by `--headless`.

use serde::Serialize;

use super::session::{GameSession, SessionSettings, ZoneReport};
use crate::core::error::ConfigurationNotice;
use crate::layout::zones::ZoneId;
use crate::tally::denomination::StackCounts;

#[derive(Debug, Clone, Serialize)]
pub struct ZoneGeometry {
    pub id: ZoneId,
    pub center: [f32; 2],
    pub size: [f32; 2],
    pub color: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SessionReport {
    pub generation: u64,
    pub settings: SessionSettings,
    pub notices: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub config_warnings: Vec<String>,
    pub player_stack: StackCounts,
    pub bank_stack: StackCounts,
    pub geometry: Vec<ZoneGeometry>,
    pub zones: Vec<ZoneReport>,
    pub chip_count: usize,
    pub total_points: u32,
}

impl SessionReport {
    pub fn new(session: &GameSession, notices: &[ConfigurationNotice]) -> Self {
        Self {
            generation: session.generation(),
            settings: session.settings(),
            notices: notices.iter().map(ToString::to_string).collect(),
            config_warnings: Vec::new(),
            player_stack: session.player_counts().clone(),
            bank_stack: session.bank_counts().clone(),
            geometry: session
                .zones()
                .iter()
                .map(|z| ZoneGeometry {
                    id: z.id,
                    center: z.center.to_array(),
                    size: z.size.to_array(),
                    color: z.color.clone(),
                })
                .collect(),
            zones: session.zone_reports(),
            chip_count: session.chips().len(),
            total_points: session.tally().total_points(),
        }
    }

    pub fn with_config_warnings(mut self, warnings: &[String]) -> Self {
        self.config_warnings = warnings.to_vec();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::TallyConfig;
    use crate::session::session::{SessionRequest, SessionSlot};
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn report_serializes_zones_and_notices() {
        let cfg = TallyConfig::default();
        let mut slot = SessionSlot::default();
        let notices = slot.configure(
            SessionRequest { player_count: 3, total_points: Some(250) },
            &cfg,
            &mut StdRng::seed_from_u64(8),
        );
        let report = SessionReport::new(slot.active().unwrap(), &notices);
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["settings"]["total_points"], 300);
        assert_eq!(json["notices"][0], "stack total 250 adjusted to 300");
        assert_eq!(json["zones"][0]["id"], "player-0");
        assert_eq!(json["zones"][3]["id"], "pot");
        assert!(json["zones"][3]["aggregate"].is_null());
        assert_eq!(json["zones"][4]["aggregate"]["point_total"], 200);
        assert_eq!(json["player_stack"]["counts"]["10"], 21);
        assert_eq!(json["total_points"], 3 * 300 + 200);
        assert!(json.get("config_warnings").is_none());
    }

    #[test]
    fn config_warnings_ride_along_in_the_report() {
        let mut cfg = TallyConfig::default();
        cfg.stacks.rounding_step = 150;
        let warnings = cfg.validate();
        let mut slot = SessionSlot::default();
        let notices = slot.configure(
            SessionRequest { player_count: 2, total_points: Some(150) },
            &cfg,
            &mut StdRng::seed_from_u64(8),
        );
        let report = SessionReport::new(slot.active().unwrap(), &notices).with_config_warnings(&warnings);
        let json = serde_json::to_value(&report).unwrap();
        let listed = json["config_warnings"].as_array().unwrap();
        assert!(listed.iter().any(|w| w.as_str().is_some_and(|w| w.contains("not a multiple"))));
    }
}
