// This file is part of Chip Tally.
// Copyright (C) 2025 Adam and contributors
// SPDX-License-Identifier: GPL-3.0-or-later

use bevy::prelude::*;
use serde::Deserialize;
use std::collections::{BTreeMap, BTreeSet};
use std::{fs, path::Path};

use crate::core::error::ConfigError;
use crate::tally::denomination::{canonical_total, Denomination, StackTemplate};

#[derive(Debug, Deserialize, Resource, Clone, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
    pub width: f32,
    pub height: f32,
    pub title: String,
}
impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 960.0,
            height: 1000.0,
            title: "Chip Tally".into(),
        }
    }
}

/// Logical board in y-down pixel units; the camera frames the whole board.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct BoardConfig {
    pub width: f32,
    pub height: f32,
    pub background: String,
    pub wall_thickness: f32,
}
impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            width: 960.0,
            height: 1400.0,
            background: "#0c3d29".into(),
            wall_thickness: 40.0,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ChipConfig {
    pub radius: f32,
    /// Ideal center distance, as a multiple of the radius.
    pub stack_spacing: f32,
    /// Floor for the center distance, as a multiple of the radius.
    pub min_spacing: f32,
    /// Full jitter span per axis, as a multiple of the radius.
    pub jitter: f32,
    pub restitution: f32,
    pub friction: f32,
    pub linear_damping: f32,
    pub angular_damping: f32,
    pub density: f32,
}
impl Default for ChipConfig {
    fn default() -> Self {
        Self {
            radius: 16.0,
            stack_spacing: 1.8,
            min_spacing: 0.9,
            jitter: 0.2,
            restitution: 0.2,
            friction: 0.95,
            linear_damping: 8.0,
            angular_damping: 8.0,
            density: 1.0,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ZoneLayoutConfig {
    pub area_width: f32,
    pub area_height: f32,
    pub scale_min: f32,
    pub scale_max: f32,
    pub scale_divisor: f32,
    pub ring_center_y: f32,
    pub ring_radius: f32,
    pub pot_size: f32,
    pub bank_center_y: f32,
    pub bank_width_factor: f32,
    pub bank_height_factor: f32,
    /// Shrink player areas so neighbouring ring zones never overlap.
    pub prevent_overlap: bool,
    pub zone_gap: f32,
    pub player_colors: Vec<String>,
    pub pot_color: String,
    pub bank_color: String,
    pub player_alpha: f32,
    pub pot_alpha: f32,
    pub bank_alpha: f32,
}
impl Default for ZoneLayoutConfig {
    fn default() -> Self {
        Self {
            area_width: 260.0,
            area_height: 200.0,
            scale_min: 0.6,
            scale_max: 1.2,
            scale_divisor: 6.0,
            ring_center_y: 540.0,
            ring_radius: 360.0,
            pot_size: 300.0,
            bank_center_y: 1200.0,
            bank_width_factor: 1.6,
            bank_height_factor: 1.1,
            prevent_overlap: true,
            zone_gap: 4.0,
            player_colors: [
                "#ff6b6b", "#ffa502", "#2ed573", "#1e90ff", "#a55eea", "#ff9ff3", "#2f3542",
                "#c8d6e5",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
            pot_color: "#f1f2f6".into(),
            bank_color: "#ffd32a".into(),
            player_alpha: 0.22,
            pot_alpha: 0.18,
            bank_alpha: 0.24,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct StackConfig {
    pub denominations: Vec<Denomination>,
    pub player_template: StackTemplate,
    pub bank_template: StackTemplate,
    pub default_total: u32,
    pub min_total: u32,
    pub max_total: u32,
    pub rounding_step: u32,
}
impl Default for StackConfig {
    fn default() -> Self {
        Self {
            denominations: vec![
                Denomination::new(1, "#f1f2f6"),
                Denomination::new(5, "#ff6b6b"),
                Denomination::new(10, "#2ed573"),
                Denomination::new(50, "#2f3542"),
            ],
            player_template: BTreeMap::from([(1, 10), (5, 4), (10, 7), (50, 0)]),
            bank_template: BTreeMap::from([(1, 20), (5, 10), (10, 8), (50, 1)]),
            default_total: 100,
            min_total: 100,
            max_total: 10_000,
            rounding_step: 100,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct PlayerLimits {
    pub min: u32,
    pub max: u32,
    pub default: u32,
}
impl Default for PlayerLimits {
    fn default() -> Self {
        Self {
            min: 1,
            max: 16,
            default: 4,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct DragConfig {
    pub enabled: bool,
    pub grab_radius: f32,
    pub pull_strength: f32,
    pub max_speed: f32,
}
impl Default for DragConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            grab_radius: 24.0,
            pull_strength: 18.0,
            max_speed: 2500.0,
        }
    }
}

#[derive(Debug, Deserialize, Resource, Clone, PartialEq)]
#[serde(default)]
pub struct TallyConfig {
    pub window: WindowConfig,
    pub board: BoardConfig,
    pub chips: ChipConfig,
    pub zones: ZoneLayoutConfig,
    pub stacks: StackConfig,
    pub players: PlayerLimits,
    pub drag: DragConfig,
    pub rapier_debug: bool,
    /// Seconds between periodic tally log lines (debug feature).
    pub log_interval: f32,
}
impl Default for TallyConfig {
    fn default() -> Self {
        Self {
            window: Default::default(),
            board: Default::default(),
            chips: Default::default(),
            zones: Default::default(),
            stacks: Default::default(),
            players: Default::default(),
            drag: Default::default(),
            rapier_debug: false,
            log_interval: 5.0,
        }
    }
}

/// Config problems found before logging is up: loader issues plus
/// `validate()` output. Logged once at startup.
#[derive(Resource, Debug, Default, Clone, PartialEq)]
pub struct ConfigWarnings(pub Vec<String>);

impl ConfigWarnings {
    pub fn collect(cfg: &TallyConfig, loader_issues: Vec<String>) -> Self {
        let mut all = loader_issues;
        all.extend(cfg.validate());
        Self(all)
    }
}

pub fn log_config_warnings(warnings: Res<ConfigWarnings>) {
    for w in &warnings.0 {
        warn!(target: "config", "CONFIG WARNING: {w}");
    }
}

fn merge_value(base: &mut ron::value::Value, overlay: ron::value::Value) {
    use ron::value::Value;
    match (base, overlay) {
        (Value::Map(bm), Value::Map(om)) => {
            for (k, v) in om.into_iter() {
                let mut incoming = Some(v);
                for (ek, ev) in bm.iter_mut() {
                    if *ek == k {
                        if let Some(val) = incoming.take() {
                            merge_value(ev, val);
                        }
                        break;
                    }
                }
                // Keys the base never had are appended once the scan is done.
                if let Some(val) = incoming {
                    bm.insert(k, val);
                }
            }
        }
        (b, o) => *b = o,
    }
}

impl TallyConfig {
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let data = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        ron::from_str(&data).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn load_or_default(path: impl AsRef<Path>) -> (Self, Option<ConfigError>) {
        match Self::load_from_file(&path) {
            Ok(cfg) => (cfg, None),
            Err(e) => (Self::default(), Some(e)),
        }
    }

    /// Deep-merges every readable RON file in order; later files win per key.
    /// Returns the config, the files that contributed, and per-file issues.
    pub fn load_layered<P, I>(paths: I) -> (Self, Vec<String>, Vec<String>)
    where
        P: AsRef<Path>,
        I: IntoIterator<Item = P>,
    {
        use ron::value::Value;
        let mut merged: Option<Value> = None;
        let mut used = Vec::new();
        let mut errors = Vec::new();
        for p in paths {
            let path_ref = p.as_ref();
            match fs::read_to_string(path_ref) {
                Ok(txt) => match ron::from_str::<Value>(&txt) {
                    Ok(val) => {
                        if let Some(cur) = &mut merged {
                            merge_value(cur, val);
                        } else {
                            merged = Some(val);
                        }
                        used.push(path_ref.as_os_str().to_string_lossy().to_string());
                    }
                    Err(e) => errors.push(format!("{}: parse error: {e}", path_ref.display())),
                },
                Err(e) => errors.push(format!("{}: read error: {e}", path_ref.display())),
            }
        }
        let Some(val) = merged else {
            return (TallyConfig::default(), used, errors);
        };
        match val.into_rust::<TallyConfig>() {
            Ok(cfg) => (cfg, used, errors),
            Err(e) => {
                errors.push(format!(
                    "failed to deserialize merged config; using defaults: {e}"
                ));
                (TallyConfig::default(), used, errors)
            }
        }
    }

    pub fn validate(&self) -> Vec<String> {
        let mut w = Vec::new();
        if self.window.width <= 0.0 || self.window.height <= 0.0 {
            w.push("window dimensions must be > 0".into());
        }
        if self.board.width <= 0.0 || self.board.height <= 0.0 {
            w.push("board dimensions must be > 0".into());
        }
        if self.chips.radius <= 0.0 {
            w.push("chips.radius must be > 0".into());
        }
        if self.chips.min_spacing <= 0.0 {
            w.push("chips.min_spacing must be > 0".into());
        }
        if self.chips.stack_spacing < self.chips.min_spacing {
            w.push(format!(
                "chips.stack_spacing {} below min_spacing {}; min_spacing wins",
                self.chips.stack_spacing, self.chips.min_spacing
            ));
        }
        if !(0.0..=1.0).contains(&self.chips.jitter) {
            w.push(format!(
                "chips.jitter {} outside 0..1 (fraction of radius)",
                self.chips.jitter
            ));
        }
        let z = &self.zones;
        if z.scale_min > z.scale_max {
            w.push(format!(
                "zones.scale_min ({}) greater than scale_max ({})",
                z.scale_min, z.scale_max
            ));
        }
        if z.scale_divisor <= 0.0 {
            w.push("zones.scale_divisor must be > 0".into());
        }
        if z.player_colors.is_empty() {
            w.push("zones.player_colors is empty; players fall back to white".into());
        }
        for color in z
            .player_colors
            .iter()
            .chain([&z.pot_color, &z.bank_color, &self.board.background])
        {
            if Srgba::hex(color).is_err() {
                w.push(format!("invalid hex color {color:?}"));
            }
        }
        if self.players.min == 0 {
            w.push("players.min must be >= 1".into());
        }
        if self.players.min > self.players.max {
            w.push(format!(
                "players.min ({}) greater than players.max ({})",
                self.players.min, self.players.max
            ));
        }
        let s = &self.stacks;
        if s.denominations.is_empty() {
            w.push("stacks.denominations is empty; nothing will spawn".into());
        }
        let mut seen = BTreeSet::new();
        for d in &s.denominations {
            if d.value == 0 {
                w.push("denomination value 0 is not allowed".into());
            }
            if !seen.insert(d.value) {
                w.push(format!("duplicate denomination value {}", d.value));
            }
            if Srgba::hex(&d.color).is_err() {
                w.push(format!(
                    "denomination {} has invalid color {:?}",
                    d.value, d.color
                ));
            }
        }
        for (label, template) in [("player_template", &s.player_template), ("bank_template", &s.bank_template)] {
            for key in template.keys() {
                if !seen.contains(key) {
                    w.push(format!(
                        "stacks.{label} references unknown denomination {key}"
                    ));
                }
            }
        }
        if s.rounding_step == 0 {
            w.push("stacks.rounding_step must be > 0".into());
        }
        if s.min_total > s.max_total {
            w.push(format!(
                "stacks.min_total ({}) greater than max_total ({})",
                s.min_total, s.max_total
            ));
        }
        let player_total = canonical_total(&s.denominations, &s.player_template);
        if player_total == 0 {
            w.push("stacks.player_template has a zero canonical total".into());
        } else if s.rounding_step % player_total != 0 {
            w.push(format!(
                "stacks.rounding_step {} is not a multiple of the player set total {}; chip counts will be rounded",
                s.rounding_step, player_total
            ));
        }
        if self.drag.enabled && self.drag.pull_strength <= 0.0 {
            w.push("drag.pull_strength must be > 0".into());
        }
        w
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_validate_clean() {
        let cfg = TallyConfig::default();
        assert!(cfg.validate().is_empty(), "{:?}", cfg.validate());
    }

    #[test]
    fn layered_later_file_overrides_nested_keys() {
        let dir = tempfile::tempdir().unwrap();
        let base = dir.path().join("tally.ron");
        let local = dir.path().join("tally.local.ron");
        fs::write(&base, "(chips: (radius: 12.0, jitter: 0.1), players: (max: 8))").unwrap();
        let mut f = fs::File::create(&local).unwrap();
        writeln!(f, "(chips: (radius: 20.0))").unwrap();

        let missing = dir.path().join("absent.ron");
        let (cfg, used, errors) = TallyConfig::load_layered([&base, &local, &missing]);
        assert_eq!(used.len(), 2);
        assert_eq!(errors.len(), 1, "missing file reported once");
        assert_eq!(cfg.chips.radius, 20.0);
        assert_eq!(cfg.chips.jitter, 0.1);
        assert_eq!(cfg.players.max, 8);
        assert_eq!(cfg.players.min, 1);
    }

    #[test]
    fn layered_overlay_adds_sections_the_base_lacks() {
        let dir = tempfile::tempdir().unwrap();
        let base = dir.path().join("tally.ron");
        let local = dir.path().join("tally.local.ron");
        fs::write(&base, "(chips: (radius: 12.0))").unwrap();
        fs::write(&local, "(drag: (max_speed: 900.0), log_interval: 2.0)").unwrap();

        let (cfg, used, errors) = TallyConfig::load_layered([&base, &local]);
        assert_eq!(used.len(), 2);
        assert!(errors.is_empty(), "{errors:?}");
        assert_eq!(cfg.chips.radius, 12.0);
        assert_eq!(cfg.drag.max_speed, 900.0);
        assert_eq!(cfg.drag.grab_radius, DragConfig::default().grab_radius);
        assert_eq!(cfg.log_interval, 2.0);
    }

    #[test]
    fn bad_template_and_step_are_flagged() {
        let mut cfg = TallyConfig::default();
        cfg.stacks.rounding_step = 150;
        cfg.stacks.player_template.insert(25, 2);
        let warnings = cfg.validate().join("\n");
        assert!(warnings.contains("unknown denomination 25"), "{warnings}");
        assert!(warnings.contains("not a multiple"), "{warnings}");
    }

    #[test]
    fn startup_warnings_include_validation() {
        let mut cfg = TallyConfig::default();
        cfg.stacks.rounding_step = 150;
        let warnings = ConfigWarnings::collect(&cfg, vec!["tally.ron: parse error".into()]);
        assert_eq!(warnings.0[0], "tally.ron: parse error");
        assert!(warnings.0[1..].iter().any(|w| w.contains("not a multiple")), "{warnings:?}");
        assert!(ConfigWarnings::collect(&TallyConfig::default(), Vec::new()).0.is_empty());
    }

    #[test]
    fn load_from_file_reports_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.ron");
        fs::write(&path, "(chips: (radius: ").unwrap();
        let (cfg, err) = TallyConfig::load_or_default(&path);
        assert_eq!(cfg, TallyConfig::default());
        assert!(matches!(err, Some(ConfigError::Parse { .. })));
    }
}
