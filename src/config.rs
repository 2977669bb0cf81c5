/*
 * This file is part of Tempchk.
 *
 * Copyright (C) 2025 Tempchk contributors
 *
 * Tempchk is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * Tempchk is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with Tempchk. If not, see <https://www.gnu.org/licenses/>.
 */

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Temperature display metric. Conversion happens after quirk correction, on
/// whole degrees.
#[derive(Debug, Copy, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    C,
    F,
    K,
}

impl Metric {
    pub fn unit(self) -> &'static str {
        match self {
            Metric::C => "C",
            Metric::F => "F",
            Metric::K => "K",
        }
    }

    pub fn convert(self, celsius: i64) -> i64 {
        match self {
            Metric::C => celsius,
            Metric::F => celsius * 9 / 5 + 32,
            Metric::K => celsius + 273,
        }
    }
}

fn default_metric() -> Metric {
    Metric::C
}

/// Saved user preferences. Everything is optional; a missing or malformed
/// config file silently falls back to defaults, and CLI flags win over the
/// file.
#[derive(Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SavedConfig {
    #[serde(default = "default_metric")]
    pub metric: Metric,
    /// Render the tree view by default instead of the flat listing.
    #[serde(default)]
    pub tree: bool,
}

impl Default for SavedConfig {
    fn default() -> Self {
        SavedConfig {
            metric: default_metric(),
            tree: false,
        }
    }
}

pub fn config_path() -> PathBuf {
    if let Ok(xdg) = env::var("XDG_CONFIG_HOME") {
        return Path::new(&xdg).join("tempchk").join("config.json");
    }
    if let Ok(home) = env::var("HOME") {
        return Path::new(&home)
            .join(".config")
            .join("tempchk")
            .join("config.json");
    }
    PathBuf::from("/etc/tempchk/config.json")
}

pub fn load_saved_config() -> Option<SavedConfig> {
    let data = fs::read_to_string(config_path()).ok()?;
    serde_json::from_str(&data).ok()
}
