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

//! Output formatting. All unit labels, placeholder strings, and the
//! presentation-layer value corrections live here; discovery hands over raw
//! integers only.

use crate::config::Metric;
use crate::hwmon::{Category, SensorReading};
use crate::quirks::{self, QuirkState};

/// Convert a raw reading into its displayed value and unit label.
///
/// Temperatures arrive in milli-degrees and are corrected per device quirk
/// before the metric conversion; fan speeds are already in RPM.
pub fn display_value(r: &SensorReading, quirks: &QuirkState, metric: Metric) -> (i64, &'static str) {
    match r.category {
        Category::Temp => {
            let celsius = quirks::apply_temp_correction(&r.device_name, r.raw_value / 1000, quirks);
            (metric.convert(celsius), metric.unit())
        }
        Category::Fan => (r.raw_value, "RPM"),
    }
}

/// One line per sensor, tab-separated.
pub fn flat(tag: &str, sensors: &[SensorReading], quirks: &QuirkState, metric: Metric) -> String {
    let mut lines = Vec::with_capacity(sensors.len());
    for r in sensors {
        let (value, unit) = display_value(r, quirks, metric);
        let units = match r.category {
            Category::Temp => format!("{}\t\t{} {}", unit, r.category.describe(), r.index),
            Category::Fan => format!("{}\t{} {}", unit, r.category.describe(), r.index),
        };
        lines.push(format!("{} \t {} \t {} {}", tag, r.device_name, value, units));
    }
    lines.join("\n")
}

/// Placeholder for a device that yielded no usable readings.
pub fn flat_placeholder(tag: &str, name: &str) -> String {
    format!("{}   {} \t\t n/a", tag, name)
}

/// Box-character tree, one device per block. The closing branch goes on the
/// final reading; a skipped sibling can leave `index < sibling_count` on the
/// last entry, so position decides, not the sibling bookkeeping.
pub fn tree(
    tag: &str,
    name: &str,
    sensors: &[SensorReading],
    quirks: &QuirkState,
    metric: Metric,
) -> String {
    let mut lines = vec![format!("{} ({})", tag, name)];
    for (i, r) in sensors.iter().enumerate() {
        let branch = if i + 1 == sensors.len() { "└─" } else { "├─" };
        let (value, unit) = display_value(r, quirks, metric);
        lines.push(format!(
            "{} {} {}: {} {}",
            branch,
            r.category.describe(),
            r.index,
            value,
            unit
        ));
    }
    lines.join("\n")
}

pub fn tree_placeholder(tag: &str, name: &str) -> String {
    format!("{} ({})\n└─ n/a", tag, name)
}
