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

use std::path::{Path, PathBuf};

use crate::hwmon::{self, HwmonError};
use crate::logger;
use crate::system;

/// Global quirk flags, resolved once before any per-device discovery and
/// read-only afterwards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QuirkState {
    /// The AMD digital power module is active, either because a device
    /// declares itself `fam15h_power` or because the CPU is a Ryzen.
    pub amd_digital_power_module: bool,
}

/// Scan every device's declared name and the CPU identification data to
/// resolve the global quirk flags.
///
/// Devices without a readable name file are normal under the hwmon root and
/// are skipped. The only error is an empty device list.
pub fn classify_devices(devices: &[PathBuf], cpuinfo: &Path) -> Result<QuirkState, HwmonError> {
    if devices.is_empty() {
        return Err(HwmonError::InvalidInput("no device directories".into()));
    }

    let mut state = QuirkState::default();

    for dir in devices {
        let tag = hwmon::device_tag(dir);
        let name_path = dir.join(hwmon::NAME_FILE);
        logger::debug(&format!("{} --> {}", tag, name_path.display()));

        let name = match hwmon::read_trimmed(&name_path) {
            Ok(s) if !s.is_empty() => s,
            _ => {
                logger::debug(&format!(
                    "warning: {} does not contain a usable hardware name file, skipping",
                    tag
                ));
                continue;
            }
        };

        // Keep scanning after a match; flags are cumulative across devices.
        if name == "fam15h_power" {
            state.amd_digital_power_module = true;
        }
    }

    // Ryzen parts expose their power telemetry without loading fam15h_power,
    // so the name scan alone is not enough.
    if let Some(cpu) = system::read_cpuinfo(cpuinfo) {
        if cpu.contains("Ryzen") {
            state.amd_digital_power_module = true;
        }
    }

    Ok(state)
}

type CorrectionFn = fn(i64, &QuirkState) -> i64;

/// Corrections keyed by declared device name, applied to temperatures already
/// converted to whole degrees C. New hardware quirks get a row here rather
/// than a branch in the renderer.
const TEMP_CORRECTIONS: &[(&str, CorrectionFn)] = &[("k10temp", k10temp_offset)];

// k10temp reports a control temperature that sits 30 degrees below the die
// temperature whenever the digital power module is not supplying corrected
// values.
fn k10temp_offset(celsius: i64, quirks: &QuirkState) -> i64 {
    if quirks.amd_digital_power_module {
        celsius
    } else {
        celsius + 30
    }
}

pub fn apply_temp_correction(device_name: &str, celsius: i64, quirks: &QuirkState) -> i64 {
    match TEMP_CORRECTIONS.iter().find(|(name, _)| *name == device_name) {
        Some((_, correct)) => correct(celsius, quirks),
        None => celsius,
    }
}
