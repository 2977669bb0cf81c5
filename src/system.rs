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

use std::fs;
use std::path::Path;

/// CPU info location, as of kernel 4.4+.
pub const CPUINFO_PATH: &str = "/proc/cpuinfo";

/// Raw CPU identification text. A missing or empty file is not an error;
/// callers treat `None` as "no identification available".
pub fn read_cpuinfo(path: &Path) -> Option<String> {
    let s = fs::read_to_string(path).ok()?;
    if s.is_empty() {
        None
    } else {
        Some(s)
    }
}

/// Best-effort human-readable CPU model, for the structured event log.
pub fn read_cpu_name() -> String {
    if let Ok(s) = fs::read_to_string(CPUINFO_PATH) {
        for line in s.lines() {
            if let Some((k, v)) = line.split_once(':') {
                if k.trim().eq_ignore_ascii_case("model name") && !v.trim().is_empty() {
                    return v.trim().to_string();
                }
            }
        }
    }
    String::new()
}
