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
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::logger;

/// Location of the hardware sensor data, as of kernel 4.4+.
pub const HWMON_ROOT: &str = "/sys/class/hwmon";

/// Attribute file holding the hardware device name.
pub const NAME_FILE: &str = "name";

const INPUT_SUFFIX: &str = "_input";

/// Sensor families tempchk knows how to read. The order here fixes both
/// discovery and output order: temperatures before fans.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Temp,
    Fan,
}

impl Category {
    pub const ALL: [Category; 2] = [Category::Temp, Category::Fan];

    /// Attribute file prefix, e.g. `temp` in `temp1_input`.
    pub fn prefix(self) -> &'static str {
        match self {
            Category::Temp => "temp",
            Category::Fan => "fan",
        }
    }

    /// Human wording used by the renderers.
    pub fn describe(self) -> &'static str {
        match self {
            Category::Temp => "temperature sensor",
            Category::Fan => "fan sensor",
        }
    }
}

/// One validated measurement from a hwmon attribute file.
///
/// `raw_value` is the integer exactly as the kernel exposes it; unit
/// conversion and quirk offsets are applied once at render time.
#[derive(Debug, Clone)]
pub struct SensorReading {
    pub device_name: String,
    pub path: PathBuf,
    pub category: Category,
    pub raw_value: i64,
    /// 1-based position within the category for this device.
    pub index: usize,
    /// Total sensors found in this category for this device. Lets the tree
    /// renderer know when an entry is the last of its group.
    pub sibling_count: usize,
}

#[derive(Error, Debug)]
pub enum HwmonError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("no valid sensors")]
    NoValidSensors,
}

/// List device subdirectories under the hwmon root, sorted by entry name so
/// output order is deterministic. Failure here is fatal to the program; the
/// caller propagates it.
pub fn list_devices(root: &Path) -> io::Result<Vec<PathBuf>> {
    let mut dirs: Vec<PathBuf> = Vec::new();
    for ent in fs::read_dir(root)? {
        let path = ent?.path();
        if path.is_dir() {
            dirs.push(path);
        }
    }
    dirs.sort_by_key(|p| p.file_name().map(|s| s.to_os_string()));
    Ok(dirs)
}

/// Short tag for a device directory, e.g. `hwmon0`.
pub fn device_tag(dir: &Path) -> String {
    dir.file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| dir.display().to_string())
}

pub fn read_trimmed<P: AsRef<Path>>(p: P) -> io::Result<String> {
    let mut s = String::new();
    fs::File::open(p)?.read_to_string(&mut s)?;
    Ok(s.trim().to_string())
}

/// Enumerate all sensor readings for one device directory.
///
/// Discovery runs in two phases per category. The count phase probes
/// `<prefix><n>_input` for n = 1, 2, 3, ... and stops at the first missing,
/// unreadable, or empty file; hwmon numbers its attributes contiguously from
/// 1, so the first gap marks the end of the category. The read phase then
/// re-reads entries 1..=count: a file that has gone missing or empty since
/// the count ends the category early, while an entry whose content fails to
/// parse (or parses below 1) is skipped on its own and its siblings survive.
pub fn discover_sensors(device_name: &str, dir: &Path) -> Result<Vec<SensorReading>, HwmonError> {
    if device_name.is_empty() {
        return Err(HwmonError::InvalidInput("empty device name".into()));
    }
    if !dir.is_dir() {
        return Err(HwmonError::InvalidInput(format!(
            "{} is not a directory",
            dir.display()
        )));
    }

    let mut sensors: Vec<SensorReading> = Vec::new();

    for category in Category::ALL {
        let count = probe_count(dir, category);

        for i in 1..=count {
            let path = input_path(dir, category, i);
            logger::debug(&format!("opening sensor file at: {}", path.display()));

            let raw = match fs::read_to_string(&path) {
                Ok(s) if !s.is_empty() => s,
                // The count phase validated this index moments ago, but sysfs
                // content is transient; a gap now ends the category.
                _ => break,
            };
            logger::debug(&format!(
                "raw sensor file data from {} was: {}",
                path.display(),
                raw.trim_end()
            ));

            let value = match raw.trim().parse::<i64>() {
                Ok(v) if v >= 1 => v,
                // One malformed reading does not invalidate its siblings.
                _ => continue,
            };

            sensors.push(SensorReading {
                device_name: device_name.to_string(),
                path,
                category,
                raw_value: value,
                index: i,
                sibling_count: count,
            });
        }
    }

    if sensors.is_empty() {
        return Err(HwmonError::NoValidSensors);
    }
    Ok(sensors)
}

// First gap terminates counting, even if higher-numbered entries exist.
fn probe_count(dir: &Path, category: Category) -> usize {
    let mut count = 0;
    loop {
        match fs::read_to_string(input_path(dir, category, count + 1)) {
            Ok(s) if !s.is_empty() => count += 1,
            _ => break,
        }
    }
    count
}

fn input_path(dir: &Path, category: Category, idx: usize) -> PathBuf {
    dir.join(format!("{}{}{}", category.prefix(), idx, INPUT_SUFFIX))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::test_utils::add_device;
    use tempfile::TempDir;

    #[test]
    fn test_discover_two_temps() {
        let root = TempDir::new().unwrap();
        let dev = add_device(
            root.path(),
            "hwmon0",
            Some("k10temp"),
            &[("temp1_input", "45000\n"), ("temp2_input", "46000\n")],
        );

        let sensors = discover_sensors("k10temp", &dev).unwrap();
        assert_eq!(sensors.len(), 2);
        for (i, s) in sensors.iter().enumerate() {
            assert_eq!(s.category, Category::Temp);
            assert_eq!(s.index, i + 1);
            assert_eq!(s.sibling_count, 2);
            assert_eq!(s.device_name, "k10temp");
        }
        assert_eq!(sensors[0].raw_value, 45000);
        assert_eq!(sensors[1].raw_value, 46000);
    }

    #[test]
    fn test_discover_temps_before_fans() {
        let root = TempDir::new().unwrap();
        let dev = add_device(
            root.path(),
            "hwmon0",
            Some("nct6775"),
            &[("fan1_input", "1200\n"), ("temp1_input", "38000\n")],
        );

        let sensors = discover_sensors("nct6775", &dev).unwrap();
        assert_eq!(sensors.len(), 2);
        assert_eq!(sensors[0].category, Category::Temp);
        assert_eq!(sensors[1].category, Category::Fan);
        assert_eq!(sensors[1].raw_value, 1200);
        assert_eq!(sensors[1].sibling_count, 1);
    }

    #[test]
    fn test_first_gap_terminates_counting() {
        // temp2_input missing: temp3_input must stay invisible.
        let root = TempDir::new().unwrap();
        let dev = add_device(
            root.path(),
            "hwmon0",
            Some("chip"),
            &[("temp1_input", "41000\n"), ("temp3_input", "99000\n")],
        );

        let sensors = discover_sensors("chip", &dev).unwrap();
        assert_eq!(sensors.len(), 1);
        assert_eq!(sensors[0].index, 1);
        assert_eq!(sensors[0].sibling_count, 1);
        assert_eq!(sensors[0].raw_value, 41000);
    }

    #[test]
    fn test_malformed_entry_skipped_not_fatal() {
        let root = TempDir::new().unwrap();
        let dev = add_device(
            root.path(),
            "hwmon0",
            Some("chip"),
            &[("temp1_input", "garbage\n"), ("temp2_input", "40000\n")],
        );

        let sensors = discover_sensors("chip", &dev).unwrap();
        assert_eq!(sensors.len(), 1);
        assert_eq!(sensors[0].index, 2);
        assert_eq!(sensors[0].sibling_count, 2);
        assert_eq!(sensors[0].raw_value, 40000);
    }

    #[test]
    fn test_value_below_one_skipped() {
        let root = TempDir::new().unwrap();
        let dev = add_device(
            root.path(),
            "hwmon0",
            Some("chip"),
            &[("fan1_input", "0\n"), ("fan2_input", "900\n")],
        );

        let sensors = discover_sensors("chip", &dev).unwrap();
        assert_eq!(sensors.len(), 1);
        assert_eq!(sensors[0].category, Category::Fan);
        assert_eq!(sensors[0].index, 2);
        assert_eq!(sensors[0].raw_value, 900);
    }

    #[test]
    fn test_empty_first_entry_yields_no_category() {
        // A zero-byte temp1_input stops the count phase at 0.
        let root = TempDir::new().unwrap();
        let dev = add_device(
            root.path(),
            "hwmon0",
            Some("chip"),
            &[("temp1_input", ""), ("fan1_input", "750\n")],
        );

        let sensors = discover_sensors("chip", &dev).unwrap();
        assert_eq!(sensors.len(), 1);
        assert_eq!(sensors[0].category, Category::Fan);
    }

    #[test]
    fn test_no_valid_sensors() {
        let root = TempDir::new().unwrap();
        let dev = add_device(root.path(), "hwmon0", Some("acpitz"), &[]);

        match discover_sensors("acpitz", &dev) {
            Err(HwmonError::NoValidSensors) => {}
            other => panic!("expected NoValidSensors, got {:?}", other),
        }
    }

    #[test]
    fn test_all_entries_malformed_is_no_valid_sensors() {
        let root = TempDir::new().unwrap();
        let dev = add_device(
            root.path(),
            "hwmon0",
            Some("chip"),
            &[("temp1_input", "n/a\n"), ("temp2_input", "-5\n")],
        );

        assert!(matches!(
            discover_sensors("chip", &dev),
            Err(HwmonError::NoValidSensors)
        ));
    }

    #[test]
    fn test_invalid_input_cases() {
        let root = TempDir::new().unwrap();
        let dev = add_device(root.path(), "hwmon0", Some("chip"), &[]);

        assert!(matches!(
            discover_sensors("", &dev),
            Err(HwmonError::InvalidInput(_))
        ));
        assert!(matches!(
            discover_sensors("chip", &root.path().join("hwmon9")),
            Err(HwmonError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_list_devices_sorted_and_dirs_only() {
        let root = TempDir::new().unwrap();
        add_device(root.path(), "hwmon1", Some("b"), &[]);
        add_device(root.path(), "hwmon0", Some("a"), &[]);
        std::fs::write(root.path().join("stray_file"), "x").unwrap();

        let devices = list_devices(root.path()).unwrap();
        let tags: Vec<String> = devices.iter().map(|d| device_tag(d)).collect();
        assert_eq!(tags, vec!["hwmon0", "hwmon1"]);
    }

    #[test]
    fn test_list_devices_missing_root() {
        let root = TempDir::new().unwrap();
        assert!(list_devices(&root.path().join("nope")).is_err());
    }

    #[test]
    fn test_read_trimmed() {
        let root = TempDir::new().unwrap();
        let file = root.path().join("name");
        std::fs::write(&file, "  k10temp \n").unwrap();
        assert_eq!(read_trimmed(&file).unwrap(), "k10temp");

        std::fs::write(&file, "").unwrap();
        assert_eq!(read_trimmed(&file).unwrap(), "");

        assert!(read_trimmed(root.path().join("missing")).is_err());
    }

    #[test]
    fn test_device_tag() {
        assert_eq!(device_tag(Path::new("/sys/class/hwmon/hwmon3")), "hwmon3");
    }
}
