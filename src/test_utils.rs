/*
 * Test utilities and mock helpers for Tempchk
 *
 * This module provides builders for fake hwmon directory trees so the
 * discovery engine and classifier can be exercised without real hardware.
 */

#[cfg(test)]
pub mod test_utils {
    use std::fs;
    use std::path::{Path, PathBuf};

    use tempfile::TempDir;

    /// Creates one device directory under `root` with an optional `name`
    /// attribute file and the given sensor attribute files.
    pub fn add_device(
        root: &Path,
        tag: &str,
        name: Option<&str>,
        files: &[(&str, &str)],
    ) -> PathBuf {
        let dir = root.join(tag);
        fs::create_dir_all(&dir).unwrap();
        if let Some(name) = name {
            fs::write(dir.join("name"), name).unwrap();
        }
        for (file, content) in files {
            fs::write(dir.join(file), content).unwrap();
        }
        dir
    }

    /// Writes a fake /proc/cpuinfo next to the mock hwmon tree.
    pub fn write_cpuinfo(dir: &Path, content: &str) -> PathBuf {
        let path = dir.join("cpuinfo");
        fs::write(&path, content).unwrap();
        path
    }

    /// Creates a mock hwmon root with two populated devices and one bare
    /// entry, the shape a typical desktop exposes.
    pub fn create_mock_hwmon_root() -> TempDir {
        let root = TempDir::new().unwrap();
        add_device(
            root.path(),
            "hwmon0",
            Some("k10temp\n"),
            &[("temp1_input", "45500\n"), ("temp2_input", "38200\n")],
        );
        add_device(
            root.path(),
            "hwmon1",
            Some("nct6775\n"),
            &[
                ("temp1_input", "29000\n"),
                ("fan1_input", "1200\n"),
                ("fan2_input", "800\n"),
            ],
        );
        // No name file, no inputs; subsystem entries like this are normal.
        add_device(root.path(), "hwmon2", None, &[]);
        root
    }
}

#[cfg(test)]
mod tests {
    use super::test_utils::*;
    use crate::hwmon;

    #[test]
    fn test_mock_hwmon_root_shape() {
        let root = create_mock_hwmon_root();
        let devices = hwmon::list_devices(root.path()).unwrap();
        assert_eq!(devices.len(), 3);
        assert_eq!(hwmon::read_trimmed(devices[0].join("name")).unwrap(), "k10temp");
        assert_eq!(hwmon::read_trimmed(devices[1].join("name")).unwrap(), "nct6775");
        assert!(!devices[2].join("name").exists());
    }

    #[test]
    fn test_add_device_writes_attributes() {
        let root = tempfile::TempDir::new().unwrap();
        let dev = add_device(
            root.path(),
            "hwmon7",
            Some("chip"),
            &[("temp1_input", "1000\n")],
        );
        assert_eq!(hwmon::read_trimmed(dev.join("temp1_input")).unwrap(), "1000");
    }
}
