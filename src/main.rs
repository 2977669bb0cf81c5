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

mod config;
mod hwmon;
mod logger;
mod quirks;
mod render;
mod system;
#[cfg(test)]
mod test_utils;

use std::path::Path;

use anyhow::Context;

fn main() -> anyhow::Result<()> {
    // Gather args once
    let args: Vec<String> = std::env::args().collect();

    if args.iter().any(|a| a == "--version") {
        println!("tempchk v{}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    logger::set_debug(args.iter().any(|a| a == "--debug"));

    // Optional structured logging to /etc/tempchk/logs.json
    let logging_enabled = args.iter().any(|a| a == "--logging");
    if logging_enabled {
        logger::init_logging();
        logger::log_event(
            "startup",
            serde_json::json!({
                "args": args,
                "cpu": system::read_cpu_name(),
            }),
        );
    }

    let saved = config::load_saved_config().unwrap_or_default();
    let use_tree = args.iter().any(|a| a == "--tree") || saved.tree;
    let metric = saved.metric;

    // There will normally be at least one sensor exposed to the operating
    // system, but a machine with none at all is possible; only a missing or
    // unlistable root is fatal.
    let root = Path::new(hwmon::HWMON_ROOT);
    let devices = hwmon::list_devices(root)
        .with_context(|| format!("failed to list {}", root.display()))?;

    logger::debug("the following IDs are present in the hardware sensor monitoring directory:");
    for dir in &devices {
        logger::debug(&format!("* {}", hwmon::device_tag(dir)));
    }

    // Quirk flags must be fully resolved before the first reading is
    // interpreted; k10temp correction depends on them.
    let quirks = match quirks::classify_devices(&devices, Path::new(system::CPUINFO_PATH)) {
        Ok(q) => q,
        Err(e) => {
            eprintln!("{}", e);
            if logging_enabled {
                logger::log_event("fatal_error", serde_json::json!({ "error": e.to_string() }));
            }
            std::process::exit(1);
        }
    };

    for dir in &devices {
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

        match hwmon::discover_sensors(&name, dir) {
            Ok(sensors) => {
                if logging_enabled {
                    logger::log_event(
                        "device_scan",
                        serde_json::json!({
                            "device": tag,
                            "name": name,
                            "sensors": sensors
                                .iter()
                                .map(|s| s.path.display().to_string())
                                .collect::<Vec<_>>(),
                        }),
                    );
                }
                let out = if use_tree {
                    render::tree(&tag, &name, &sensors, &quirks, metric)
                } else {
                    render::flat(&tag, &sensors, &quirks, metric)
                };
                println!("{}", out);
            }
            Err(e) => {
                logger::debug(&format!(
                    "warning: {} does not contain valid sensor data ({}), nothing to print for this device",
                    tag, e
                ));
                let out = if use_tree {
                    render::tree_placeholder(&tag, &name)
                } else {
                    render::flat_placeholder(&tag, &name)
                };
                println!("{}", out);
            }
        }
    }

    Ok(())
}
