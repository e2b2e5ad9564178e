// SPDX-License-Identifier: Mulan PSL v2
/*
 * Copyright (c) 2024 SONiC reboot-helper developers.
 * reboot-helper is licensed under Mulan PSL v2.
 * You can use this software according to the terms and conditions of the Mulan PSL v2.
 * You may obtain a copy of Mulan PSL v2 at:
 *         http://license.coscl.org.cn/MulanPSL2
 *
 * THIS SOFTWARE IS PROVIDED ON AN "AS IS" BASIS, WITHOUT WARRANTIES OF ANY KIND,
 * EITHER EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO NON-INFRINGEMENT,
 * MERCHANTABILITY OR FIT FOR A PARTICULAR PURPOSE.
 * See the Mulan PSL v2 for more details.
 */

use std::{fs::File, path::Path};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

pub const DEFAULT_PLATFORM_CONFIG: &str = "/usr/share/sonic/platform/reboot_helper.yaml";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleConfig {
    pub name: String,
    /// Program and arguments executed to reboot the module
    #[serde(default)]
    pub reboot: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChassisConfig {
    #[serde(default)]
    pub smart_switch: bool,
    #[serde(default)]
    pub modules: Vec<ModuleConfig>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub chassis: Option<ChassisConfig>,
}

impl Config {
    pub fn parse<P: AsRef<Path>>(path: P) -> Result<Self> {
        let config_path = path.as_ref();
        let config_file = File::open(config_path)
            .with_context(|| format!("Failed to open config {}", config_path.display()))?;
        let instance = serde_yaml::from_reader(config_file)
            .with_context(|| format!("Failed to parse config {}", config_path.display()))?;

        Ok(instance)
    }

    #[cfg(test)]
    pub fn write<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let config_path = path.as_ref();
        let config_file = File::create(config_path)
            .with_context(|| format!("Failed to create config {}", config_path.display()))?;
        serde_yaml::to_writer(config_file, self)
            .with_context(|| format!("Failed to write config {}", config_path.display()))?;

        Ok(())
    }
}

#[cfg(test)]
pub fn temp_config_path(name: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!(
        "reboot_helper_{}_{}.yaml",
        name,
        std::process::id()
    ))
}
