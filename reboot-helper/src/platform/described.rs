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

//! Platform backed by a YAML description of the chassis.
//!
//! Each module lists the command that power-cycles it. Modules without a
//! command report reboot as not implemented.

use std::path::{Path, PathBuf};

use anyhow::Result;
use log::debug;

use reboot_helper_common::process::Command;

use super::{Chassis, Module, ModuleError, Platform};
use crate::config::{ChassisConfig, Config, ModuleConfig};

const MODULE_NAME_ENV: &str = "REBOOT_HELPER_MODULE";

pub struct DescribedPlatform {
    config_file: PathBuf,
}

impl DescribedPlatform {
    pub fn new<P: AsRef<Path>>(config_file: P) -> Self {
        Self {
            config_file: config_file.as_ref().to_path_buf(),
        }
    }
}

impl Platform for DescribedPlatform {
    fn chassis(&self) -> Result<Option<Box<dyn Chassis>>> {
        debug!(
            "Loading platform description {}...",
            self.config_file.display()
        );
        let config = Config::parse(&self.config_file)?;

        Ok(config
            .chassis
            .map(|chassis| Box::new(DescribedChassis::from(chassis)) as Box<dyn Chassis>))
    }
}

struct DescribedChassis {
    smart_switch: bool,
    modules: Vec<DescribedModule>,
}

impl From<ChassisConfig> for DescribedChassis {
    fn from(config: ChassisConfig) -> Self {
        Self {
            smart_switch: config.smart_switch,
            modules: config.modules.into_iter().map(DescribedModule::from).collect(),
        }
    }
}

impl Chassis for DescribedChassis {
    fn all_modules(&self) -> Result<Vec<&dyn Module>> {
        Ok(self
            .modules
            .iter()
            .map(|module| module as &dyn Module)
            .collect())
    }

    fn is_smart_switch(&self) -> bool {
        self.smart_switch
    }
}

struct DescribedModule {
    name: String,
    command: Vec<String>,
}

impl From<ModuleConfig> for DescribedModule {
    fn from(config: ModuleConfig) -> Self {
        Self {
            name: config.name,
            command: config.reboot,
        }
    }
}

impl Module for DescribedModule {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn reboot(&self) -> std::result::Result<(), ModuleError> {
        let (program, args) = self
            .command
            .split_first()
            .ok_or(ModuleError::NotImplemented)?;

        debug!("Executing {:?} for module {}", self.command, self.name);
        let output = Command::new(program)
            .args(args)
            .env(MODULE_NAME_ENV, &self.name)
            .run_with_output()?;
        output.exit_ok()?;

        Ok(())
    }
}
