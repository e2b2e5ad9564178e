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

use std::path::PathBuf;

use clap::{ColorChoice, Parser};
use log::LevelFilter;

use super::{CLI_ABOUT, CLI_NAME, CLI_VERSION};
use reboot_helper::config::DEFAULT_PLATFORM_CONFIG;

const DEFAULT_LOG_LEVEL: &str = "error";

#[derive(Parser, Debug)]
#[clap(
    bin_name = CLI_NAME,
    version = CLI_VERSION,
    about = CLI_ABOUT,
    color(ColorChoice::Never),
    term_width(120),
)]
pub struct Arguments {
    /// Command name ("reboot")
    pub command: String,

    /// Module name as reported by the chassis
    #[clap(allow_hyphen_values = true)]
    pub module_name: String,

    #[clap(hide = true, allow_hyphen_values = true)]
    pub trailing: Vec<String>,

    /// Path for platform description
    #[clap(short, long, default_value = DEFAULT_PLATFORM_CONFIG)]
    pub platform_config: PathBuf,

    /// Set the logging level ("off"|"error"|"warn"|"info"|"debug"|"trace")
    #[clap(short, long, default_value = DEFAULT_LOG_LEVEL)]
    pub log_level: LevelFilter,

    /// Provide more detailed info
    #[clap(short, long)]
    pub verbose: bool,
}

impl Arguments {
    pub fn new() -> Result<Self, clap::Error> {
        Self::try_parse()
    }

    pub fn max_log_level(&self) -> LevelFilter {
        match self.verbose {
            true => self.log_level.max(LevelFilter::Debug),
            false => self.log_level,
        }
    }
}

pub fn usage() -> String {
    format!("Usage: {} <command> <module_name>", CLI_NAME)
}
