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

use std::process;

use anyhow::Result;
use clap::error::ErrorKind;
use log::{debug, error};

use reboot_helper::{platform::DescribedPlatform, RebootHelper};

mod args;
mod logger;

use self::{args::Arguments, logger::Logger};

pub const CLI_NAME: &str = env!("CARGO_PKG_NAME");
pub const CLI_VERSION: &str = env!("CARGO_PKG_VERSION");
pub const CLI_ABOUT: &str = env!("CARGO_PKG_DESCRIPTION");

const EXIT_SUCCESS: i32 = 0;
const EXIT_FAILURE: i32 = 1;

const REBOOT_COMMAND: &str = "reboot";

fn run(args: Arguments) -> Result<i32> {
    Logger::initialize(args.max_log_level())?;
    debug!("Start with {:#?}", args);

    match args.command.as_str() {
        REBOOT_COMMAND => {
            let platform = DescribedPlatform::new(&args.platform_config);
            let mut helper = RebootHelper::new(platform);

            if !helper.reboot_module(&args.module_name) {
                return Ok(EXIT_FAILURE);
            }
            println!("Reboot command sent for module {}", args.module_name);
        }
        command => {
            println!("Unknown command: {}", command);
            return Ok(EXIT_FAILURE);
        }
    }

    Ok(EXIT_SUCCESS)
}

fn main() {
    let args = match Arguments::new() {
        Ok(args) => args,
        Err(e) => match e.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => e.exit(),
            _ => {
                println!("{}", args::usage());
                process::exit(EXIT_FAILURE);
            }
        },
    };

    let exit_code = match self::run(args) {
        Ok(exit_code) => exit_code,
        Err(e) => {
            match Logger::is_inited() {
                true => error!("{:?}", e),
                false => eprintln!("Error: {:?}", e),
            }
            EXIT_FAILURE
        }
    };

    process::exit(exit_code);
}
