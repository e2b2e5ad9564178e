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

use anyhow::{Context, Result};
use flexi_logger::{Duplicate, LogSpecification, Logger as FlexiLogger, LoggerHandle, WriteMode};
use log::LevelFilter;
use once_cell::sync::OnceCell;

use reboot_helper_common::log::{format_console, SyslogWriter};

static LOGGER: OnceCell<Logger> = OnceCell::new();

/// Writes every record passing the threshold to syslog and stdout.
pub struct Logger {
    _handle: LoggerHandle,
}

impl Logger {
    fn stdout_duplicate(stdout_level: LevelFilter) -> Duplicate {
        match stdout_level {
            LevelFilter::Off => Duplicate::None,
            LevelFilter::Error => Duplicate::Error,
            LevelFilter::Warn => Duplicate::Warn,
            LevelFilter::Info => Duplicate::Info,
            LevelFilter::Debug => Duplicate::Debug,
            LevelFilter::Trace => Duplicate::Trace,
        }
    }
}

impl Logger {
    pub fn is_inited() -> bool {
        LOGGER.get().is_some()
    }

    pub fn initialize(max_level: LevelFilter) -> Result<()> {
        LOGGER.get_or_try_init(|| -> Result<Logger> {
            let log_spec = LogSpecification::builder().default(max_level).build();
            let handle = FlexiLogger::with(log_spec)
                .log_to_writer(Box::new(SyslogWriter::new(max_level)))
                .duplicate_to_stdout(Self::stdout_duplicate(max_level))
                .format_for_stdout(format_console)
                .write_mode(WriteMode::Direct)
                .start()
                .context("Failed to start logger")?;

            Ok(Self { _handle: handle })
        })?;

        Ok(())
    }
}

#[test]
fn test_logger() {
    use log::{error, info};

    assert!(Logger::initialize(LevelFilter::Error).is_ok());
    assert!(Logger::is_inited());

    // Second initialization keeps the first logger
    assert!(Logger::initialize(LevelFilter::Trace).is_ok());

    error!("Test error message");
    info!("Test info message");
}
