// SPDX-License-Identifier: Mulan PSL v2
/*
 * Copyright (c) 2024 SONiC reboot-helper developers.
 * reboot-helper-common is licensed under Mulan PSL v2.
 * You can use this software according to the terms and conditions of the Mulan PSL v2.
 * You may obtain a copy of Mulan PSL v2 at:
 *         http://license.coscl.org.cn/MulanPSL2
 *
 * THIS SOFTWARE IS PROVIDED ON AN "AS IS" BASIS, WITHOUT WARRANTIES OF ANY KIND,
 * EITHER EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO NON-INFRINGEMENT,
 * MERCHANTABILITY OR FIT FOR A PARTICULAR PURPOSE.
 * See the Mulan PSL v2 for more details.
 */

use std::ffi::CString;
use std::os::unix::ffi::OsStrExt;

use flexi_logger::{writers::LogWriter, DeferredNow};
use lazy_static::lazy_static;
use log::{Level, LevelFilter, Record};

use crate::os;

/// Maps a log level to the syslog priority it is reported with.
fn priority(level: Level) -> libc::c_int {
    match level {
        Level::Error => libc::LOG_ERR,
        Level::Warn => libc::LOG_WARNING,
        Level::Info => libc::LOG_INFO,
        Level::Debug | Level::Trace => libc::LOG_DEBUG,
    }
}

struct Syslog;

impl Syslog {
    #[inline]
    fn init() {
        lazy_static! {
            static ref SYSLOG_IDENT: CString =
                CString::new(os::process::name().as_bytes()).unwrap_or_default();
        }
        unsafe {
            libc::openlog(
                SYSLOG_IDENT.as_ptr(),
                libc::LOG_PID | libc::LOG_NDELAY,
                libc::LOG_USER,
            )
        }
    }

    fn write(priority: libc::c_int, message: &[u8]) {
        const MESSAGE_FORMAT: &[u8] = b"%s\0";

        static SYSLOG_INIT: std::sync::Once = std::sync::Once::new();
        SYSLOG_INIT.call_once(Self::init);

        // Ensure buffer does not contain unexpected terminator
        let buff = message
            .iter()
            .map(|&byte| if byte == b'\0' { b' ' } else { byte })
            .collect::<Vec<_>>();
        let message = CString::new(buff).unwrap_or_default();
        unsafe {
            libc::syslog(
                priority,
                MESSAGE_FORMAT.as_ptr() as *const libc::c_char,
                message.as_ptr(),
            )
        }
    }
}

/// Receives the syslog priority and message text of every accepted record.
type SyslogSink = fn(libc::c_int, &[u8]);

/// Forwards every record it receives to the system log.
#[derive(Clone, Copy)]
pub struct SyslogWriter {
    max_level: LevelFilter,
    sink: SyslogSink,
}

impl SyslogWriter {
    pub fn new(max_level: LevelFilter) -> Self {
        Self {
            max_level,
            sink: Syslog::write,
        }
    }
}

impl LogWriter for SyslogWriter {
    fn write(&self, _now: &mut DeferredNow, record: &Record) -> std::io::Result<()> {
        if record.level() <= self.max_level {
            let message = record.args().to_string();
            (self.sink)(priority(record.level()), message.as_bytes());
        }
        Ok(())
    }

    fn flush(&self) -> std::io::Result<()> {
        Ok(())
    }

    fn max_log_level(&self) -> LevelFilter {
        self.max_level
    }
}
