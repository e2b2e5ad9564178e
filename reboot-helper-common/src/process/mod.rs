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

use std::{ffi::OsStr, path::Path, process};

use anyhow::{Context, Result};
use log::trace;

mod output;

pub use output::{ExitStatus, Output};

pub struct Command {
    inner: process::Command,
}

impl Command {
    pub fn new<S: AsRef<OsStr>>(program: S) -> Self {
        Self {
            inner: process::Command::new(program),
        }
    }

    pub fn arg<S: AsRef<OsStr>>(&mut self, arg: S) -> &mut Self {
        self.inner.arg(arg);
        self
    }

    pub fn args<I, S>(&mut self, args: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        for arg in args {
            self.arg(arg.as_ref());
        }
        self
    }

    pub fn env<K, V>(&mut self, key: K, val: V) -> &mut Self
    where
        K: AsRef<OsStr>,
        V: AsRef<OsStr>,
    {
        self.inner.env(key, val);
        self
    }

    fn name(&self) -> String {
        Path::new(self.inner.get_program())
            .file_name()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default()
    }

    pub fn run_with_output(&mut self) -> Result<Output> {
        let name = self.name();

        trace!("Executing {:?}", self.inner);
        let output = self
            .inner
            .stdin(process::Stdio::null())
            .stdout(process::Stdio::null())
            .output()
            .with_context(|| format!("Failed to start {}", name))?;

        let exit_status = ExitStatus::new(name, output.status);
        trace!(
            "Process {} exited, exit_code={}",
            exit_status.name(),
            exit_status.exit_code()
        );

        Ok(Output {
            status: exit_status,
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}
