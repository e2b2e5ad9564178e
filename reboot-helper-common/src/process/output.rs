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

use std::{
    ops::Deref,
    os::unix::process::ExitStatusExt,
    process::ExitStatus as StdExitStatus,
};

use anyhow::{bail, Context, Result};

#[derive(Debug)]
pub struct ExitStatus {
    name: String,
    status: StdExitStatus,
}

impl ExitStatus {
    pub(super) fn new(name: String, status: StdExitStatus) -> Self {
        Self { name, status }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn exit_code(&self) -> i32 {
        const SIGNAL_SHIFT: i32 = 1 << 7;

        if let Some(exit_code) = self.status.code() {
            return exit_code;
        }
        if let Some(signal) = self.status.signal() {
            return signal + SIGNAL_SHIFT;
        }

        self.status.into_raw()
    }

    pub fn success(&self) -> bool {
        self.status.success()
    }
}

#[derive(Debug)]
pub struct Output {
    pub status: ExitStatus,
    pub stderr: String,
}

impl Output {
    /// Fails unless the process exited normally with code zero.
    /// The captured stderr is appended to the error message.
    pub fn exit_ok(&self) -> Result<()> {
        let exit_code = self
            .status
            .status
            .code()
            .with_context(|| format!("Process {} was terminated", self.status.name))?;

        if exit_code != 0 {
            let stderr = self.stderr.trim();
            if stderr.is_empty() {
                bail!(
                    "Process {} exited unsuccessfully, exit_code={}",
                    self.status.name,
                    exit_code
                );
            }
            bail!(
                "Process {} exited unsuccessfully, exit_code={}, {}",
                self.status.name,
                exit_code,
                stderr
            );
        }

        Ok(())
    }
}

impl Deref for Output {
    type Target = ExitStatus;

    fn deref(&self) -> &Self::Target {
        &self.status
    }
}
