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

use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

use lazy_static::lazy_static;

pub fn path() -> &'static Path {
    lazy_static! {
        static ref PROCESS_PATH: PathBuf = std::env::current_exe().unwrap_or_default();
    }
    PROCESS_PATH.as_path()
}

pub fn name() -> &'static OsStr {
    lazy_static! {
        static ref PROCESS_NAME: OsString = path()
            .file_name()
            .map(OsStr::to_os_string)
            .or_else(|| std::env::args_os().next())
            .unwrap_or_default();
    }
    PROCESS_NAME.as_os_str()
}

#[test]
fn test() {
    let path = path();
    let name = name();

    println!("path: {}", path.display());
    assert!(path.is_absolute());

    println!("name: {}", name.to_string_lossy());
    assert!(!name.is_empty());
    assert_eq!(path.file_name(), Some(name));
}
