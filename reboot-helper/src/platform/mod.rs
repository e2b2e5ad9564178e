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

//! Platform abstraction used to reach chassis modules.
//!
//! A [`Platform`] is the factory handing out the chassis, the [`Chassis`]
//! enumerates its pluggable [`Module`]s. Modules stay owned by the chassis;
//! callers only ever hold borrowed references obtained from enumeration.

use anyhow::Result;

mod described;

pub use described::DescribedPlatform;

#[derive(thiserror::Error, Debug)]
pub enum ModuleError {
    #[error("Reboot is not implemented")]
    NotImplemented,
    #[error(transparent)]
    Failed(#[from] anyhow::Error),
}

pub trait Platform {
    /// Constructs the chassis handle.
    ///
    /// `Ok(None)` means the platform was reachable but exposes no chassis.
    fn chassis(&self) -> Result<Option<Box<dyn Chassis>>>;
}

pub trait Chassis {
    fn all_modules(&self) -> Result<Vec<&dyn Module>>;

    fn is_smart_switch(&self) -> bool;
}

pub trait Module {
    fn name(&self) -> String;

    fn reboot(&self) -> std::result::Result<(), ModuleError>;
}
