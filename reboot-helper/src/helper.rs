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

use log::{debug, error, info};

use crate::platform::{Chassis, ModuleError, Platform};

const DPU_NAME_PATTERN: &str = "DPU";

#[derive(thiserror::Error, Debug)]
pub enum LoadError {
    #[error("Failed to instantiate Chassis due to {0:#}")]
    Construction(anyhow::Error),
    #[error("Platform chassis is not loaded")]
    Absent,
}

#[derive(thiserror::Error, Debug)]
pub enum RebootError {
    #[error("Failed to load platform chassis")]
    Load(#[from] LoadError),
    #[error("Error occurred while rebooting module {name}: {error:#}")]
    Enumeration { name: String, error: anyhow::Error },
    #[error("Module {0} not found")]
    NotFound(String),
    #[error("Reboot not implemented for module {0}.")]
    NotImplemented(String),
    #[error("An error occurred while rebooting module {name}: {error:#}")]
    Failed { name: String, error: anyhow::Error },
}

/// Owns the platform and the chassis handle obtained from it.
///
/// The chassis is constructed on first use and kept for the lifetime of
/// the helper. A failed construction is attempted again on the next call.
pub struct RebootHelper<P> {
    platform: P,
    chassis: Option<Box<dyn Chassis>>,
}

impl<P: Platform> RebootHelper<P> {
    pub fn new(platform: P) -> Self {
        Self {
            platform,
            chassis: None,
        }
    }

    pub fn try_load_chassis(&mut self) -> Result<&dyn Chassis, LoadError> {
        if self.chassis.is_none() {
            let chassis = self
                .platform
                .chassis()
                .map_err(LoadError::Construction)?
                .ok_or(LoadError::Absent)?;
            self.chassis = Some(chassis);
        }

        match &self.chassis {
            Some(chassis) => Ok(chassis.as_ref()),
            None => Err(LoadError::Absent),
        }
    }

    pub fn load_platform_chassis(&mut self) -> bool {
        match self.try_load_chassis() {
            Ok(_) => true,
            Err(e) => {
                error!("{}", e);
                false
            }
        }
    }

    pub fn try_reboot_module(&mut self, module_name: &str) -> Result<(), RebootError> {
        let chassis = self.try_load_chassis()?;
        let modules = chassis
            .all_modules()
            .map_err(|error| RebootError::Enumeration {
                name: module_name.to_owned(),
                error,
            })?;

        let module = modules
            .into_iter()
            .find(|module| module.name() == module_name)
            .ok_or_else(|| RebootError::NotFound(module_name.to_owned()))?;

        info!("Rebooting module {}...", module_name);
        module.reboot().map_err(|e| match e {
            ModuleError::NotImplemented => RebootError::NotImplemented(module_name.to_owned()),
            ModuleError::Failed(error) => RebootError::Failed {
                name: module_name.to_owned(),
                error,
            },
        })?;
        info!("Reboot command sent for module {}", module_name);

        Ok(())
    }

    pub fn reboot_module(&mut self, module_name: &str) -> bool {
        match self.try_reboot_module(module_name) {
            Ok(()) => true,
            Err(e) => {
                if let RebootError::Load(load_error) = &e {
                    error!("{}", load_error);
                }
                error!("{}", e);
                false
            }
        }
    }

    /// Whether this is a smart switch carrying at least one DPU module.
    pub fn is_dpu(&mut self) -> bool {
        let chassis = match self.try_load_chassis() {
            Ok(chassis) => chassis,
            Err(e) => {
                error!("{}", e);
                error!("{}", RebootError::Load(e));
                return false;
            }
        };

        if !chassis.is_smart_switch() {
            debug!("Chassis is not a smart switch");
            return false;
        }

        match chassis.all_modules() {
            Ok(modules) => modules
                .iter()
                .any(|module| module.name().contains(DPU_NAME_PATTERN)),
            Err(e) => {
                error!("Failed to get modules of the chassis: {:#}", e);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::Cell, rc::Rc};

    use anyhow::{anyhow, Result};

    use super::*;
    use crate::platform::Module;

    #[derive(Clone, Copy)]
    enum Outcome {
        Success,
        NotImplemented,
        Failure,
    }

    #[derive(Clone)]
    struct MockModule {
        name: String,
        outcome: Outcome,
        reboots: Rc<Cell<usize>>,
    }

    impl Module for MockModule {
        fn name(&self) -> String {
            self.name.clone()
        }

        fn reboot(&self) -> std::result::Result<(), ModuleError> {
            self.reboots.set(self.reboots.get() + 1);
            match self.outcome {
                Outcome::Success => Ok(()),
                Outcome::NotImplemented => Err(ModuleError::NotImplemented),
                Outcome::Failure => Err(anyhow!("Reboot failed").into()),
            }
        }
    }

    #[derive(Clone)]
    struct MockChassis {
        smart_switch: bool,
        /// `None` makes enumeration fail
        modules: Option<Vec<MockModule>>,
        enumerations: Rc<Cell<usize>>,
    }

    impl Chassis for MockChassis {
        fn all_modules(&self) -> Result<Vec<&dyn Module>> {
            self.enumerations.set(self.enumerations.get() + 1);
            match &self.modules {
                Some(modules) => Ok(modules.iter().map(|m| m as &dyn Module).collect()),
                None => Err(anyhow!("Failed to get modules")),
            }
        }

        fn is_smart_switch(&self) -> bool {
            self.smart_switch
        }
    }

    enum Backend {
        Broken,
        Empty,
        Chassis(MockChassis),
    }

    struct MockPlatform {
        backend: Backend,
        loads: Rc<Cell<usize>>,
    }

    impl Platform for MockPlatform {
        fn chassis(&self) -> Result<Option<Box<dyn Chassis>>> {
            self.loads.set(self.loads.get() + 1);
            match &self.backend {
                Backend::Broken => Err(anyhow!("Load failed")),
                Backend::Empty => Ok(None),
                Backend::Chassis(chassis) => Ok(Some(Box::new(chassis.clone()) as Box<dyn Chassis>)),
            }
        }
    }

    struct Fixture {
        helper: RebootHelper<MockPlatform>,
        loads: Rc<Cell<usize>>,
        enumerations: Rc<Cell<usize>>,
        reboots: Rc<Cell<usize>>,
    }

    impl Fixture {
        fn with_backend(backend: Backend) -> Self {
            let enumerations = match &backend {
                Backend::Chassis(chassis) => chassis.enumerations.clone(),
                _ => Rc::new(Cell::new(0)),
            };
            let reboots = match &backend {
                Backend::Chassis(MockChassis {
                    modules: Some(modules),
                    ..
                }) if !modules.is_empty() => modules[0].reboots.clone(),
                _ => Rc::new(Cell::new(0)),
            };
            let loads = Rc::new(Cell::new(0));

            Self {
                helper: RebootHelper::new(MockPlatform {
                    backend,
                    loads: loads.clone(),
                }),
                loads,
                enumerations,
                reboots,
            }
        }

        fn with_modules(smart_switch: bool, modules: &[(&str, Outcome)]) -> Self {
            let reboots = Rc::new(Cell::new(0));
            let modules = modules
                .iter()
                .map(|(name, outcome)| MockModule {
                    name: name.to_string(),
                    outcome: *outcome,
                    reboots: reboots.clone(),
                })
                .collect();

            Self::with_backend(Backend::Chassis(MockChassis {
                smart_switch,
                modules: Some(modules),
                enumerations: Rc::new(Cell::new(0)),
            }))
        }

        fn with_broken_enumeration(smart_switch: bool) -> Self {
            Self::with_backend(Backend::Chassis(MockChassis {
                smart_switch,
                modules: None,
                enumerations: Rc::new(Cell::new(0)),
            }))
        }
    }

    #[test]
    fn test_load_platform_chassis_success() {
        let mut fixture = Fixture::with_modules(false, &[]);
        assert!(fixture.helper.load_platform_chassis());
        assert!(fixture.helper.chassis.is_some());
        assert_eq!(fixture.loads.get(), 1);
    }

    #[test]
    fn test_load_platform_chassis_failure() {
        let mut fixture = Fixture::with_backend(Backend::Broken);
        assert!(!fixture.helper.load_platform_chassis());
        assert!(fixture.helper.chassis.is_none());
        assert!(matches!(
            fixture.helper.try_load_chassis(),
            Err(LoadError::Construction(_))
        ));
    }

    #[test]
    fn test_load_platform_chassis_absent() {
        let mut fixture = Fixture::with_backend(Backend::Empty);
        assert!(!fixture.helper.load_platform_chassis());
        assert!(matches!(
            fixture.helper.try_load_chassis(),
            Err(LoadError::Absent)
        ));
    }

    #[test]
    fn test_reboot_module_success() {
        let mut fixture = Fixture::with_modules(false, &[("test_module", Outcome::Success)]);
        assert!(fixture.helper.reboot_module("test_module"));
        assert_eq!(fixture.reboots.get(), 1);
    }

    #[test]
    fn test_reboot_module_first_match_only() {
        let mut fixture = Fixture::with_modules(
            false,
            &[
                ("another_module", Outcome::Failure),
                ("test_module", Outcome::Success),
                ("test_module", Outcome::Failure),
            ],
        );
        assert!(fixture.helper.reboot_module("test_module"));
        assert_eq!(fixture.reboots.get(), 1);
    }

    #[test]
    fn test_reboot_module_not_implemented_failure() {
        let mut fixture =
            Fixture::with_modules(false, &[("test_module", Outcome::NotImplemented)]);
        assert!(!fixture.helper.reboot_module("test_module"));
        assert!(matches!(
            fixture.helper.try_reboot_module("test_module"),
            Err(RebootError::NotImplemented(name)) if name == "test_module"
        ));
    }

    #[test]
    fn test_reboot_module_general_exception() {
        let mut fixture = Fixture::with_modules(false, &[("test_module", Outcome::Failure)]);
        assert!(!fixture.helper.reboot_module("test_module"));

        let error = fixture
            .helper
            .try_reboot_module("test_module")
            .unwrap_err();
        assert!(matches!(error, RebootError::Failed { .. }));
        assert_eq!(
            error.to_string(),
            "An error occurred while rebooting module test_module: Reboot failed"
        );
    }

    #[test]
    fn test_reboot_module_exception() {
        let mut fixture = Fixture::with_broken_enumeration(false);
        assert!(!fixture.helper.reboot_module("test_module"));
        assert!(matches!(
            fixture.helper.try_reboot_module("test_module"),
            Err(RebootError::Enumeration { .. })
        ));
    }

    #[test]
    fn test_reboot_module_not_found() {
        let mut fixture = Fixture::with_modules(false, &[]);
        assert!(!fixture.helper.reboot_module("non_existent_module"));

        let error = fixture
            .helper
            .try_reboot_module("non_existent_module")
            .unwrap_err();
        assert_eq!(error.to_string(), "Module non_existent_module not found");
    }

    #[test]
    fn test_reboot_module_name_mismatch() {
        let mut fixture = Fixture::with_modules(false, &[("another_module", Outcome::Success)]);
        assert!(!fixture.helper.reboot_module("test_module"));
        assert!(!fixture.helper.reboot_module("TEST_MODULE"));
        assert!(!fixture.helper.reboot_module(""));
        assert_eq!(fixture.reboots.get(), 0);
    }

    #[test]
    fn test_reboot_module_load_failure() {
        let mut fixture = Fixture::with_backend(Backend::Broken);
        assert!(!fixture.helper.reboot_module("test_module"));
        assert!(matches!(
            fixture.helper.try_reboot_module("test_module"),
            Err(RebootError::Load(LoadError::Construction(_)))
        ));
        assert_eq!(fixture.enumerations.get(), 0);
        // Construction is attempted again on every call until it succeeds
        assert_eq!(fixture.loads.get(), 2);
    }

    #[test]
    fn test_is_dpu_success() {
        let mut fixture = Fixture::with_modules(
            true,
            &[
                ("LINE-CARD0", Outcome::Success),
                ("DPU test_module", Outcome::Success),
            ],
        );
        assert!(fixture.helper.is_dpu());
    }

    #[test]
    fn test_is_dpu_failure() {
        let mut fixture = Fixture::with_modules(false, &[("DPU0", Outcome::Success)]);
        assert!(!fixture.helper.is_dpu());
        assert_eq!(fixture.enumerations.get(), 0);
    }

    #[test]
    fn test_is_dpu_without_dpu_module() {
        let mut fixture = Fixture::with_modules(
            true,
            &[("LINE-CARD0", Outcome::Success), ("dpu0", Outcome::Success)],
        );
        assert!(!fixture.helper.is_dpu());
    }

    #[test]
    fn test_is_dpu_enumeration_failure() {
        let mut fixture = Fixture::with_broken_enumeration(true);
        assert!(!fixture.helper.is_dpu());
    }

    #[test]
    fn test_is_dpu_load_platform_chassis_failure() {
        let mut fixture = Fixture::with_backend(Backend::Broken);
        assert!(!fixture.helper.is_dpu());
        assert_eq!(fixture.enumerations.get(), 0);

        let mut fixture = Fixture::with_backend(Backend::Empty);
        assert!(!fixture.helper.is_dpu());
    }

    #[test]
    fn test_chassis_is_reused() {
        let mut fixture = Fixture::with_modules(true, &[("DPU0", Outcome::Success)]);

        assert!(fixture.helper.reboot_module("DPU0"));
        assert!(fixture.helper.reboot_module("DPU0"));
        assert!(fixture.helper.is_dpu());
        assert!(fixture.helper.load_platform_chassis());
        assert!(!fixture.helper.reboot_module("DPU1"));

        assert_eq!(fixture.loads.get(), 1);
        assert_eq!(fixture.reboots.get(), 2);
        assert_eq!(fixture.enumerations.get(), 4);
    }
}
