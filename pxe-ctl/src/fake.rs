//! Recording [`Platform`] for unit tests.

use std::cell::RefCell;

use crate::error::{PxeError, Result};
use crate::interface::InterfaceInfo;
use crate::platform::{ExecOutput, Platform};

#[derive(Debug, Default)]
pub(crate) struct FakePlatform {
    calls: RefCell<Vec<String>>,
    interfaces: Vec<InterfaceInfo>,
    failing: Vec<String>,
    list_output: String,
}

impl FakePlatform {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_interface(mut self, intf: InterfaceInfo) -> Self {
        self.interfaces.push(intf);
        self
    }

    /// Make every `launchctl` call whose command line starts with `prefix` fail.
    pub(crate) fn failing(mut self, prefix: &str) -> Self {
        self.failing.push(prefix.to_string());
        self
    }

    pub(crate) fn with_list_output(mut self, output: &str) -> Self {
        self.list_output = output.to_string();
        self
    }

    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }
}

impl Platform for FakePlatform {
    fn launchctl(&self, args: &[&str]) -> Result<ExecOutput> {
        let command = args.join(" ");
        self.calls.borrow_mut().push(command.clone());

        if self.failing.iter().any(|prefix| command.starts_with(prefix)) {
            return Err(PxeError::Control {
                command,
                code: 1,
                stdout: String::new(),
                stderr: "Operation not permitted".to_string(),
            });
        }

        let stdout = if args.first() == Some(&"list") {
            self.list_output.clone()
        } else {
            String::new()
        };
        Ok(ExecOutput {
            stdout,
            stderr: String::new(),
        })
    }

    fn query_interface(&self, name: &str) -> Result<InterfaceInfo> {
        self.interfaces
            .iter()
            .find(|intf| intf.name() == name)
            .cloned()
            .ok_or_else(|| PxeError::Interface {
                name: name.to_string(),
                reason: "no such interface".to_string(),
            })
    }
}
