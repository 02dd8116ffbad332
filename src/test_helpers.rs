//! Test helpers shared between reconciliation and driver tests.

#![cfg(test)]

use anyhow::{Result, anyhow};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::inventory::{AsgInventory, GroupSummary, LaunchConfiguration};

/// Base64-encode a boot script the way the AWS API returns user data.
pub fn encode_user_data(script: &str) -> String {
    STANDARD.encode(script)
}

/// In-memory inventory source with a builder interface.
pub struct MockInventory {
    groups: Vec<GroupSummary>,
    launch_configs: Vec<LaunchConfiguration>,
    fail_listings: bool,
}

impl MockInventory {
    pub fn new() -> Self {
        Self {
            groups: Vec::new(),
            launch_configs: Vec::new(),
            fail_listings: false,
        }
    }

    pub fn with_group(mut self, group: GroupSummary) -> Self {
        self.groups.push(group);
        self
    }

    pub fn with_launch_config(mut self, config: LaunchConfiguration) -> Self {
        self.launch_configs.push(config);
        self
    }

    /// Make every operation fail, simulating a network or auth fault.
    pub fn with_listing_failure(mut self) -> Self {
        self.fail_listings = true;
        self
    }

    fn check_failure(&self) -> Result<()> {
        if self.fail_listings {
            Err(anyhow!("simulated inventory listing failure"))
        } else {
            Ok(())
        }
    }
}

impl AsgInventory for MockInventory {
    async fn list_groups(&self) -> Result<Vec<GroupSummary>> {
        self.check_failure()?;
        Ok(self.groups.clone())
    }

    async fn list_launch_configurations(&self) -> Result<Vec<LaunchConfiguration>> {
        self.check_failure()?;
        Ok(self.launch_configs.clone())
    }

    async fn get_launch_configuration(&self, name: &str) -> Result<Option<LaunchConfiguration>> {
        self.check_failure()?;
        Ok(self
            .launch_configs
            .iter()
            .find(|config| config.name == name)
            .cloned())
    }
}
