//! AWS implementation of the inventory source.
//!
//! Requires valid AWS credentials configured via:
//! - Environment variables (AWS_ACCESS_KEY_ID, AWS_SECRET_ACCESS_KEY)
//! - AWS credentials file (~/.aws/credentials)
//! - IAM role (for EC2 instances, ECS tasks, Lambda functions)

use anyhow::{Context, Result};
use aws_config::BehaviorVersion;
use aws_sdk_autoscaling::Client;
use aws_sdk_autoscaling::types;

use super::{AsgInventory, GroupSummary, LaunchConfiguration, Tag};

/// Inventory source backed by the AWS Auto Scaling API.
pub struct AwsInventory {
    client: Client,
}

impl AwsInventory {
    /// Build a client for the given profile from the default AWS
    /// configuration chain.
    pub async fn from_profile(profile: &str) -> Self {
        let config = aws_config::defaults(BehaviorVersion::latest())
            .profile_name(profile)
            .load()
            .await;

        Self {
            client: Client::new(&config),
        }
    }
}

impl AsgInventory for AwsInventory {
    async fn list_groups(&self) -> Result<Vec<GroupSummary>> {
        let mut groups = Vec::new();
        let mut pages = self
            .client
            .describe_auto_scaling_groups()
            .into_paginator()
            .send();

        while let Some(page) = pages.next().await {
            let page = page.context("Failed to list Auto Scaling Groups")?;

            for group in page.auto_scaling_groups() {
                groups.push(to_group_summary(group));
            }
        }

        Ok(groups)
    }

    async fn list_launch_configurations(&self) -> Result<Vec<LaunchConfiguration>> {
        let mut configs = Vec::new();
        let mut pages = self
            .client
            .describe_launch_configurations()
            .into_paginator()
            .send();

        while let Some(page) = pages.next().await {
            let page = page.context("Failed to list launch configurations")?;

            for config in page.launch_configurations() {
                configs.push(to_launch_configuration(config));
            }
        }

        Ok(configs)
    }

    async fn get_launch_configuration(&self, name: &str) -> Result<Option<LaunchConfiguration>> {
        let response = self
            .client
            .describe_launch_configurations()
            .launch_configuration_names(name)
            .send()
            .await
            .with_context(|| format!("Failed to look up launch configuration '{}'", name))?;

        Ok(response
            .launch_configurations()
            .first()
            .map(to_launch_configuration))
    }
}

fn to_group_summary(group: &types::AutoScalingGroup) -> GroupSummary {
    let tags = group
        .tags()
        .iter()
        .filter_map(|tag| match (tag.key(), tag.value()) {
            (Some(key), Some(value)) => Some(Tag::new(key, value)),
            _ => None,
        })
        .collect();

    GroupSummary {
        name: group.auto_scaling_group_name().unwrap_or_default().to_string(),
        tags,
        launch_configuration_name: group.launch_configuration_name().map(str::to_string),
        min_size: count(group.min_size()),
        max_size: count(group.max_size()),
        desired_capacity: count(group.desired_capacity()),
    }
}

fn to_launch_configuration(config: &types::LaunchConfiguration) -> LaunchConfiguration {
    LaunchConfiguration {
        name: config
            .launch_configuration_name()
            .unwrap_or_default()
            .to_string(),
        instance_type: config.instance_type().map(str::to_string),
        key_name: config.key_name().map(str::to_string),
        image_id: config.image_id().map(str::to_string),
        user_data: config.user_data().map(str::to_string),
    }
}

/// Instance counts are non-negative; clamp anything the API hands back.
fn count(value: Option<i32>) -> u32 {
    value.unwrap_or(0).try_into().unwrap_or(0)
}
