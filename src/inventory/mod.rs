//! The cloud inventory boundary.
//!
//! Everything the rest of the program knows about the AWS account comes
//! through [`AsgInventory`]. The production implementation wraps the AWS
//! SDK; tests substitute an in-memory source.

pub mod aws;

#[allow(unused_imports)]
pub use aws::AwsInventory;

use anyhow::Result;

/// A key/value tag on an Auto Scaling Group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub key: String,
    pub value: String,
}

impl Tag {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// One Auto Scaling Group as returned by the listing API.
#[derive(Debug, Clone)]
pub struct GroupSummary {
    /// Group name, unique within the account.
    pub name: String,
    pub tags: Vec<Tag>,
    /// Name of the launch configuration the group boots from. Absent for
    /// groups using launch templates, which this tool does not adopt.
    pub launch_configuration_name: Option<String>,
    pub min_size: u32,
    pub max_size: u32,
    pub desired_capacity: u32,
}

/// One launch configuration as returned by the listing API.
///
/// Transient: merged into the matching group records during
/// reconciliation and not retained afterwards.
#[derive(Debug, Clone)]
pub struct LaunchConfiguration {
    pub name: String,
    pub instance_type: Option<String>,
    pub key_name: Option<String>,
    pub image_id: Option<String>,
    /// Base64-encoded boot script.
    pub user_data: Option<String>,
}

/// Paginated listing operations plus a point lookup, as offered by the
/// AWS Auto Scaling API.
///
/// Note: this trait uses `async fn` and is therefore not dyn-compatible;
/// callers take an implementation generically.
#[allow(async_fn_in_trait)]
pub trait AsgInventory {
    /// Page through every Auto Scaling Group in the account.
    async fn list_groups(&self) -> Result<Vec<GroupSummary>>;

    /// Page through every launch configuration in the account.
    async fn list_launch_configurations(&self) -> Result<Vec<LaunchConfiguration>>;

    /// Fetch a single launch configuration by exact name.
    async fn get_launch_configuration(&self, name: &str) -> Result<Option<LaunchConfiguration>>;
}
