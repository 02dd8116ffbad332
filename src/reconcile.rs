//! Reconciliation of Auto Scaling Groups with their launch configurations.
//!
//! Produces one [`AsgRecord`] per group matching the name prefix, in the
//! listing API's iteration order. Records whose launch configuration
//! cannot be found are retained with absent enrichment fields; only a
//! failure of the listing API itself aborts the run.

use anyhow::Result;
use clap::ValueEnum;
use std::collections::HashMap;

use crate::inventory::{AsgInventory, GroupSummary, LaunchConfiguration, Tag};
use crate::traits::Output;
use crate::userdata;

/// Below this many retained groups, `Auto` fetches launch configurations
/// one by one instead of paging the full collection.
const POINT_LOOKUP_CUTOFF: usize = 20;

/// How launch configurations are fetched during enrichment.
///
/// Both strategies produce identical reconciled state; they differ only
/// in how many API calls they spend getting there.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LookupStrategy {
    /// Choose based on how many groups matched the prefix.
    Auto,
    /// Page the full launch configuration listing once.
    Bulk,
    /// Fetch each group's launch configuration by exact name.
    PointLookup,
}

/// A fully reconciled Auto Scaling Group.
#[derive(Debug, Clone)]
pub struct AsgRecord {
    pub name: String,
    pub tags: Vec<Tag>,
    pub launch_configuration_name: Option<String>,
    pub min_size: u32,
    pub max_size: u32,
    pub desired_capacity: u32,
    // Filled in from the matching launch configuration; absent when no
    // match was found.
    pub instance_type: Option<String>,
    pub key_name: Option<String>,
    pub image_id: Option<String>,
    pub consumer_config: Option<String>,
}

impl AsgRecord {
    fn from_summary(summary: GroupSummary) -> Self {
        Self {
            name: summary.name,
            tags: summary.tags,
            launch_configuration_name: summary.launch_configuration_name,
            min_size: summary.min_size,
            max_size: summary.max_size,
            desired_capacity: summary.desired_capacity,
            instance_type: None,
            key_name: None,
            image_id: None,
            consumer_config: None,
        }
    }

    /// Value of the `queue` tag, if the group carries one.
    pub fn queue_tag(&self) -> Option<&str> {
        self.tags
            .iter()
            .find(|tag| tag.key == "queue")
            .map(|tag| tag.value.as_str())
    }
}

/// Discover groups matching `prefix` and merge in their launch
/// configuration data.
pub async fn reconcile<I: AsgInventory>(
    inventory: &I,
    prefix: &str,
    strategy: LookupStrategy,
    output: &dyn Output,
) -> Result<Vec<AsgRecord>> {
    let mut records: Vec<AsgRecord> = inventory
        .list_groups()
        .await?
        .into_iter()
        .filter(|group| group.name.starts_with(prefix))
        .map(AsgRecord::from_summary)
        .collect();

    let strategy = match strategy {
        LookupStrategy::Auto if records.len() <= POINT_LOOKUP_CUTOFF => {
            LookupStrategy::PointLookup
        }
        LookupStrategy::Auto => LookupStrategy::Bulk,
        explicit => explicit,
    };

    match strategy {
        LookupStrategy::Bulk => enrich_bulk(inventory, &mut records, output).await?,
        LookupStrategy::PointLookup | LookupStrategy::Auto => {
            enrich_point_lookup(inventory, &mut records, output).await?;
        }
    }

    Ok(records)
}

/// Page the full launch configuration listing once, merging each entry
/// into every retained group that references it. Entries no retained
/// group references are discarded without comment.
async fn enrich_bulk<I: AsgInventory>(
    inventory: &I,
    records: &mut [AsgRecord],
    output: &dyn Output,
) -> Result<()> {
    // Several groups may reference the same launch configuration name;
    // all of them get enriched.
    let mut by_config_name: HashMap<String, Vec<usize>> = HashMap::new();

    for (index, record) in records.iter().enumerate() {
        if let Some(name) = &record.launch_configuration_name {
            by_config_name.entry(name.clone()).or_default().push(index);
        }
    }

    for config in inventory.list_launch_configurations().await? {
        let Some(indexes) = by_config_name.get(&config.name) else {
            continue;
        };

        for &index in indexes {
            merge_launch_config(&mut records[index], &config, output);
        }
    }

    Ok(())
}

/// Fetch each retained group's launch configuration by exact name. A
/// missing configuration degrades that group only.
async fn enrich_point_lookup<I: AsgInventory>(
    inventory: &I,
    records: &mut [AsgRecord],
    output: &dyn Output,
) -> Result<()> {
    for record in records.iter_mut() {
        let Some(name) = record.launch_configuration_name.clone() else {
            continue;
        };

        if let Some(config) = inventory.get_launch_configuration(&name).await? {
            merge_launch_config(record, &config, output);
        }
    }

    Ok(())
}

fn merge_launch_config(record: &mut AsgRecord, config: &LaunchConfiguration, output: &dyn Output) {
    record.instance_type = config.instance_type.clone();
    record.key_name = config.key_name.clone();
    record.image_id = config.image_id.clone();

    if let Some(user_data) = &config.user_data {
        match userdata::consumer_config(user_data) {
            Ok(consumer_config) => record.consumer_config = consumer_config,
            Err(error) => {
                // Bad user data degrades this record only.
                output.warning(&format!(
                    "Skipping consumer config for '{}': {:#}",
                    record.name, error
                ));
            }
        }
    }
}
