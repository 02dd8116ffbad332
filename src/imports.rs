//! Terraform import commands for adopted groups.

use crate::naming;
use crate::reconcile::AsgRecord;

/// Resource addresses inside the generated module. These mirror the
/// resource names declared by the qw_asg module source.
const LAUNCH_CONFIG_RESOURCE: &str = "aws_launch_configuration.qw-asg-launch-config";
const GROUP_RESOURCE: &str = "aws_autoscaling_group.qw-asg";

/// The two import commands adopting one group into Terraform state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportDirectives {
    pub launch_configuration: String,
    pub group: String,
}

impl ImportDirectives {
    pub fn lines(&self) -> [&str; 2] {
        [&self.launch_configuration, &self.group]
    }
}

/// Build the import commands for a reconciled group. Pure and total: a
/// degraded record yields a command with an empty launch configuration
/// id rather than an error.
pub fn import_directives(record: &AsgRecord) -> ImportDirectives {
    let cluster = naming::cluster_name(&record.name);
    let launch_config_id = record
        .launch_configuration_name
        .as_deref()
        .unwrap_or_default();

    ImportDirectives {
        launch_configuration: format!(
            "terraform import module.{}.{} {}",
            cluster, LAUNCH_CONFIG_RESOURCE, launch_config_id
        ),
        group: format!(
            "terraform import module.{}.{} {}",
            cluster, GROUP_RESOURCE, record.name
        ),
    }
}
