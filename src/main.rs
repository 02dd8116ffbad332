mod config;
mod context;
mod driver;
mod imports;
mod inventory;
mod naming;
mod output;
mod reconcile;
mod render;
#[cfg(test)]
mod test_helpers;
mod traits;
mod userdata;

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use config::RenderSettings;
use context::Context;
use driver::RunArgs;
use inventory::AwsInventory;
use reconcile::LookupStrategy;

#[derive(Parser)]
#[command(name = "asg2tf")]
#[command(about = "Generate Terraform modules and import commands for existing AWS Auto Scaling Groups", long_about = None)]
#[command(version)]
struct Cli {
    /// Only process Auto Scaling Groups whose name starts with this prefix
    #[arg(short, long)]
    prefix: String,

    /// Module template file (defaults to the built-in template)
    #[arg(short, long)]
    template_file: Option<PathBuf>,

    /// Write the generated code to this file instead of the terminal
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// AWS profile to use
    #[arg(long, env = "AWS_PROFILE", default_value = "default")]
    profile: String,

    /// How launch configurations are fetched during enrichment
    #[arg(long, value_enum, default_value_t = LookupStrategy::Auto)]
    lookup: LookupStrategy,

    /// Deregistration hook ARN injected into rendered modules
    #[arg(long, env = "ASG2TF_DEREGISTRATION_ARN")]
    deregistration_arn: Option<String>,

    /// Lifecycle hook role ARN injected into rendered modules
    #[arg(long, env = "ASG2TF_LIFECYCLE_HOOK_ARN")]
    lifecycle_hook_arn: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let ctx = Context::new();
    let inventory = AwsInventory::from_profile(&cli.profile).await;

    let args = RunArgs {
        prefix: cli.prefix,
        template_file: cli.template_file,
        output_file: cli.output,
        strategy: cli.lookup,
        settings: RenderSettings::with_overrides(cli.deregistration_arn, cli.lifecycle_hook_arn),
    };

    driver::run(&args, &inventory, &ctx).await
}
