//! Orchestration: reconcile, render, emit.

use anyhow::Result;
use std::path::PathBuf;

use crate::config::RenderSettings;
use crate::context::Context;
use crate::imports::{self, ImportDirectives};
use crate::inventory::AsgInventory;
use crate::reconcile::{self, LookupStrategy};
use crate::render::{DEFAULT_TEMPLATE, ModuleRenderer, TemplateContext};

/// Section labels in the emitted report.
pub const MODULE_SECTION: &str = "Generated Module Code";
pub const IMPORT_SECTION: &str = "Generated Import Code";

/// Everything a single run needs beyond the inventory source.
pub struct RunArgs {
    pub prefix: String,
    pub template_file: Option<PathBuf>,
    pub output_file: Option<PathBuf>,
    pub strategy: LookupStrategy,
    pub settings: RenderSettings,
}

/// Reconcile the fleet and emit module declarations plus import
/// commands, either to the terminal or to a single output file.
pub async fn run<I: AsgInventory>(args: &RunArgs, inventory: &I, ctx: &Context) -> Result<()> {
    // A malformed template should fail before any API call is spent.
    let template = match &args.template_file {
        Some(path) => ctx.fs.read_to_string(path)?,
        None => DEFAULT_TEMPLATE.to_string(),
    };
    let renderer = ModuleRenderer::new(&template)?;

    let records =
        reconcile::reconcile(inventory, &args.prefix, args.strategy, ctx.output.as_ref()).await?;

    if records.is_empty() {
        ctx.output.info(&format!(
            "No Auto Scaling Groups match prefix '{}'",
            args.prefix
        ));

        // Still overwrite the output file, so a re-run against a shrunk
        // fleet cannot leave stale modules behind as if they were current.
        if let Some(path) = &args.output_file {
            ctx.fs.write(path, &build_report(&[], &[]))?;
        }

        return Ok(());
    }

    let mut modules = Vec::with_capacity(records.len());
    let mut directives = Vec::with_capacity(records.len());

    for record in &records {
        let context = TemplateContext::from_record(record, &args.settings);
        modules.push(renderer.render(&context)?);
        directives.push(imports::import_directives(record));
    }

    match &args.output_file {
        Some(path) => {
            ctx.fs.write(path, &build_report(&modules, &directives))?;
            ctx.output.success(&format!(
                "Wrote {} module(s) and {} import command(s) to {}",
                modules.len(),
                directives.len() * 2,
                path.display()
            ));
        }
        None => print_report(ctx, &modules, &directives),
    }

    Ok(())
}

/// Assemble the two-section report written to the output file. All
/// module declarations precede all import commands, each section in
/// reconciliation iteration order.
fn build_report(modules: &[String], directives: &[ImportDirectives]) -> String {
    let mut report = String::new();

    report.push_str(MODULE_SECTION);
    report.push('\n');

    for module in modules {
        report.push_str(module);
        report.push('\n');
    }

    report.push('\n');
    report.push_str(IMPORT_SECTION);
    report.push('\n');

    for directive in directives {
        for line in directive.lines() {
            report.push_str(line);
            report.push('\n');
        }
    }

    report
}

fn print_report(ctx: &Context, modules: &[String], directives: &[ImportDirectives]) {
    ctx.output.section(MODULE_SECTION);

    for module in modules {
        ctx.output.plain(module);
    }

    ctx.output.section(IMPORT_SECTION);

    for directive in directives {
        for line in directive.lines() {
            ctx.output.plain(line);
        }
    }

    ctx.output.blank();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inventory::{GroupSummary, LaunchConfiguration, Tag};
    use crate::test_helpers::{MockInventory, encode_user_data};
    use crate::traits::{MockFileSystem, MockOutput};
    use std::path::Path;
    use std::sync::Arc;

    fn fleet() -> MockInventory {
        MockInventory::new()
            .with_group(GroupSummary {
                name: "team/svc-1".to_string(),
                tags: vec![Tag::new("queue", "q1")],
                launch_configuration_name: Some("lc-team-svc-1".to_string()),
                min_size: 1,
                max_size: 3,
                desired_capacity: 2,
            })
            .with_launch_config(LaunchConfiguration {
                name: "lc-team-svc-1".to_string(),
                instance_type: Some("c5.large".to_string()),
                key_name: Some("deploy-key".to_string()),
                image_id: Some("ami-0abc1234".to_string()),
                user_data: Some(encode_user_data(
                    "export CONSUMERS_CONFIGURATION=\"xyz\"\n",
                )),
            })
    }

    fn args(output_file: Option<&str>) -> RunArgs {
        RunArgs {
            prefix: "team/".to_string(),
            template_file: None,
            output_file: output_file.map(PathBuf::from),
            strategy: LookupStrategy::Auto,
            settings: RenderSettings::default(),
        }
    }

    #[tokio::test]
    async fn test_end_to_end_report_written_to_file() {
        let fs = Arc::new(MockFileSystem::new());
        let output = Arc::new(MockOutput::new());
        let ctx = Context::test_with(fs.clone(), output.clone());

        run(&args(Some("/tmp/out.tf")), &fleet(), &ctx).await.unwrap();

        let report = fs.get_file_contents(Path::new("/tmp/out.tf")).unwrap();
        assert!(report.starts_with(MODULE_SECTION));
        assert!(report.contains("module \"team_svc-1\""));
        assert!(report.contains("asg_queue             = \"q1\""));
        assert!(report.contains("consumer_config       = \"xyz\""));
        assert!(report.contains(
            "terraform import module.team-svc-1.aws_launch_configuration.qw-asg-launch-config lc-team-svc-1"
        ));
        assert!(report.contains(
            "terraform import module.team-svc-1.aws_autoscaling_group.qw-asg team/svc-1"
        ));
        // Every module declaration precedes every import command.
        assert!(report.find(IMPORT_SECTION).unwrap() > report.find("module \"team_svc-1\"").unwrap());
        assert!(output.has_success());
    }

    #[tokio::test]
    async fn test_rerun_is_byte_identical() {
        let fs = Arc::new(MockFileSystem::new());
        let ctx = Context::test_with(fs.clone(), Arc::new(MockOutput::new()));
        let inventory = fleet();

        run(&args(Some("/tmp/out.tf")), &inventory, &ctx).await.unwrap();
        let first = fs.get_file_contents(Path::new("/tmp/out.tf")).unwrap();

        run(&args(Some("/tmp/out.tf")), &inventory, &ctx).await.unwrap();
        let second = fs.get_file_contents(Path::new("/tmp/out.tf")).unwrap();

        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_console_sections_in_order() {
        let output = Arc::new(MockOutput::new());
        let ctx = Context::test_with(Arc::new(MockFileSystem::new()), output.clone());

        run(&args(None), &fleet(), &ctx).await.unwrap();

        assert_eq!(
            output.get_sections(),
            vec![MODULE_SECTION.to_string(), IMPORT_SECTION.to_string()]
        );
    }

    #[tokio::test]
    async fn test_template_file_overrides_builtin() {
        let fs = Arc::new(
            MockFileSystem::new().with_file("/tmp/custom.hbs", "asg={{ ASG_NAME }}"),
        );
        let ctx = Context::test_with(fs.clone(), Arc::new(MockOutput::new()));
        let mut run_args = args(Some("/tmp/out.tf"));
        run_args.template_file = Some(PathBuf::from("/tmp/custom.hbs"));

        run(&run_args, &fleet(), &ctx).await.unwrap();

        let report = fs.get_file_contents(Path::new("/tmp/out.tf")).unwrap();
        assert!(report.contains("asg=team/svc-1"));
        assert!(!report.contains("module \"team_svc-1\""));
    }

    #[tokio::test]
    async fn test_unreadable_template_file_is_fatal() {
        let ctx = Context::test();
        let mut run_args = args(None);
        run_args.template_file = Some(PathBuf::from("/tmp/missing.hbs"));

        let result = run(&run_args, &fleet(), &ctx).await;

        assert!(result.is_err());
        assert!(format!("{:#}", result.unwrap_err()).contains("missing.hbs"));
    }

    #[tokio::test]
    async fn test_no_matching_groups_overwrites_stale_output() {
        let fs = Arc::new(
            MockFileSystem::new().with_file("/tmp/out.tf", "module \"stale\" {}\n"),
        );
        let output = Arc::new(MockOutput::new());
        let ctx = Context::test_with(fs.clone(), output.clone());
        let mut run_args = args(Some("/tmp/out.tf"));
        run_args.prefix = "nomatch-".to_string();

        run(&run_args, &fleet(), &ctx).await.unwrap();

        let report = fs.get_file_contents(Path::new("/tmp/out.tf")).unwrap();
        assert!(report.contains(MODULE_SECTION));
        assert!(report.contains(IMPORT_SECTION));
        assert!(!report.contains("stale"));
        assert!(
            output
                .get_messages()
                .iter()
                .any(|m| matches!(m, crate::traits::output::OutputMessage::Info(_)))
        );
    }
}
