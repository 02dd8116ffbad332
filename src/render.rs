//! Renders Terraform module declarations from reconciled records.

use anyhow::{Context, Result};
use handlebars::Handlebars;
use serde::Serialize;

use crate::config::RenderSettings;
use crate::naming;
use crate::reconcile::AsgRecord;

/// Built-in module template, used when no template file is given.
///
/// Substitution-only; every placeholder comes from [`TemplateContext`].
pub const DEFAULT_TEMPLATE: &str = r#"
module "{{ MODULE_NAME }}" {
  source = "../modules/autoscaling/qw_asg"

  key_name              = "{{ KEY_NAME }}"
  instance_type         = "{{ INSTANCE_TYPE }}"
  ami_id                = "{{ AMI_ID }}"
  asg_cluster           = "{{ ASG_CLUSTER }}"
  zones                 = "${var.default_zones}"
  asg_queue             = "{{ QUEUE_NAME }}"
  asg_name              = "{{ ASG_NAME }}"
  worker_security_group = ["${var.worker_security_group}"]
  consumer_config       = "{{ CONSUMER_CONFIG }}"
  deregistration_arn    = "{{ DEREGISTRATION_ARN }}"
  lifecycle_hook_arn    = "{{ LIFECYCLE_HOOK_ARN }}"
  r53_zone              = "${var.r53_zone}"
  hosted_domain         = "${var.hosted_domain}"
  vpc_subnet_ids        = ["${split(",", join(",", var.vpc_public_subnet_ids))}"]
  name_tag              = "${var.name_tag}"
  env                   = "${var.env}"
  app_branch            = "${var.app_branch}"
  asg_desired           = "{{ ASG_DESIRED }}"
  asg_max               = "{{ ASG_MAX }}"
  asg_min               = "{{ ASG_MIN }}"
}
"#;

/// Flat set of placeholders a module template may reference.
///
/// Serialized field names match the SCREAMING_SNAKE_CASE placeholders in
/// the template. Absent enrichment values render as empty strings rather
/// than failing the render.
#[derive(Debug, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct TemplateContext {
    pub module_name: String,
    pub asg_cluster: String,
    pub queue_name: String,
    pub asg_name: String,
    pub consumer_config: String,
    pub asg_min: u32,
    pub asg_max: u32,
    pub asg_desired: u32,
    pub key_name: String,
    pub instance_type: String,
    pub ami_id: String,
    pub deregistration_arn: String,
    pub lifecycle_hook_arn: String,
}

impl TemplateContext {
    /// Build the context for one reconciled group.
    pub fn from_record(record: &AsgRecord, settings: &RenderSettings) -> Self {
        Self {
            module_name: naming::module_name(&record.name),
            asg_cluster: naming::cluster_name(&record.name),
            queue_name: record.queue_tag().unwrap_or_default().to_string(),
            asg_name: record.name.clone(),
            consumer_config: record.consumer_config.clone().unwrap_or_default(),
            asg_min: record.min_size,
            asg_max: record.max_size,
            asg_desired: record.desired_capacity,
            key_name: record.key_name.clone().unwrap_or_default(),
            instance_type: record.instance_type.clone().unwrap_or_default(),
            ami_id: record.image_id.clone().unwrap_or_default(),
            deregistration_arn: settings.deregistration_arn.clone(),
            lifecycle_hook_arn: settings.lifecycle_hook_arn.clone(),
        }
    }
}

/// Renders module declarations through Handlebars.
pub struct ModuleRenderer {
    handlebars: Handlebars<'static>,
}

impl ModuleRenderer {
    /// Compile the template once up front so a malformed template fails
    /// the run before any API calls are made.
    pub fn new(template: &str) -> Result<Self> {
        let mut handlebars = Handlebars::new();
        // Generated HCL is not HTML; emit placeholder values verbatim.
        handlebars.register_escape_fn(handlebars::no_escape);
        handlebars
            .register_template_string("module", template)
            .context("Failed to parse module template")?;

        Ok(Self { handlebars })
    }

    /// Render one module declaration. Does not validate that the output
    /// is syntactically valid HCL.
    pub fn render(&self, context: &TemplateContext) -> Result<String> {
        self.handlebars
            .render("module", context)
            .with_context(|| format!("Failed to render module '{}'", context.module_name))
    }
}
