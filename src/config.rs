//! Rendering settings supplied at startup.

/// Account-level constants injected into every rendered module.
///
/// These ARNs are environment-specific, so they live in an explicit
/// settings struct instead of the rendering path; the defaults are
/// placeholders overridable via CLI flag or environment variable.
#[derive(Debug, Clone)]
pub struct RenderSettings {
    /// Lambda hook invoked when an instance deregisters from its queue.
    pub deregistration_arn: String,
    /// Role assumed by the autoscaling lifecycle hook.
    pub lifecycle_hook_arn: String,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            deregistration_arn:
                "arn:aws:lambda:us-east-1:000000000000:function:qw-asg-deregistration".to_string(),
            lifecycle_hook_arn:
                "arn:aws:iam::000000000000:role/qw-asg-lifecycle-hook".to_string(),
        }
    }
}

impl RenderSettings {
    /// Build settings from optional overrides, falling back to defaults.
    pub fn with_overrides(
        deregistration_arn: Option<String>,
        lifecycle_hook_arn: Option<String>,
    ) -> Self {
        let defaults = Self::default();

        Self {
            deregistration_arn: deregistration_arn.unwrap_or(defaults.deregistration_arn),
            lifecycle_hook_arn: lifecycle_hook_arn.unwrap_or(defaults.lifecycle_hook_arn),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overrides_replace_defaults() {
        let settings = RenderSettings::with_overrides(
            Some("arn:aws:lambda:eu-west-1:123:function:dereg".to_string()),
            None,
        );

        assert_eq!(
            settings.deregistration_arn,
            "arn:aws:lambda:eu-west-1:123:function:dereg"
        );
        assert_eq!(
            settings.lifecycle_hook_arn,
            RenderSettings::default().lifecycle_hook_arn
        );
    }
}
