//! Marker block rendering for the AWS CLI and Steampipe config files.

use aip_blocks::Marker;
use minijinja::{AutoEscape, Environment, UndefinedBehavior, context};

use crate::Result;
use crate::account::CloudAccount;
use crate::aws::AwsSettings;
use crate::azure::AzureSettings;

const AWS_CONFIG: &str = "aws_config";
const STEAMPIPE_AWS: &str = "steampipe_aws";
const STEAMPIPE_AZURE: &str = "steampipe_azure";

/// Template engine for the generated blocks.
///
/// Every rendered block starts with the marker's start line and ends with
/// its end line followed by a newline.
pub struct Renderer {
    env: Environment<'static>,
}

impl Renderer {
    pub fn new() -> Result<Self> {
        let mut env = Environment::new();
        env.set_trim_blocks(true);
        env.set_lstrip_blocks(true);
        env.set_keep_trailing_newline(true);
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        env.set_auto_escape_callback(|_| AutoEscape::None);

        env.add_template(AWS_CONFIG, include_str!("../templates/aws_config.j2"))?;
        env.add_template(
            STEAMPIPE_AWS,
            include_str!("../templates/steampipe_aws.spc.j2"),
        )?;
        env.add_template(
            STEAMPIPE_AZURE,
            include_str!("../templates/steampipe_azure.spc.j2"),
        )?;

        Ok(Self { env })
    }

    /// One `[profile ...]` section per account for `~/.aws/config`.
    pub fn aws_config(
        &self,
        marker: &Marker,
        settings: &AwsSettings,
        accounts: &[CloudAccount],
    ) -> Result<String> {
        let template = self.env.get_template(AWS_CONFIG)?;
        Ok(template.render(context! {
            marker_start => marker.start_line(),
            marker_end => marker.end_line(),
            accounts => accounts,
            settings => context! {
                sso_start_url => &settings.sso_start_url,
                sso_region => &settings.sso_region,
                sso_role_name => &settings.sso_role_name,
                default_region => &settings.default_region,
                output_format => &settings.output_format,
            },
        })?)
    }

    /// Steampipe AWS plugin connections, one per account plus an aggregator.
    pub fn steampipe_aws(
        &self,
        marker: &Marker,
        settings: &AwsSettings,
        accounts: &[CloudAccount],
    ) -> Result<String> {
        let template = self.env.get_template(STEAMPIPE_AWS)?;
        Ok(template.render(context! {
            marker_start => marker.start_line(),
            marker_end => marker.end_line(),
            accounts => accounts,
            regions => &settings.regions,
        })?)
    }

    /// Steampipe Azure plugin connections, one per subscription plus an
    /// aggregator.
    pub fn steampipe_azure(
        &self,
        marker: &Marker,
        settings: &AzureSettings,
        subscriptions: &[CloudAccount],
    ) -> Result<String> {
        let template = self.env.get_template(STEAMPIPE_AZURE)?;
        Ok(template.render(context! {
            marker_start => marker.start_line(),
            marker_end => marker.end_line(),
            subscriptions => subscriptions,
            tenant_id => &settings.tenant_id,
        })?)
    }
}
