//! Settings resolution: command-line flag, then settings file, then the
//! built-in default.

use std::path::Path;

use aip_blocks::Marker;
use aip_cloud::aws::AwsSettings;
use aip_cloud::azure::AzureSettings;
use aip_cloud::text::split_arguments;
use aip_fs::{ConfigStore, default_settings_file};
use serde::Deserialize;
use tracing::debug;

use crate::cli::{AwsArgs, AzureArgs};
use crate::error::Result;

/// Contents of the optional settings file.
///
/// ```toml
/// marker = "AIPHELPER_MARKER"
///
/// [aws]
/// sso_region = "us-east-2"
/// regions = ["us-east-1", "us-east-2"]
///
/// [azure]
/// root_management_group = "tamu"
/// ```
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileSettings {
    pub marker: Option<String>,
    pub aws: AwsFileSettings,
    pub azure: AzureFileSettings,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AwsFileSettings {
    pub sso_start_url: Option<String>,
    pub sso_region: Option<String>,
    pub sso_role_name: Option<String>,
    pub regions: Option<Vec<String>>,
    pub accounts: Option<Vec<String>>,
    pub output_format: Option<String>,
    pub default_region: Option<String>,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AzureFileSettings {
    pub tenant_id: Option<String>,
    pub enum_management_group: Option<bool>,
    pub root_management_group: Option<String>,
}

impl FileSettings {
    /// Load `explicit` if given (it must exist), otherwise the default
    /// settings file if there is one.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let store = ConfigStore::new();
        if let Some(path) = explicit {
            debug!(path = %path.display(), "loading settings file");
            return Ok(store.load(path)?);
        }

        match default_settings_file() {
            Some(path) => {
                let loaded = store.load_optional(&path)?;
                if loaded.is_some() {
                    debug!(path = %path.display(), "loaded default settings file");
                }
                Ok(loaded.unwrap_or_default())
            }
            None => Ok(Self::default()),
        }
    }

    pub fn marker(&self) -> Marker {
        self.marker
            .as_deref()
            .map(Marker::new)
            .unwrap_or_default()
    }

    pub fn aws_settings(&self, args: &AwsArgs) -> AwsSettings {
        let file = &self.aws;
        let defaults = AwsSettings::default();
        AwsSettings {
            sso_start_url: pick(&args.sso_start_url, &file.sso_start_url, defaults.sso_start_url),
            sso_region: pick(&args.sso_region, &file.sso_region, defaults.sso_region),
            sso_role_name: pick(&args.sso_role_name, &file.sso_role_name, defaults.sso_role_name),
            regions: pick_list(&args.regions, &file.regions, defaults.regions),
            accounts: pick_list(&args.accounts, &file.accounts, defaults.accounts),
            output_format: pick(&args.output_format, &file.output_format, defaults.output_format),
            default_region: pick(&args.default_region, &file.default_region, defaults.default_region),
        }
    }

    pub fn azure_settings(&self, args: &AzureArgs) -> AzureSettings {
        let file = &self.azure;
        let defaults = AzureSettings::default();
        AzureSettings {
            tenant_id: pick(&args.tenant_id, &file.tenant_id, defaults.tenant_id),
            enum_management_group: args.enum_mgmt_group
                || file
                    .enum_management_group
                    .unwrap_or(defaults.enum_management_group),
            root_management_group: pick(
                &args.root_group,
                &file.root_management_group,
                defaults.root_management_group,
            ),
        }
    }
}

fn pick(flag: &Option<String>, file: &Option<String>, default: String) -> String {
    flag.clone().or_else(|| file.clone()).unwrap_or(default)
}

fn pick_list(flag: &Option<String>, file: &Option<Vec<String>>, default: Vec<String>) -> Vec<String> {
    match flag {
        Some(value) => split_arguments(value),
        None => file.clone().unwrap_or(default),
    }
}
