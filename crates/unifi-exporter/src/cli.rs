//! Clap derive structures for the `unifi-exporter` binary.
//!
//! Every flag is optional and overrides the matching config file or
//! environment setting.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use unifi_exporter_config::Config;

/// unifi-exporter -- Prometheus metrics for UniFi controller stations
#[derive(Debug, Parser)]
#[command(
    name = "unifi-exporter",
    version,
    about = "Export UniFi station metrics to Prometheus",
    long_about = "Serves per-station uptime, last-seen and traffic counters read from a\n\
        UniFi network controller, limited to an allow-list of networks.\n\n\
        Settings come from the config file, UNIFI_EXPORTER_* environment\n\
        variables, and these flags, in increasing order of precedence."
)]
pub struct Cli {
    /// Config file path
    #[arg(long, short = 'c', env = "UNIFI_EXPORTER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Address to serve metrics on (e.g. 0.0.0.0:9130)
    #[arg(long, short = 'l')]
    pub listen: Option<String>,

    /// Controller URL
    #[arg(long)]
    pub controller: Option<String>,

    /// Site name
    #[arg(long)]
    pub site: Option<String>,

    /// Controller login user
    #[arg(long, env = "UNIFI_USERNAME")]
    pub username: Option<String>,

    /// Network to export stations from (repeatable, replaces the configured list)
    #[arg(long = "network", short = 'n', value_name = "NAME")]
    pub networks: Vec<String>,

    /// Accept self-signed TLS certificates
    #[arg(long, short = 'k')]
    pub insecure: bool,

    /// Request timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Increase verbosity (-v, -vv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Log output format
    #[arg(long, value_enum, default_value = "text")]
    pub log_format: LogFormat,

    /// Run one collection, print the metrics to stdout, and exit
    #[arg(long)]
    pub once: bool,

    /// Print the effective configuration (password masked) and exit
    #[arg(long, conflicts_with = "once")]
    pub print_config: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogFormat {
    /// Human-readable lines
    Text,
    /// One JSON object per event
    Json,
}

impl Cli {
    /// Layer flag values over the loaded config.
    pub fn apply_overrides(&self, config: &mut Config) {
        if let Some(ref listen) = self.listen {
            config.listen.clone_from(listen);
        }
        if !self.networks.is_empty() {
            config.networks.clone_from(&self.networks);
        }

        let controller = &mut config.controller;
        if let Some(ref url) = self.controller {
            controller.url = Some(url.clone());
        }
        if let Some(ref site) = self.site {
            controller.site.clone_from(site);
        }
        if let Some(ref username) = self.username {
            controller.username = Some(username.clone());
        }
        if self.insecure {
            controller.insecure = true;
        }
        if let Some(timeout) = self.timeout {
            controller.timeout = timeout;
        }
    }
}
