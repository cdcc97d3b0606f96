use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::allowlist::{split_app_list, Options};

/// ZenSwitch - close distracting macOS apps, keep the essentials
#[derive(Parser)]
#[command(name = "zen")]
#[command(about = "Close every non-essential running app, preserving a configurable allow-list")]
#[command(version)]
pub struct Cli {
    /// Show target apps and exit without closing anything
    #[arg(long)]
    pub dry_run: bool,

    /// Path to the config JSON file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Comma-separated app names to allow for this run
    #[arg(long, value_delimiter = ',', value_name = "APP,...")]
    pub allow: Vec<String>,

    /// Use only explicitly allowed apps, dropping the built-in defaults
    #[arg(long)]
    pub allow_only: bool,

    /// Comma-separated app names to strip from the allow-list for this run
    #[arg(long, value_delimiter = ',', value_name = "APP,...")]
    pub disallow: Vec<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the effective allow-list and exit
    List,
    /// Add app names to the allow-list and persist to config
    Add {
        /// App names; multiple words without commas form a single name
        #[arg(required = true)]
        apps: Vec<String>,
    },
    /// Remove app names from the allow-list and persist to config
    Remove {
        /// App names; multiple words without commas form a single name
        #[arg(required = true)]
        apps: Vec<String>,
    },
}

impl Cli {
    pub fn parse_args() -> Self {
        <Self as clap::Parser>::parse()
    }

    /// The run-scoped allow-list overrides, as resolver options.
    pub fn run_options(&self) -> Options {
        Options {
            allowed_apps: clean(&self.allow),
            disallowed_apps: clean(&self.disallow),
            replace_default_allowed: self.allow_only,
        }
    }
}

fn clean(apps: &[String]) -> Vec<String> {
    apps.iter()
        .map(|app| app.trim())
        .filter(|app| !app.is_empty())
        .map(str::to_string)
        .collect()
}

/// Normalize the positional args of `add`/`remove` into app names.
///
/// `zen add System Settings` is one app named "System Settings"; as soon as
/// any argument contains a comma, every argument is comma-split instead and
/// each segment is its own app.
pub fn parse_app_args(args: &[String]) -> Vec<String> {
    if args.is_empty() {
        return Vec::new();
    }

    if args.iter().any(|arg| arg.contains(',')) {
        return args.iter().flat_map(|arg| split_app_list(arg)).collect();
    }

    let joined = args.join(" ").trim().to_string();
    if joined.is_empty() {
        Vec::new()
    } else {
        vec![joined]
    }
}
