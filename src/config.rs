//! Configuration file handling and option merging.
//!
//! The config file is a flat JSON document (`allowedApps`, `disallowedApps`,
//! `replaceDefaultAllowed`) living under the user's config directory. It is
//! read once at startup and written only by the explicit `add`/`remove`
//! commands, atomically and with owner-only permissions.

use anyhow::{Context, Result};
use log::debug;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::allowlist::{merge_app_lists, remove_from_app_list, Options};
use crate::error::ZenError;

/// On-disk shape of the config file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct ConfigFile {
    allowed_apps: Vec<String>,
    disallowed_apps: Vec<String>,
    replace_default_allowed: bool,
}

impl From<ConfigFile> for Options {
    fn from(cfg: ConfigFile) -> Self {
        Options {
            allowed_apps: cfg.allowed_apps,
            disallowed_apps: cfg.disallowed_apps,
            replace_default_allowed: cfg.replace_default_allowed,
        }
    }
}

impl From<&Options> for ConfigFile {
    fn from(opts: &Options) -> Self {
        ConfigFile {
            allowed_apps: opts.allowed_apps.clone(),
            disallowed_apps: opts.disallowed_apps.clone(),
            replace_default_allowed: opts.replace_default_allowed,
        }
    }
}

/// Resolve the default config file path.
///
/// `$XDG_CONFIG_HOME/zenswitch/config.json` when the variable is set,
/// otherwise `~/.config/zenswitch/config.json`.
pub fn default_config_path() -> Result<PathBuf> {
    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
        let xdg = xdg.trim();
        if !xdg.is_empty() {
            return Ok(Path::new(xdg).join("zenswitch").join("config.json"));
        }
    }

    let home = dirs::home_dir().context("failed to resolve home directory")?;
    Ok(home.join(".config").join("zenswitch").join("config.json"))
}

/// Load options from the config file at `path`.
///
/// A missing file yields default options unless `required` is set (the user
/// pointed at the path explicitly). Parse failures are always errors.
pub fn load_options(path: &Path, required: bool) -> Result<Options> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound && !required => {
            debug!("no config file at {:?}, using defaults", path);
            return Ok(Options::default());
        }
        Err(err) => {
            return Err(err).with_context(|| format!("failed to read config file {:?}", path))
        }
    };

    let cfg: ConfigFile = serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse config file {:?}", path))?;
    Ok(cfg.into())
}

/// Save `options` to the config file at `path`.
///
/// The parent directory is created if absent. The file is written to a
/// temporary sibling with owner-only permissions and renamed into place so a
/// crash mid-write never leaves a truncated config behind.
pub fn save_options(path: &Path, options: &Options) -> Result<()> {
    let cfg = ConfigFile::from(options);
    let mut body = serde_json::to_string_pretty(&cfg).context("failed to serialize config")?;
    body.push('\n');

    let dir = path
        .parent()
        .with_context(|| format!("config path {:?} has no parent directory", path))?;
    fs::create_dir_all(dir)
        .with_context(|| format!("failed to create config directory {:?}", dir))?;

    let tmp = dir.join(".config.json.tmp");
    write_restricted(&tmp, &body)
        .with_context(|| format!("failed to write config file {:?}", tmp))?;
    fs::rename(&tmp, path)
        .with_context(|| format!("failed to move config into place at {:?}", path))?;

    debug!("config saved to {:?}", path);
    Ok(())
}

#[cfg(unix)]
fn write_restricted(path: &Path, body: &str) -> std::io::Result<()> {
    use std::io::Write;
    use std::os::unix::fs::OpenOptionsExt;

    let mut file = fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o600)
        .open(path)?;
    file.write_all(body.as_bytes())
}

#[cfg(not(unix))]
fn write_restricted(path: &Path, body: &str) -> std::io::Result<()> {
    fs::write(path, body)
}

/// Merge config-file options with CLI overrides.
///
/// CLI allow/disallow entries append to the config's; `--allow-only` only
/// ever turns replacement on, so a config that replaces defaults stays that
/// way.
pub fn merge_options(base: Options, cli: &Options) -> Options {
    Options {
        allowed_apps: [base.allowed_apps, cli.allowed_apps.clone()].concat(),
        disallowed_apps: [base.disallowed_apps, cli.disallowed_apps.clone()].concat(),
        replace_default_allowed: base.replace_default_allowed || cli.replace_default_allowed,
    }
}

/// Reject option combinations that would close everything.
pub fn validate_options(options: &Options) -> std::result::Result<(), ZenError> {
    if options.replace_default_allowed && options.allowed_apps.is_empty() {
        return Err(ZenError::validation(
            "--allow-only requires allow apps in CLI or config",
        ));
    }
    Ok(())
}

/// `zen add`: protect `apps` from closure and forget any standing exclusion
/// for them.
pub fn add_allowed_apps(mut options: Options, apps: &[String]) -> Options {
    options.allowed_apps = merge_app_lists(&options.allowed_apps, apps);
    options.disallowed_apps = remove_from_app_list(&options.disallowed_apps, apps);
    options
}

/// `zen remove`: stop protecting `apps` and exclude them even if they come
/// back via defaults.
pub fn remove_allowed_apps(mut options: Options, apps: &[String]) -> Options {
    options.allowed_apps = remove_from_app_list(&options.allowed_apps, apps);
    options.disallowed_apps = merge_app_lists(&options.disallowed_apps, apps);
    options
}
