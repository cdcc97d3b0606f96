//! Quit orchestration: enumerate running apps, resolve the allow-list, and
//! close every target sequentially.
//!
//! Enumeration and termination are shell-outs (`osascript`, `pkill`) routed
//! through the [`Executor`] seam. Everything here is blocking and
//! single-threaded; each invocation builds fresh allow-list and target-list
//! values.

use log::{debug, info, warn};

use crate::allowlist::{self, Options, DEFAULT_ALLOWED_APPS};
use crate::error::{Result, ZenError};
use crate::executor::Executor;

const LIST_RUNNING_SCRIPT: &str = "tell application \"System Events\" to get name of every application process whose background only is false";

/// Names under which the tool itself may show up in the process list.
///
/// Always implicitly allowed, independent of configuration.
pub fn self_app_names() -> Vec<String> {
    let mut names = vec!["zen".to_string()];
    if let Ok(exe) = std::env::current_exe() {
        if let Some(stem) = exe.file_stem().and_then(|s| s.to_str()) {
            if !stem.eq_ignore_ascii_case("zen") {
                names.push(stem.to_string());
            }
        }
    }
    names
}

fn ensure_macos() -> Result<()> {
    if cfg!(target_os = "macos") {
        Ok(())
    } else {
        Err(ZenError::UnsupportedOs)
    }
}

/// The allow-list that results from `options` applied to the built-in
/// defaults. Used by `list` and by the config mutation commands for display.
pub fn effective_allowed_apps(options: &Options) -> Vec<String> {
    allowlist::resolve(DEFAULT_ALLOWED_APPS, options)
}

/// Enumerate the names of running foreground applications.
pub fn running_app_names(executor: &dyn Executor) -> Result<Vec<String>> {
    match executor.run("osascript", &["-e", LIST_RUNNING_SCRIPT]) {
        Ok(result) if result.success => Ok(allowlist::split_app_list(&result.output)),
        Ok(result) => Err(ZenError::listing(result.trimmed().to_string())),
        Err(err) => Err(ZenError::listing(err.to_string())),
    }
}

/// Escape an app name for interpolation into an AppleScript string literal.
fn escape_applescript(name: &str) -> String {
    name.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Close a single application: graceful quit first, then forceful
/// termination.
///
/// A graceful-quit failure is tolerated (the app may not speak AppleEvents);
/// the forceful step decides the outcome. `pkill` exiting non-zero with no
/// output means no such process was running, which counts as success.
fn quit_app(executor: &dyn Executor, app: &str) -> std::result::Result<(), String> {
    let quit_script = format!("tell application \"{}\" to quit", escape_applescript(app));
    match executor.run("osascript", &["-e", &quit_script]) {
        Ok(result) if result.success => debug!("graceful quit sent to {}", app),
        Ok(result) => warn!("graceful quit of {} failed: {}", app, result.trimmed()),
        Err(err) => warn!("graceful quit of {} failed: {}", app, err),
    }

    match executor.run("pkill", &["-x", app]) {
        Ok(result) if result.success => Ok(()),
        Ok(result) if result.trimmed().is_empty() => {
            // pkill found no matching process: already closed.
            debug!("{} already closed before pkill", app);
            Ok(())
        }
        Ok(result) => Err(result.trimmed().to_string()),
        Err(err) => Err(err.to_string()),
    }
}

/// Compute the sorted list of apps that would be closed.
fn collect_targets(executor: &dyn Executor, options: &Options) -> Result<Vec<String>> {
    let running = running_app_names(executor)?;
    debug!("{} running apps reported", running.len());

    let allow_list = effective_allowed_apps(options);
    let mut targets = allowlist::filter_targets(&running, &allow_list, &self_app_names());

    // Sorted before acting so both dry-run output and the closed-apps report
    // are deterministic across runs.
    targets.sort();
    Ok(targets)
}

/// Dry-run entry point: report the apps that would be closed without touching
/// any of them.
pub fn preview_with_options(executor: &dyn Executor, options: &Options) -> Result<Vec<String>> {
    ensure_macos()?;
    collect_targets(executor, options)
}

/// Close every target app and return the names of the apps closed, sorted.
///
/// A quit failure aborts the remaining targets; the error carries the apps
/// closed up to that point.
pub fn execute_with_options(executor: &dyn Executor, options: &Options) -> Result<Vec<String>> {
    ensure_macos()?;

    let targets = collect_targets(executor, options)?;
    info!("closing {} target apps", targets.len());

    let mut closed: Vec<String> = Vec::with_capacity(targets.len());
    for app in targets {
        if let Err(reason) = quit_app(executor, &app) {
            return Err(ZenError::Quit {
                app,
                reason,
                closed,
            });
        }
        info!("closed {}", app);
        closed.push(app);
    }

    Ok(closed)
}
