//! ZenSwitch - Main entry point
//!
//! Parses the CLI, merges config-file and flag options, and dispatches to the
//! allow-list or quit-orchestration entry points.

use std::path::PathBuf;
use std::process::ExitCode;

use log::{debug, error, info};

use zenswitch::cli::{parse_app_args, Cli, Commands};
use zenswitch::config::{
    add_allowed_apps, default_config_path, load_options, merge_options, remove_allowed_apps,
    save_options, validate_options,
};
use zenswitch::switcher::{effective_allowed_apps, execute_with_options, preview_with_options};
use zenswitch::{OsExecutor, ZenError};

/// Initialize the logger with appropriate settings
fn init_logger() {
    use env_logger::Builder;
    use std::io::Write;

    Builder::from_default_env()
        .format(|buf, record| {
            writeln!(
                buf,
                "[{} {}:{}] {}",
                record.level(),
                record.file().unwrap_or("unknown"),
                record.line().unwrap_or(0),
                record.args()
            )
        })
        .filter_level(log::LevelFilter::Warn)
        .parse_default_env() // Allows RUST_LOG env var to override
        .init();
}

fn main() -> ExitCode {
    init_logger();
    debug!("ZenSwitch starting up");

    let cli = Cli::parse_args();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => report_failure(err),
    }
}

fn report_failure(err: anyhow::Error) -> ExitCode {
    match err.downcast_ref::<ZenError>() {
        Some(ZenError::UnsupportedOs) => {
            eprintln!("ZenSwitch is macOS-only.");
            ExitCode::from(2)
        }
        Some(ZenError::Quit { closed, .. }) => {
            if !closed.is_empty() {
                println!("ZenSwitch closed apps before failing:");
                for app in closed {
                    println!("- {}", app);
                }
            }
            error!("{}", err);
            eprintln!("ZenSwitch failed: {}", err);
            ExitCode::FAILURE
        }
        _ => {
            error!("{:#}", err);
            eprintln!("ZenSwitch failed: {:#}", err);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config_path_set = cli.config.is_some();
    let config_path: PathBuf = match &cli.config {
        Some(path) => path.clone(),
        None => default_config_path()?,
    };
    debug!("using config path {:?}", config_path);

    match &cli.command {
        Some(Commands::Add { apps }) => {
            let apps = parse_app_args(apps);
            if apps.is_empty() {
                return Err(ZenError::validation("zen add requires at least one app name").into());
            }
            let options = load_options(&config_path, false)?;
            let updated = add_allowed_apps(options, &apps);
            save_options(&config_path, &updated)?;
            info!("added {:?} to allow-list", apps);

            println!("ZenSwitch config updated.");
            print_allowed_apps(&effective_allowed_apps(&updated));
            Ok(())
        }
        Some(Commands::Remove { apps }) => {
            let apps = parse_app_args(apps);
            if apps.is_empty() {
                return Err(
                    ZenError::validation("zen remove requires at least one app name").into(),
                );
            }
            let options = load_options(&config_path, false)?;
            let updated = remove_allowed_apps(options, &apps);
            save_options(&config_path, &updated)?;
            info!("removed {:?} from allow-list", apps);

            println!("ZenSwitch config updated.");
            print_allowed_apps(&effective_allowed_apps(&updated));
            Ok(())
        }
        Some(Commands::List) => {
            let options = merged_options(&cli, &config_path, config_path_set)?;
            print_allowed_apps(&effective_allowed_apps(&options));
            Ok(())
        }
        None => {
            let options = merged_options(&cli, &config_path, config_path_set)?;

            if cli.dry_run {
                let targets = preview_with_options(&OsExecutor, &options)?;
                print_dry_run_targets(&targets);
                return Ok(());
            }

            let closed = execute_with_options(&OsExecutor, &options)?;
            if closed.is_empty() {
                println!("ZenSwitch: no target apps were running.");
            } else {
                println!("ZenSwitch closed apps:");
                for app in &closed {
                    println!("- {}", app);
                }
            }
            Ok(())
        }
    }
}

fn merged_options(
    cli: &Cli,
    config_path: &std::path::Path,
    config_path_set: bool,
) -> anyhow::Result<zenswitch::Options> {
    let base = load_options(config_path, config_path_set)?;
    let options = merge_options(base, &cli.run_options());
    validate_options(&options)?;
    Ok(options)
}

fn print_allowed_apps(apps: &[String]) {
    if apps.is_empty() {
        println!("ZenSwitch allowed apps: (none)");
        return;
    }

    println!("ZenSwitch allowed apps:");
    for app in apps {
        println!("- {}", app);
    }
}

fn print_dry_run_targets(apps: &[String]) {
    if apps.is_empty() {
        println!("ZenSwitch dry-run: no target apps would be closed.");
        return;
    }

    println!("ZenSwitch dry-run targets:");
    for app in apps {
        println!("- {}", app);
    }
}
