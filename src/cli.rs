use crate::constants::DEFAULT_RESOLUTION;
use crate::errors::{AppError, AppResult};
use crate::fetcher::download_wallpapers;
use crate::locator::locate;
use crate::models::{CalendarMode, TargetPeriod};
use chrono::{Datelike, Local};
use clap::{Arg, ArgAction, Command};
use std::path::{Path, PathBuf};
use tracing::info;

// CLI metadata constants
const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
const APP_ABOUT: &str = env!("CARGO_PKG_DESCRIPTION");

/// Builds the argument surface.
///
/// Month and year default to the current date, the destination to
/// `~/Pictures/Smashing-Wallpapers`; defaults are resolved once in [`run`]
/// and threaded through as parameters from there.
pub fn build_command() -> Command<'static> {
    Command::new("smash-walls")
        .version(APP_VERSION)
        .about(APP_ABOUT)
        .arg(
            Arg::new("month")
                .long("month")
                .help("Chosen month (1-12), defaults to current")
                .value_parser(clap::value_parser!(u32).range(1..=12))
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("year")
                .long("year")
                .help("Chosen year, defaults to current")
                .value_parser(clap::value_parser!(i32))
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("dest")
                .long("dest")
                .help("Custom download folder")
                .value_parser(clap::value_parser!(PathBuf))
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("res")
                .long("res")
                .help("Wallpaper resolution (default: 1920x1080)")
                .default_value(DEFAULT_RESOLUTION)
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("nocal")
                .long("nocal")
                .help("Wallpaper without calendar")
                .action(ArgAction::SetTrue),
        )
}

/// Parses command-line arguments and executes the download workflow.
///
/// # Errors
///
/// Returns [`AppError::ArchiveNotFound`] when no archive post exists for
/// the requested month/year within the scanned listing pages; the caller
/// turns that into a stderr message and a nonzero exit. Any other error
/// (transport, filesystem) is fatal and unretried.
pub async fn run() -> AppResult<()> {
    let matches = build_command().get_matches();

    let today = Local::now().date_naive();
    let month = matches
        .get_one::<u32>("month")
        .copied()
        .unwrap_or_else(|| today.month());
    let year = matches
        .get_one::<i32>("year")
        .copied()
        .unwrap_or_else(|| today.year());
    let period = TargetPeriod::new(month, year)?;

    let dest = matches
        .get_one::<PathBuf>("dest")
        .cloned()
        .unwrap_or_else(default_dest);
    let resolution = matches
        .get_one::<String>("res")
        .expect("res has default_value");
    let mode = CalendarMode::from(matches.get_flag("nocal"));

    run_workflow(&period, &dest, resolution, mode).await
}

/// `~/Pictures/Smashing-Wallpapers`, falling back to the working directory
/// when no home directory can be determined.
fn default_dest() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("Pictures")
        .join("Smashing-Wallpapers")
}

/// Directory a period's wallpapers land in: `<dest>/<year>/<month:02d>`.
pub fn download_dir_for(dest: &Path, period: &TargetPeriod) -> PathBuf {
    dest.join(period.year.to_string()).join(period.month_dir())
}

/// The whole pipeline: directory creation, locate, fetch.
pub async fn run_workflow(
    period: &TargetPeriod,
    dest: &Path,
    resolution: &str,
    mode: CalendarMode,
) -> AppResult<()> {
    let download_dir = download_dir_for(dest, period);

    // create_dir_all treats an already existing directory as success
    tokio::fs::create_dir_all(&download_dir).await.map_err(|e| {
        AppError::IoError(format!(
            "Failed to create directory {}: {}",
            download_dir.display(),
            e
        ))
    })?;

    let client = reqwest::Client::new();

    let archive_url = locate(&client, period)
        .await?
        .ok_or_else(|| AppError::ArchiveNotFound {
            token: period.archive_token(),
        })?;

    println!("Starting download to {}", download_dir.display());

    let downloaded =
        download_wallpapers(&client, &archive_url, &download_dir, resolution, mode).await?;

    info!(
        downloaded = downloaded,
        token = period.archive_token().as_str(),
        "Download completed"
    );

    Ok(())
}
