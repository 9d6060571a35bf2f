use std::time::Duration;

use chrono::Utc;
use indicatif::{ProgressBar, ProgressStyle};
use tabled::Table;

use crate::{config::Config, error, info, spotify, success, types::ArchiveOutcome, utils};

pub async fn archive(config: &Config, name_override: Option<String>) {
    let mut session = super::session(config).await;

    let user = match spotify::playlist::current_user(&mut session).await {
        Ok(user) => user,
        Err(e) => error!("Failed to look up current user: {}", e),
    };
    info!("{}", utils::login_line(&user));

    let pb = ProgressBar::new_spinner();
    pb.set_message("Fetching Discover Weekly tracks...");
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} {msg}")
            .unwrap()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );

    let target = match spotify::playlist::find_target_playlist(&mut session).await {
        Ok(target) => target,
        Err(e) => {
            pb.finish_and_clear();
            error!("Failed to find Discover Weekly playlist: {}", e);
        }
    };

    let tracks = match spotify::playlist::playlist_tracks(&mut session, &target.id).await {
        Ok(tracks) => tracks,
        Err(e) => {
            pb.finish_and_clear();
            error!("Failed to fetch tracks of {:?}: {}", target.name, e);
        }
    };
    pb.finish_and_clear();

    let today = Utc::now().date_naive();
    let (year, week) = utils::iso_year_week(today);
    let name = name_override
        .or_else(|| config.archive_name.clone())
        .unwrap_or_else(|| utils::archive_name(year, week));

    let pb = ProgressBar::new_spinner();
    pb.set_message("Archiving playlist...");
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} {msg}")
            .unwrap()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );

    let outcome =
        match spotify::playlist::archive(&mut session, &user.id, &name, today, &tracks).await {
            Ok(outcome) => {
                pb.finish_and_clear();
                outcome
            }
            Err(e) => {
                pb.finish_and_clear();
                error!("Failed to archive playlist: {}", e);
            }
        };

    match outcome {
        ArchiveOutcome::AlreadyArchived { name } => {
            info!("Playlist {:?} already exists, nothing to archive.", name);
        }
        ArchiveOutcome::Created {
            name,
            id,
            snapshot_id,
        } => {
            success!(
                "Added tracks into playlist {:?} (ID={}) with snapshot ID {}",
                name,
                id,
                snapshot_id
            );

            let table = Table::new(utils::track_table_rows(&tracks));
            println!("{}", table);
        }
    }
}
