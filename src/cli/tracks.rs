use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use tabled::Table;

use crate::{config::Config, error, info, spotify, utils};

pub async fn tracks(config: &Config) {
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

    info!("{} tracks in {:?}:", tracks.len(), target.name);
    let table = Table::new(utils::track_table_rows(&tracks));
    println!("{}", table);
}
