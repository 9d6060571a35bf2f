use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use chrono::{Datelike, NaiveDate};
use rand::{Rng, distr::Alphanumeric};
use sha2::{Digest, Sha256};

use crate::types::{PlaylistTrack, TrackArtist, TrackTableRow, User};

pub fn generate_code_verifier() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(128)
        .map(char::from)
        .collect()
}

pub fn generate_code_challenge(verifier: &str) -> String {
    let hash = Sha256::digest(verifier.as_bytes());
    URL_SAFE_NO_PAD.encode(hash)
}

pub fn generate_state() -> String {
    let bytes: [u8; 16] = rand::rng().random();
    URL_SAFE_NO_PAD.encode(bytes)
}

pub fn iso_year_week(date: NaiveDate) -> (i32, u32) {
    let week = date.iso_week();
    (week.year(), week.week())
}

pub fn archive_name(year: i32, week: u32) -> String {
    format!("Archived discover weekly {}-{}", year, week)
}

pub fn archive_description(year: i32, week: u32) -> String {
    format!("Archived weekly playlist for week {}-{}", year, week)
}

pub fn login_line(user: &User) -> String {
    format!("You are logged in as: {}", user.id)
}

pub fn join_artists(artists: &[TrackArtist]) -> String {
    artists
        .iter()
        .map(|artist| artist.name.as_str())
        .collect::<Vec<_>>()
        .join(" | ")
}

pub fn track_table_rows(tracks: &[PlaylistTrack]) -> Vec<TrackTableRow> {
    tracks
        .iter()
        .map(|track| TrackTableRow {
            artist: join_artists(&track.artists),
            track: track.name.clone(),
            album: track.album.name.clone(),
        })
        .collect()
}
