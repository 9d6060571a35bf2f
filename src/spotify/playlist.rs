use chrono::NaiveDate;
use thiserror::Error;

use crate::{
    config,
    spotify::auth::{AuthError, Session},
    types::{
        AddTrackToPlaylistRequest, AddTrackToPlaylistResponse, ArchiveOutcome,
        CreatePlaylistRequest, CreatePlaylistResponse, GetPlaylistResponse,
        GetUserPlaylistsResponse, PlaylistTrack, SearchPlaylistsResponse, SimplePlaylist, User,
        UserPlaylist,
    },
    utils,
};

/// Search term the weekly playlist is looked up with.
pub const DISCOVER_WEEKLY_QUERY: &str = "discover weekly";

/// User ID of Spotify's own system account, the owner of every real
/// Discover Weekly playlist.
pub const PLATFORM_OWNER: &str = "spotify";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error("spotify api request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("no Discover Weekly playlist owned by Spotify was found")]
    TargetPlaylistNotFound,
    #[error("adding tracks failed: {0}")]
    AddTracksFailed(String),
}

/// Returns the profile of the user the session belongs to.
pub async fn current_user(session: &mut Session) -> Result<User, ApiError> {
    let token = session.bearer().await?;
    let api_url = format!("{uri}/me", uri = config::SPOTIFY_API_URL);

    let res = session
        .http()
        .get(&api_url)
        .bearer_auth(token)
        .send()
        .await?
        .error_for_status()?;

    Ok(res.json::<User>().await?)
}

/// Locates the user's Discover Weekly playlist.
///
/// Searches for playlists matching [`DISCOVER_WEEKLY_QUERY`] and selects the
/// first result owned by Spotify's system account. User-created playlists
/// with a colliding name never qualify, no matter how early they appear in
/// the results.
///
/// # Errors
///
/// Fails with [`ApiError::TargetPlaylistNotFound`] when no result is owned
/// by the system account; that is fatal for an archive run.
pub async fn find_target_playlist(session: &mut Session) -> Result<SimplePlaylist, ApiError> {
    let candidates = search_weekly_playlists(session).await?;

    pick_platform_playlist(&candidates)
        .cloned()
        .ok_or(ApiError::TargetPlaylistNotFound)
}

async fn search_weekly_playlists(session: &mut Session) -> Result<Vec<SimplePlaylist>, ApiError> {
    let token = session.bearer().await?;
    let api_url = format!("{uri}/search", uri = config::SPOTIFY_API_URL);

    let res = session
        .http()
        .get(&api_url)
        .query(&[("q", DISCOVER_WEEKLY_QUERY), ("type", "playlist")])
        .bearer_auth(token)
        .send()
        .await?
        .error_for_status()?;

    let response = res.json::<SearchPlaylistsResponse>().await?;

    // The search endpoint pads its item list with nulls at times.
    Ok(response.playlists.items.into_iter().flatten().collect())
}

pub fn pick_platform_playlist(playlists: &[SimplePlaylist]) -> Option<&SimplePlaylist> {
    playlists
        .iter()
        .find(|playlist| playlist.owner.id == PLATFORM_OWNER)
}

/// Returns the tracks of a playlist in playlist order.
pub async fn playlist_tracks(
    session: &mut Session,
    playlist_id: &str,
) -> Result<Vec<PlaylistTrack>, ApiError> {
    let token = session.bearer().await?;
    let api_url = format!(
        "{uri}/playlists/{id}",
        uri = config::SPOTIFY_API_URL,
        id = playlist_id
    );

    let res = session
        .http()
        .get(&api_url)
        .bearer_auth(token)
        .send()
        .await?
        .error_for_status()?;

    let playlist = res.json::<GetPlaylistResponse>().await?;

    Ok(playlist
        .tracks
        .items
        .into_iter()
        .filter_map(|item| item.track)
        .collect())
}

/// Returns all playlists of the current user, following pagination.
pub async fn user_playlists(session: &mut Session) -> Result<Vec<UserPlaylist>, ApiError> {
    let mut playlists: Vec<UserPlaylist> = Vec::new();
    let limit = 50u32;
    let mut offset = 0u32;

    loop {
        let token = session.bearer().await?;
        let api_url = format!(
            "{uri}/me/playlists?limit={limit}&offset={offset}",
            uri = config::SPOTIFY_API_URL,
        );

        let res = session
            .http()
            .get(&api_url)
            .bearer_auth(token)
            .send()
            .await?
            .error_for_status()?;

        let page = res.json::<GetUserPlaylistsResponse>().await?;
        let received = page.items.len() as u32;
        playlists.extend(page.items);

        if page.next.is_none() || received == 0 {
            return Ok(playlists);
        }
        offset += limit;
    }
}

pub async fn create(
    session: &mut Session,
    user_id: &str,
    request: &CreatePlaylistRequest,
) -> Result<CreatePlaylistResponse, ApiError> {
    let token = session.bearer().await?;
    let api_url = format!(
        "{uri}/users/{user}/playlists",
        uri = config::SPOTIFY_API_URL,
        user = user_id
    );

    let res = session
        .http()
        .post(&api_url)
        .bearer_auth(token)
        .json(request)
        .send()
        .await?
        .error_for_status()?;

    Ok(res.json::<CreatePlaylistResponse>().await?)
}

/// Adds the given track URIs to a playlist in a single batch request and
/// returns the resulting snapshot ID.
pub async fn add_tracks(
    session: &mut Session,
    playlist_id: &str,
    uris: Vec<String>,
) -> Result<String, ApiError> {
    let token = session.bearer().await?;
    let api_url = format!(
        "{uri}/playlists/{id}/tracks",
        uri = config::SPOTIFY_API_URL,
        id = playlist_id
    );
    let request = AddTrackToPlaylistRequest { uris };

    let res = session
        .http()
        .post(&api_url)
        .bearer_auth(token)
        .json(&request)
        .send()
        .await
        .map_err(|e| ApiError::AddTracksFailed(e.to_string()))?;

    if !res.status().is_success() {
        let status = res.status();
        let body = res.text().await.unwrap_or_default();
        return Err(ApiError::AddTracksFailed(format!("{status}: {body}")));
    }

    let response = res
        .json::<AddTrackToPlaylistResponse>()
        .await
        .map_err(|e| ApiError::AddTracksFailed(e.to_string()))?;

    Ok(response.snapshot_id)
}

pub fn find_by_name<'a>(playlists: &'a [UserPlaylist], name: &str) -> Option<&'a UserPlaylist> {
    playlists.iter().find(|playlist| playlist.name == name)
}

pub fn track_uris(tracks: &[PlaylistTrack]) -> Vec<String> {
    tracks.iter().map(|track| track.uri.clone()).collect()
}

/// Copies the source tracks into a dated archive playlist.
///
/// The flow is idempotent per name: when one of the user's playlists
/// already carries `name`, nothing is created and
/// [`ArchiveOutcome::AlreadyArchived`] is returned as a success. Otherwise
/// a private, non-collaborative playlist is created with the week-derived
/// description and the full track sequence is added in one batch call,
/// preserving source order.
///
/// There is no rollback: when adding the tracks fails, the freshly created
/// playlist is left behind empty.
pub async fn archive(
    session: &mut Session,
    user_id: &str,
    name: &str,
    date: NaiveDate,
    tracks: &[PlaylistTrack],
) -> Result<ArchiveOutcome, ApiError> {
    let existing = user_playlists(session).await?;
    if find_by_name(&existing, name).is_some() {
        return Ok(ArchiveOutcome::AlreadyArchived {
            name: name.to_string(),
        });
    }

    let (year, week) = utils::iso_year_week(date);
    let request = CreatePlaylistRequest {
        name: name.to_string(),
        description: utils::archive_description(year, week),
        public: false,
        collaborative: false,
    };

    let created = create(session, user_id, &request).await?;
    let snapshot_id = add_tracks(session, &created.id, track_uris(tracks)).await?;

    Ok(ArchiveOutcome::Created {
        name: created.name,
        id: created.id,
        snapshot_id,
    })
}
