use chrono::NaiveDate;
use spweekly::types::{PlaylistTrack, TrackAlbum, TrackArtist, User};
use spweekly::utils::*;

// Helper function to create a test track
fn create_test_track(name: &str, uri: &str, artists: &[&str], album: &str) -> PlaylistTrack {
    PlaylistTrack {
        name: name.to_string(),
        uri: uri.to_string(),
        artists: artists
            .iter()
            .map(|artist| TrackArtist {
                name: artist.to_string(),
            })
            .collect(),
        album: TrackAlbum {
            name: album.to_string(),
        },
    }
}

#[test]
fn test_generate_code_verifier() {
    let verifier = generate_code_verifier();

    // Should be exactly 128 characters
    assert_eq!(verifier.len(), 128);

    // Should contain only alphanumeric characters
    assert!(verifier.chars().all(|c| c.is_ascii_alphanumeric()));

    // Two generated verifiers should be different
    let verifier2 = generate_code_verifier();
    assert_ne!(verifier, verifier2);
}

#[test]
fn test_generate_code_challenge() {
    let verifier = "test_verifier_123";
    let challenge = generate_code_challenge(verifier);

    // Should not be empty
    assert!(!challenge.is_empty());

    // Should be deterministic - same input produces same output
    let challenge2 = generate_code_challenge(verifier);
    assert_eq!(challenge, challenge2);

    // Different input should produce different output
    let challenge3 = generate_code_challenge("different_verifier");
    assert_ne!(challenge, challenge3);

    // Should be base64-encoded (URL-safe, no padding)
    assert!(
        challenge
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    );
}

#[test]
fn test_generate_code_challenge_rfc_vector() {
    // Known SHA-256 / base64url pair from RFC 7636 appendix B
    let verifier = "dBjftJeZ4CVP-mB92K27uhbUJU1p1r_wW1gFWFOEjXk";
    let challenge = generate_code_challenge(verifier);
    assert_eq!(challenge, "E9Melhoa2OwvFrEMTJguCHaoeK1t8URWbuGJSstw-cM");
}

#[test]
fn test_generate_state() {
    let state = generate_state();

    // 16 random bytes encode to 22 base64url characters without padding
    assert_eq!(state.len(), 22);
    assert!(
        state
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    );

    // Two generated states should be different
    let state2 = generate_state();
    assert_ne!(state, state2);
}

#[test]
fn test_iso_year_week() {
    // A plain mid-year date
    let date = NaiveDate::from_ymd_opt(2024, 2, 26).unwrap();
    assert_eq!(iso_year_week(date), (2024, 9));

    // Late December can already belong to week 1 of the next ISO year
    let date = NaiveDate::from_ymd_opt(2024, 12, 30).unwrap();
    assert_eq!(iso_year_week(date), (2025, 1));

    // Early January can still belong to week 53 of the previous ISO year
    let date = NaiveDate::from_ymd_opt(2027, 1, 1).unwrap();
    assert_eq!(iso_year_week(date), (2026, 53));
}

#[test]
fn test_archive_name() {
    // Week numbers are not zero-padded
    assert_eq!(archive_name(2024, 9), "Archived discover weekly 2024-9");
    assert_eq!(archive_name(2025, 52), "Archived discover weekly 2025-52");
}

#[test]
fn test_archive_description() {
    assert_eq!(
        archive_description(2024, 9),
        "Archived weekly playlist for week 2024-9"
    );
}

#[test]
fn test_login_line() {
    let user = User {
        id: "wizzler".to_string(),
        display_name: Some("Wizzler".to_string()),
    };

    // The id is what gets announced, not the display name
    assert_eq!(login_line(&user), "You are logged in as: wizzler");
}

#[test]
fn test_join_artists() {
    // Empty list
    assert_eq!(join_artists(&[]), "");

    // Single artist
    let single = vec![TrackArtist {
        name: "Artist A".to_string(),
    }];
    assert_eq!(join_artists(&single), "Artist A");

    // Multiple artists are joined with a pipe separator
    let multiple = vec![
        TrackArtist {
            name: "Artist A".to_string(),
        },
        TrackArtist {
            name: "Artist B".to_string(),
        },
    ];
    assert_eq!(join_artists(&multiple), "Artist A | Artist B");
}

#[test]
fn test_track_table_rows() {
    let tracks = vec![
        create_test_track(
            "Track 1",
            "spotify:track:1",
            &["Artist A", "Artist B"],
            "Album X",
        ),
        create_test_track("Track 2", "spotify:track:2", &["Artist C"], "Album Y"),
    ];

    let rows = track_table_rows(&tracks);

    // One row per track, in playlist order
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].artist, "Artist A | Artist B");
    assert_eq!(rows[0].track, "Track 1");
    assert_eq!(rows[0].album, "Album X");
    assert_eq!(rows[1].artist, "Artist C");
    assert_eq!(rows[1].track, "Track 2");
    assert_eq!(rows[1].album, "Album Y");
}
