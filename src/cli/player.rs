use tabled::Table;

use crate::{
    Error,
    api::NO_ACTIVE_DEVICE_MESSAGE,
    cli::{playback_manager, spinner},
    config::Config,
    info, success,
    types::TopTrackTableRow,
    warning,
};

pub async fn now(config: Config) {
    let player = playback_manager(&config);

    let pb = spinner("Fetching current track...");
    let result = player.now_playing().await;
    pb.finish_and_clear();

    match result {
        Ok(Some(track)) => {
            success!("Now playing: {} - {}", track.artist_names(), track.name);
            if let Some(album) = &track.album {
                info!("Album: {}", album.name);
            }
            info!("URI: {}", track.uri);
        }
        Ok(None) => info!("Nothing is playing right now."),
        Err(e) => warning!("Failed to fetch current track: {}", e),
    }
}

pub async fn top(config: Config, limit: u32) {
    let player = playback_manager(&config);

    let pb = spinner("Fetching top tracks...");
    let result = player.top_tracks(limit).await;
    pb.finish_and_clear();

    match result {
        Ok(tracks) if tracks.is_empty() => info!("Spotify returned no top tracks yet."),
        Ok(tracks) => {
            let rows: Vec<TopTrackTableRow> = tracks
                .into_iter()
                .enumerate()
                .map(|(i, track)| TopTrackTableRow {
                    rank: i + 1,
                    name: track.name,
                    artist: track.artist,
                    uri: track.uri,
                })
                .collect();

            let table = Table::new(rows);
            println!("{}", table);
        }
        Err(e) => warning!("Failed to fetch top tracks: {}", e),
    }
}

pub async fn play(config: Config, uri: String) {
    let player = playback_manager(&config);

    match player.start_playback(&uri).await {
        Ok(()) => success!("Playing track {}", uri.trim()),
        Err(Error::NoActiveDevice) => warning!("{}", NO_ACTIVE_DEVICE_MESSAGE),
        Err(e) => warning!("Failed to start playback: {}", e),
    }
}

pub async fn pause(config: Config) {
    let player = playback_manager(&config);

    match player.pause_playback().await {
        Ok(()) => success!("Playback paused"),
        Err(e) => warning!("Failed to pause playback: {}", e),
    }
}
