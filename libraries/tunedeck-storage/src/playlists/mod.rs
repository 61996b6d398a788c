use sqlx::{sqlite::SqliteRow, Row, Sqlite, SqlitePool, Transaction};
use tunedeck_core::{
    error::Result,
    types::{
        validate_name, CreatePlaylist, NewSong, Playlist, PlaylistId, PlaylistUpdate, Song, SongId,
        UserId,
    },
    CoreError,
};

const TOUCH_PLAYLIST: &str =
    "UPDATE playlists SET updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now') WHERE id = ?";

/// Get every playlist owned by `owner_id`, most recently updated first
pub async fn get_user_playlists(pool: &SqlitePool, owner_id: UserId) -> Result<Vec<Playlist>> {
    let rows = sqlx::query(
        r#"
        SELECT id, name, owner_id, created_at, updated_at
        FROM playlists
        WHERE owner_id = ?
        ORDER BY updated_at DESC, rowid DESC
        "#,
    )
    .bind(owner_id.as_str())
    .fetch_all(pool)
    .await?;

    let mut playlists = Vec::with_capacity(rows.len());
    for row in rows {
        let mut playlist = playlist_from_row(&row);
        playlist.songs = get_songs(pool, &playlist.id).await?;
        playlists.push(playlist);
    }

    Ok(playlists)
}

/// Get playlist by ID, songs included
pub async fn get_by_id(pool: &SqlitePool, id: PlaylistId) -> Result<Option<Playlist>> {
    let row = sqlx::query(
        r#"
        SELECT id, name, owner_id, created_at, updated_at
        FROM playlists
        WHERE id = ?
        "#,
    )
    .bind(id.as_str())
    .fetch_optional(pool)
    .await?;

    let Some(row) = row else {
        return Ok(None);
    };

    let mut playlist = playlist_from_row(&row);
    playlist.songs = get_songs(pool, &playlist.id).await?;

    Ok(Some(playlist))
}

/// Create new playlist with its initial songs
pub async fn create(pool: &SqlitePool, playlist: CreatePlaylist) -> Result<Playlist> {
    playlist.validate()?;

    let id = PlaylistId::generate();
    let mut tx = pool.begin().await?;

    sqlx::query("INSERT INTO playlists (id, name, owner_id) VALUES (?, ?, ?)")
        .bind(id.as_str())
        .bind(&playlist.name)
        .bind(playlist.owner_id.as_str())
        .execute(&mut *tx)
        .await?;

    insert_songs(&mut tx, &id, 0, &playlist.songs).await?;

    tx.commit().await?;

    tracing::debug!(playlist_id = %id, songs = playlist.songs.len(), "Created playlist");

    reload(pool, id).await
}

/// Overwrite the song list
pub async fn replace_songs(pool: &SqlitePool, id: PlaylistId, songs: Vec<Song>) -> Result<Playlist> {
    let mut tx = pool.begin().await?;
    ensure_exists(&mut tx, &id).await?;

    sqlx::query("DELETE FROM playlist_songs WHERE playlist_id = ?")
        .bind(id.as_str())
        .execute(&mut *tx)
        .await?;

    insert_songs(&mut tx, &id, 0, &songs).await?;

    sqlx::query(TOUCH_PLAYLIST)
        .bind(id.as_str())
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    reload(pool, id).await
}

/// Append a song at the end of the playlist
pub async fn append_song(pool: &SqlitePool, id: PlaylistId, song: NewSong) -> Result<Playlist> {
    let song = song.into_song();

    let mut tx = pool.begin().await?;
    ensure_exists(&mut tx, &id).await?;

    let next_position: i64 = sqlx::query(
        "SELECT COALESCE(MAX(position) + 1, 0) AS next_pos FROM playlist_songs WHERE playlist_id = ?",
    )
    .bind(id.as_str())
    .fetch_one(&mut *tx)
    .await?
    .get("next_pos");

    insert_songs(&mut tx, &id, next_position, std::slice::from_ref(&song)).await?;

    sqlx::query(TOUCH_PLAYLIST)
        .bind(id.as_str())
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    reload(pool, id).await
}

/// Remove every song with `song_id` and close the gaps in the ordering
pub async fn remove_song(pool: &SqlitePool, id: PlaylistId, song_id: SongId) -> Result<Playlist> {
    let mut tx = pool.begin().await?;
    ensure_exists(&mut tx, &id).await?;

    let rows = sqlx::query(&format!("{SELECT_SONGS} WHERE playlist_id = ? ORDER BY position"))
        .bind(id.as_str())
        .fetch_all(&mut *tx)
        .await?;

    let songs: Vec<Song> = rows.iter().map(song_from_row).collect();
    let remaining: Vec<Song> = songs
        .iter()
        .filter(|song| song.id != song_id)
        .cloned()
        .collect();

    if remaining.len() == songs.len() {
        // Nothing matched; leave the playlist untouched
        tx.commit().await?;
        return reload(pool, id).await;
    }

    sqlx::query("DELETE FROM playlist_songs WHERE playlist_id = ?")
        .bind(id.as_str())
        .execute(&mut *tx)
        .await?;

    insert_songs(&mut tx, &id, 0, &remaining).await?;

    sqlx::query(TOUCH_PLAYLIST)
        .bind(id.as_str())
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    reload(pool, id).await
}

/// Rename playlist
pub async fn rename(pool: &SqlitePool, id: PlaylistId, name: String) -> Result<Playlist> {
    validate_name(&name)?;

    let result = sqlx::query(
        "UPDATE playlists SET name = ?, updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now') WHERE id = ?",
    )
    .bind(&name)
    .bind(id.as_str())
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(CoreError::PlaylistNotFound(id));
    }

    reload(pool, id).await
}

/// Rename and replace songs in a single transaction
pub async fn update(pool: &SqlitePool, id: PlaylistId, update: PlaylistUpdate) -> Result<Playlist> {
    update.validate()?;

    let mut tx = pool.begin().await?;
    ensure_exists(&mut tx, &id).await?;

    if let Some(name) = &update.name {
        sqlx::query("UPDATE playlists SET name = ? WHERE id = ?")
            .bind(name)
            .bind(id.as_str())
            .execute(&mut *tx)
            .await?;
    }

    if let Some(songs) = &update.songs {
        sqlx::query("DELETE FROM playlist_songs WHERE playlist_id = ?")
            .bind(id.as_str())
            .execute(&mut *tx)
            .await?;

        insert_songs(&mut tx, &id, 0, songs).await?;
    }

    if !update.is_empty() {
        sqlx::query(TOUCH_PLAYLIST)
            .bind(id.as_str())
            .execute(&mut *tx)
            .await?;
    }

    tx.commit().await?;

    reload(pool, id).await
}

/// Delete playlist
pub async fn delete(pool: &SqlitePool, id: PlaylistId) -> Result<()> {
    let mut tx = pool.begin().await?;

    sqlx::query("DELETE FROM playlist_songs WHERE playlist_id = ?")
        .bind(id.as_str())
        .execute(&mut *tx)
        .await?;

    let result = sqlx::query("DELETE FROM playlists WHERE id = ?")
        .bind(id.as_str())
        .execute(&mut *tx)
        .await?;

    if result.rows_affected() == 0 {
        // Dropping the transaction rolls it back
        return Err(CoreError::PlaylistNotFound(id));
    }

    tx.commit().await?;

    Ok(())
}

// Helper functions

const SELECT_SONGS: &str =
    "SELECT song_id, name, artists, image_url, duration_ms, preview_url FROM playlist_songs";

async fn get_songs(pool: &SqlitePool, id: &PlaylistId) -> Result<Vec<Song>> {
    let rows = sqlx::query(&format!("{SELECT_SONGS} WHERE playlist_id = ? ORDER BY position"))
        .bind(id.as_str())
        .fetch_all(pool)
        .await?;

    Ok(rows.iter().map(song_from_row).collect())
}

async fn ensure_exists(tx: &mut Transaction<'_, Sqlite>, id: &PlaylistId) -> Result<()> {
    let found = sqlx::query("SELECT 1 FROM playlists WHERE id = ?")
        .bind(id.as_str())
        .fetch_optional(&mut **tx)
        .await?;

    match found {
        Some(_) => Ok(()),
        None => Err(CoreError::PlaylistNotFound(id.clone())),
    }
}

async fn insert_songs(
    tx: &mut Transaction<'_, Sqlite>,
    id: &PlaylistId,
    start_position: i64,
    songs: &[Song],
) -> Result<()> {
    for (offset, song) in songs.iter().enumerate() {
        sqlx::query(
            r#"
            INSERT INTO playlist_songs
                (playlist_id, position, song_id, name, artists, image_url, duration_ms, preview_url)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(id.as_str())
        .bind(start_position + offset as i64)
        .bind(song.id.as_str())
        .bind(&song.name)
        .bind(&song.artists)
        .bind(&song.image_url)
        .bind(song.duration_ms.map(|ms| ms as i64))
        .bind(&song.preview_url)
        .execute(&mut **tx)
        .await?;
    }

    Ok(())
}

async fn reload(pool: &SqlitePool, id: PlaylistId) -> Result<Playlist> {
    get_by_id(pool, id.clone())
        .await?
        .ok_or(CoreError::PlaylistNotFound(id))
}

fn playlist_from_row(row: &SqliteRow) -> Playlist {
    Playlist {
        id: PlaylistId::new(row.get::<String, _>("id")),
        name: row.get("name"),
        owner_id: UserId::new(row.get::<String, _>("owner_id")),
        songs: Vec::new(),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

fn song_from_row(row: &SqliteRow) -> Song {
    Song {
        id: SongId::new(row.get::<String, _>("song_id")),
        name: row.get("name"),
        artists: row.get("artists"),
        image_url: row.get("image_url"),
        duration_ms: row.get::<Option<i64>, _>("duration_ms").map(|ms| ms as u64),
        preview_url: row.get("preview_url"),
    }
}
