mod ids;
mod playlist;
mod song;

pub use ids::{PlaylistId, SongId, UserId};
pub use playlist::{validate_name, CreatePlaylist, Playlist, PlaylistUpdate};
pub use song::{NewSong, Song, DEFAULT_ARTWORK_URL};
