/// API route modules
pub mod events;
pub mod health;
pub mod music;
pub mod playlists;
