mod ids;
mod playlist;
mod song;
mod user;

pub use ids::{PlaylistId, TrackId, UserId};
pub use playlist::Playlist;
pub use song::Song;
pub use user::{Role, User};
