pub mod db;
pub mod favorites;
pub mod io;

pub use db::LaunchpadDb;

pub use favorites::{
    FavoritesBackend, FavoritesHandle, FavoritesStore, MemoryFavoritesBackend,
    SqliteFavoritesBackend, FAVORITES_KEY,
};
