mod cache;
mod session;

pub use cache::PlaylistCache;
pub use session::SessionStore;
