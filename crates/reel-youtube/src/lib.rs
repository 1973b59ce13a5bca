//! YouTube Data API v3 client.
//!
//! Covers the upload path only: refresh-token authentication, multipart
//! `videos.insert`, `thumbnails.set`, and the title sanitation YouTube's
//! 100-character limit requires.

pub mod auth;
pub mod error;
pub mod title;
pub mod upload;

pub use auth::RefreshCredentials;
pub use error::{YoutubeError, YoutubeResult};
pub use title::clean_title;
pub use upload::YoutubeClient;
