//! Twitch Helix API client.
//!
//! Covers the three calls the pipeline needs: app-token authentication
//! (client-credentials grant), top clips per broadcaster or per game over a
//! time window, and user-login to broadcaster-id resolution.

pub mod auth;
pub mod client;
pub mod error;

pub use auth::AppCredentials;
pub use client::{ClipQuery, ClipSource, HelixClient};
pub use error::{TwitchError, TwitchResult};
