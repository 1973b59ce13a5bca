//! Command-line interface.

use clap::{Parser, Subcommand};

/// ClipReel: automated Twitch clip compilations.
#[derive(Parser, Debug)]
#[command(name = "clipreel", version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Fetch top clips from the Helix API and select the compilation set
    Fetch,

    /// Download and normalize the selected clips
    Download,

    /// Concatenate the clips into the compiled video with timecodes
    Compile,

    /// Compose the upload thumbnail from the leading clip frames
    Thumbnail,

    /// Generate title, description and tags for the upload
    Metadata,

    /// Upload the compiled video and thumbnail to YouTube
    Upload,

    /// Run every stage in order
    Run {
        /// Stop after metadata generation instead of uploading
        #[arg(long)]
        skip_upload: bool,
    },

    /// Resolve a Twitch user login to its broadcaster id
    ResolveLogin {
        /// The user login, e.g. "somestreamer"
        login: String,
    },
}
