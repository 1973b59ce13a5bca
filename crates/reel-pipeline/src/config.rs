//! Pipeline configuration.
//!
//! Everything is read from the environment once at startup and handed to
//! the stages as one value; no stage reads process-wide state on its own.

use reel_select::SelectionConfig;
use std::path::PathBuf;
use std::str::FromStr;

/// Default broadcaster ids (French-speaking channels) used when
/// `BROADCASTER_IDS` is not set.
const DEFAULT_BROADCASTER_IDS: &[&str] = &[
    "52130765",   // Squeezie
    "22245231",   // SqueezieLive
    "80716629",   // Inoxtag
    "153066440",  // Michou
    "737048563",  // AmineMaTue
    "57402636",   // RebeuDeter
    "24147592",   // Gotaga
    "134966333",  // Kameto
    "57404419",   // Ponce
    "38038890",   // Antoine Daniel
    "48480373",   // MisterMV
    "19075728",   // Sardoche
    "50290500",   // Domingo
    "41719107",   // ZeratoR
    "46296316",   // Maghla
    "53696803",   // Wankil Studio
    "53140510",   // Etoiles
    "134812328",  // LittleBigWhale
    "142436402",  // Ultia
    "20875990",   // LCK_France
];

/// Default game/category ids used when `GAME_IDS` is not set.
const DEFAULT_GAME_IDS: &[&str] = &[
    "509670",      // Just Chatting
    "21779",       // League of Legends
    "32982",       // Grand Theft Auto V
    "512965",      // VALORANT
    "518018",      // Minecraft
    "513143",      // Fortnite
    "32399",       // Counter-Strike
    "511224",      // Apex Legends
    "490422",      // Dead by Daylight
    "65768",       // Rocket League
    "488427",      // World of Warcraft
    "138585",      // Chess
    "493306",      // Overwatch 2
    "1678120671",  // Baldur's Gate 3
    "1285324545",  // Lethal Company
];

/// Full configuration for one pipeline run.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Directory for stage artifacts and intermediate media
    pub data_dir: PathBuf,
    /// Directory for the compiled video
    pub output_dir: PathBuf,
    /// Logo composited onto the thumbnail, skipped when absent
    pub logo_path: PathBuf,
    /// ISO 639-1 language of clips to keep
    pub language: String,
    /// How many days back the clip window starts
    pub lookback_days: i64,
    /// Clips requested per broadcaster/game source
    pub clips_per_source: u32,
    /// Broadcaster sources for the priority pool
    pub broadcaster_ids: Vec<String>,
    /// Game/category sources for the fill pool
    pub game_ids: Vec<String>,
    /// Selection parameters
    pub selection: SelectionConfig,
    /// Upload privacy: "public", "unlisted" or "private"
    pub privacy_status: String,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        let language = "fr".to_string();
        Self {
            data_dir: PathBuf::from("data"),
            output_dir: PathBuf::from("output"),
            logo_path: PathBuf::from("assets/logo.png"),
            language: language.clone(),
            lookback_days: 3,
            clips_per_source: 50,
            broadcaster_ids: to_owned_list(DEFAULT_BROADCASTER_IDS),
            game_ids: to_owned_list(DEFAULT_GAME_IDS),
            selection: SelectionConfig {
                language: Some(language),
                ..SelectionConfig::default()
            },
            privacy_status: "public".to_string(),
        }
    }
}

impl PipelineConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let language =
            std::env::var("CLIP_LANGUAGE").unwrap_or_else(|_| defaults.language.clone());

        Self {
            data_dir: env_parse("CLIPREEL_DATA_DIR", defaults.data_dir),
            output_dir: env_parse("CLIPREEL_OUTPUT_DIR", defaults.output_dir),
            logo_path: env_parse("CLIPREEL_LOGO", defaults.logo_path),
            lookback_days: env_parse("LOOKBACK_DAYS", defaults.lookback_days),
            clips_per_source: env_parse("CLIPS_PER_SOURCE", defaults.clips_per_source),
            broadcaster_ids: env_list("BROADCASTER_IDS", defaults.broadcaster_ids),
            game_ids: env_list("GAME_IDS", defaults.game_ids),
            selection: SelectionConfig {
                min_total_duration_secs: env_parse(
                    "MIN_VIDEO_DURATION_SECONDS",
                    defaults.selection.min_total_duration_secs,
                ),
                max_clips_per_broadcaster: env_parse(
                    "MAX_CLIPS_PER_BROADCASTER",
                    defaults.selection.max_clips_per_broadcaster,
                ),
                strict_priority: env_parse(
                    "PRIORITIZE_BROADCASTERS_STRICTLY",
                    defaults.selection.strict_priority,
                ),
                min_clip_count: env_parse("MIN_CLIP_COUNT", defaults.selection.min_clip_count),
                max_total_clips: env_parse("MAX_TOTAL_CLIPS", defaults.selection.max_total_clips),
                language: Some(language.clone()),
            },
            privacy_status: env_parse("PRIVACY_STATUS", defaults.privacy_status),
            language,
        }
    }
}

fn to_owned_list(ids: &[&str]) -> Vec<String> {
    ids.iter().map(|s| (*s).to_string()).collect()
}

/// Parse an env var, falling back to the default when unset or invalid.
fn env_parse<T: FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

/// Parse a comma-separated env var into a trimmed list.
fn env_list(key: &str, default: Vec<String>) -> Vec<String> {
    match std::env::var(key) {
        Ok(raw) => raw
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect(),
        Err(_) => default,
    }
}
