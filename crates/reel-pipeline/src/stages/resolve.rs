//! Broadcaster-id lookup utility.

use reel_twitch::{AppCredentials, HelixClient};

use crate::logging::StageLogger;

/// Resolve a user login to its broadcaster id and print it.
pub async fn run(login: &str, logger: &StageLogger) -> anyhow::Result<()> {
    logger.start(&format!("resolving login '{login}'"));

    let mut client = HelixClient::new(AppCredentials::from_env()?);
    client.authenticate().await?;

    match client.broadcaster_id(login).await? {
        Some(id) => {
            println!("{id}");
            logger.completion(&format!("'{login}' -> {id}, add it to BROADCASTER_IDS"));
        }
        None => {
            logger.warning(&format!("no user found for login '{login}'"));
        }
    }
    Ok(())
}
