//! Client configuration from environment variables.

use std::env;

/// Terminal client configuration.
///
/// Environment variables:
/// - `PIXELHERO_SEED` - Fix the run's RNG seed (default: random)
/// - `PIXELHERO_MESSAGE_PANEL_HEIGHT` - Message panel height in lines
///   (default: 8, including borders)
#[derive(Clone, Debug)]
pub struct ClientConfig {
    pub seed: Option<u64>,
    pub message_panel_height: u16,
}

impl ClientConfig {
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Some(seed) = read_env::<u64>("PIXELHERO_SEED") {
            config.seed = Some(seed);
        }
        if let Some(height) = read_env::<u16>("PIXELHERO_MESSAGE_PANEL_HEIGHT") {
            config.message_panel_height = height.max(3);
        }
        config
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            seed: None,
            message_panel_height: 8,
        }
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
