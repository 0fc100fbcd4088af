//! Command line arguments

use std::path::PathBuf;

use clap::Parser;
use ep_shared::{AppConfig, Language};

/// Verify the email of an EcoPickup account with a one-time code
#[derive(Debug, Parser)]
#[command(name = "ecopickup-otp", version, about)]
pub struct Args {
    /// Configuration file (defaults to config.<environment>.toml when present)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Backend base URL, overriding the configured one
    #[arg(long, value_name = "URL")]
    pub base_url: Option<String>,

    /// Session token issued at login; stored for later runs
    #[arg(long, env = "EP_SESSION_TOKEN", value_name = "TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Language of local messages: en or id
    #[arg(long, value_name = "LANG")]
    pub language: Option<Language>,

    /// Email address the code was sent to, shown in the prompt
    #[arg(long, value_name = "EMAIL")]
    pub email: Option<String>,
}

impl Args {
    /// Apply command line overrides on top of the loaded configuration
    pub fn apply(&self, config: &mut AppConfig) {
        if let Some(base_url) = &self.base_url {
            config.api.base_url = base_url.clone();
        }
        if let Some(language) = self.language {
            config.language = language;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_overrides_apply() {
        let args = Args::parse_from([
            "ecopickup-otp",
            "--base-url",
            "https://staging-api.ecopickup.id",
            "--language",
            "en",
        ]);
        let mut config = AppConfig::default();
        args.apply(&mut config);

        assert_eq!(config.api.base_url, "https://staging-api.ecopickup.id");
        assert_eq!(config.language, Language::English);
    }

    #[test]
    fn test_no_overrides_keep_config() {
        let args = Args::parse_from(["ecopickup-otp"]);
        let mut config = AppConfig::default();
        let before = config.api.base_url.clone();
        args.apply(&mut config);

        assert_eq!(config.api.base_url, before);
        assert_eq!(config.language, Language::Indonesian);
    }
}
