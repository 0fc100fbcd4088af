use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::Parser;
use ep_app::{logging, run_session, Args, SessionEnd};
use ep_core::{
    SessionContext, SessionStoreTrait, SessionToken, VerificationFlow, VerificationFlowConfig,
};
use ep_infra::{CooldownTimer, FileSessionStore, HttpOtpApi, DEFAULT_TICK_INTERVAL};
use ep_shared::AppConfig;
use tokio::io::BufReader;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config =
        AppConfig::load(args.config.as_deref()).context("failed to load configuration")?;
    args.apply(&mut config);
    config.validate()?;

    logging::init(&config.logging)?;

    info!(
        environment = %config.environment,
        base_url = %config.api.base_url,
        language = %config.language,
        "Starting EcoPickup OTP client"
    );

    let api = Arc::new(HttpOtpApi::new(config.api.clone())?);
    let store = Arc::new(FileSessionStore::new(&config.session.path));

    let token = match &args.token {
        Some(raw) => {
            let token = SessionToken::new(raw.as_str())?;
            store
                .save_token(&token)
                .await
                .map_err(anyhow::Error::msg)
                .context("failed to store session token")?;
            token
        }
        None => match store.load_token().await.map_err(anyhow::Error::msg)? {
            Some(token) => token,
            None => bail!("no session found, log in first or pass --token"),
        },
    };

    let mut session = SessionContext::new(token);
    if let Some(email) = &args.email {
        session = session.with_email(email.clone());
    }

    let flow = Arc::new(VerificationFlow::new(
        api,
        store,
        session,
        VerificationFlowConfig::from_app_config(&config),
    ));
    let timer = CooldownTimer::spawn(flow.clone(), DEFAULT_TICK_INTERVAL);

    let stdin = BufReader::new(tokio::io::stdin());
    let mut stdout = std::io::stdout();
    let end = run_session(flow, stdin, &mut stdout, config.language).await;
    timer.cancel();

    match end? {
        SessionEnd::Verified { .. } | SessionEnd::Quit => Ok(()),
        SessionEnd::InputClosed => bail!("input closed before the code was verified"),
    }
}
