//! Interactive loop driving one verification flow

use std::io::Write;
use std::sync::Arc;

use chrono::Utc;
use ep_core::{
    FlowOutcome, FlowPhase, FlowSnapshot, OtpApiTrait, OtpError, SessionStoreTrait, ThrottleState,
    VerificationFlow,
};
use ep_shared::Language;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{debug, info};

use crate::commands::{Command, HELP};

/// How an interactive session ended
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEnd {
    Verified {
        message: Option<String>,
        profile: Option<serde_json::Value>,
    },
    Quit,
    /// Input reached end of file before the code was verified
    InputClosed,
}

/// Start `flow` and process commands from `input` until it ends
///
/// The flow is torn down on every exit path except success.
pub async fn run_session<A, S, R, W>(
    flow: Arc<VerificationFlow<A, S>>,
    input: R,
    out: &mut W,
    language: Language,
) -> anyhow::Result<SessionEnd>
where
    A: OtpApiTrait,
    S: SessionStoreTrait,
    R: AsyncBufRead + Unpin,
    W: Write,
{
    match flow.start().await {
        Ok(dispatch) => writeln!(out, "{}", dispatch.message)?,
        Err(e) => writeln!(out, "! {}", e.user_message(language))?,
    }
    if let Some(email) = flow.session().email() {
        writeln!(out, "Code sent to {}", email)?;
    }
    writeln!(out, "{}", render_status(&flow.snapshot()))?;

    let mut lines = input.lines();
    let end = loop {
        write!(out, "> ")?;
        out.flush()?;

        let Some(line) = lines.next_line().await? else {
            break SessionEnd::InputClosed;
        };
        if line.trim().is_empty() {
            continue;
        }

        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(e) => {
                writeln!(out, "? {}", e)?;
                continue;
            }
        };
        debug!(flow_id = %flow.id(), command = ?command, "Handling command");

        match command {
            Command::Code(code) => {
                for (index, digit) in code.chars().enumerate() {
                    flow.set_digit(index, &digit.to_string());
                }
                writeln!(out, "{}", render_status(&flow.snapshot()))?;
            }
            Command::Digit { index, value } => {
                if !flow.set_digit(index, &value) {
                    writeln!(out, "? slot {} accepts a single digit", index)?;
                }
                writeln!(out, "{}", render_status(&flow.snapshot()))?;
            }
            Command::Backspace { index } => {
                // Key event first, then the text field drops its character
                flow.handle_backspace(index);
                if flow.snapshot().digits[index].is_some() {
                    flow.set_digit(index, "");
                }
                writeln!(out, "{}", render_status(&flow.snapshot()))?;
            }
            Command::Resend => match flow.resend().await {
                Ok(dispatch) => writeln!(out, "{}", dispatch.message)?,
                Err(e) => report(out, &e, language)?,
            },
            Command::Verify => match flow.verify().await {
                Ok(FlowOutcome::Verified { message, profile }) => {
                    if let Some(message) = &message {
                        writeln!(out, "{}", message)?;
                    }
                    if let Some(profile) = &profile {
                        writeln!(out, "{}", serde_json::to_string_pretty(profile)?)?;
                    }
                    break SessionEnd::Verified { message, profile };
                }
                Err(e) => report(out, &e, language)?,
            },
            Command::Status => writeln!(out, "{}", render_status(&flow.snapshot()))?,
            Command::Help => writeln!(out, "{}", HELP)?,
            Command::Quit => break SessionEnd::Quit,
        }
    };

    if !matches!(end, SessionEnd::Verified { .. }) {
        flow.teardown();
    }
    info!(flow_id = %flow.id(), end = ?end, "Verification session ended");
    Ok(end)
}

/// One-line summary of the flow for the prompt
pub fn render_status(snapshot: &FlowSnapshot) -> String {
    let slots: Vec<String> = snapshot
        .digits
        .iter()
        .enumerate()
        .map(|(index, digit)| {
            let shown = digit.unwrap_or('_');
            if index == snapshot.focused_index && snapshot.phase == FlowPhase::Started {
                format!("[{}]", shown)
            } else {
                format!(" {} ", shown)
            }
        })
        .collect();

    let resend = match snapshot.throttle_state {
        _ if snapshot.dispatching => "sending...".to_string(),
        ThrottleState::Exhausted => "no resends left".to_string(),
        ThrottleState::CoolingDown => format!(
            "resend in {}s ({} left)",
            snapshot.cooldown, snapshot.resend_budget
        ),
        ThrottleState::Idle => format!("resend available ({} left)", snapshot.resend_budget),
    };

    let mut line = format!("{} | {}", slots.concat(), resend);
    if let Some(seconds) = snapshot.seconds_until_expiry(Utc::now()) {
        line.push_str(&format!(" | expires in {}m {:02}s", seconds / 60, seconds % 60));
    }
    if snapshot.verify_enabled() {
        line.push_str(" | ready to verify");
    }
    line
}

fn report<W: Write>(out: &mut W, error: &OtpError, language: Language) -> std::io::Result<()> {
    writeln!(out, "! {}", error.user_message(language))
}
