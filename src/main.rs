//! Flight Chat - terminal client for a conversational flight booking backend
//!
//! Sends each typed line to the booking backend, classifies the assistant's
//! reply and renders it with quick replies for the next step.

mod chat;
mod config;
mod reply;
mod terminal;
mod transport;

use chat::{ChatController, ChatError, Role, SendOutcome};
use config::{ClientConfig, LogFormat};
use std::future::Future;
use std::io::{IsTerminal, Write};
use std::sync::Arc;
use terminal::{parse_input, ShellInput, TerminalRenderer, HELP};
use tokio::io::{AsyncBufReadExt, BufReader};
use transport::{HttpTransport, LoggingTransport, Transport};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = ClientConfig::from_env()?;
    init_logging(config.log_format);

    tracing::info!(
        api_url = %config.api_url,
        timeout_secs = config.timeout.as_secs(),
        "Starting flight chat client"
    );

    let http = Arc::new(HttpTransport::new(&config)?);
    let controller = ChatController::new(LoggingTransport::new(http.clone()));
    let session = controller.start_session();
    tracing::info!(session_id = %session.id(), "Session ready");

    let shell = Shell {
        controller,
        http,
        renderer: TerminalRenderer::new(std::io::stdout().is_terminal()),
        shown: 0,
    };
    println!("{}", shell.renderer.session_started(&session));
    shell.run().await?;

    Ok(())
}

/// Await a send; Ctrl-C closes the controller so the reply is discarded
async fn interruptible<T: Transport>(
    controller: &ChatController<T>,
    send: impl Future<Output = Result<SendOutcome, ChatError>>,
) -> Result<SendOutcome, ChatError> {
    tokio::pin!(send);
    tokio::select! {
        outcome = &mut send => outcome,
        _ = tokio::signal::ctrl_c() => {
            controller.close();
            send.await
        }
    }
}

fn init_logging(format: LogFormat) {
    let registry = tracing_subscriber::registry().with(
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "flight_chat=info".into()),
    );

    match format {
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_current_span(false)
                    .with_span_list(false)
                    .with_writer(std::io::stderr),
            )
            .init(),
        LogFormat::Text => registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init(),
    }
}

struct Shell {
    controller: ChatController<LoggingTransport>,
    http: Arc<HttpTransport>,
    renderer: TerminalRenderer,
    /// Highest sequence id already printed
    shown: u64,
}

impl Shell {
    async fn run(mut self) -> std::io::Result<()> {
        println!("{}", self.renderer.notice("Type /help for commands."));
        self.print_new_messages();

        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        loop {
            self.prompt()?;

            let line = tokio::select! {
                line = lines.next_line() => line?,
                _ = tokio::signal::ctrl_c() => None,
            };
            let Some(line) = line else {
                break;
            };

            match parse_input(&line) {
                ShellInput::Message(text) => {
                    let outcome =
                        interruptible(&self.controller, self.controller.send(&text)).await;
                    if !self.show_outcome(outcome) {
                        break;
                    }
                }
                ShellInput::QuickReply(n) => {
                    let actions = self.controller.latest_actions();
                    let Some(action) = actions.get(n - 1) else {
                        println!(
                            "{}",
                            self.renderer.notice(&format!("No quick reply {n} right now."))
                        );
                        continue;
                    };
                    println!("{} {}", self.renderer.notice(">"), action.label);
                    let outcome =
                        interruptible(&self.controller, self.controller.invoke(action)).await;
                    if !self.show_outcome(outcome) {
                        break;
                    }
                }
                ShellInput::State => self.show_booking_state().await,
                ShellInput::Transcript => self.dump_transcript(),
                ShellInput::Help => println!("{HELP}"),
                ShellInput::Quit => break,
                ShellInput::Unknown(command) => println!(
                    "{}",
                    self.renderer
                        .notice(&format!("Unknown command {command}, try /help."))
                ),
            }
        }

        self.controller.close();
        tracing::info!("Client closed");
        Ok(())
    }

    fn prompt(&self) -> std::io::Result<()> {
        let mut stdout = std::io::stdout();
        write!(stdout, "{}\n> ", self.renderer.notice(self.controller.hint()))?;
        stdout.flush()
    }

    /// Print what a send added to the log. Returns false once the user
    /// interrupted and the client is shutting down.
    fn show_outcome(&mut self, outcome: Result<SendOutcome, ChatError>) -> bool {
        match outcome {
            Ok(SendOutcome::Ignored) => {}
            Ok(SendOutcome::Discarded) => return false,
            Ok(SendOutcome::Completed { booking, .. }) => {
                self.print_new_messages();
                if let Some(booking) = booking {
                    println!("{}", self.renderer.booking_created(&booking));
                }
            }
            Ok(SendOutcome::Failed { .. }) => self.print_new_messages(),
            Err(e @ ChatError::SessionNotInitialized) => {
                println!("{}", self.renderer.notice(&e.to_string()));
            }
        }
        true
    }

    /// Print assistant entries appended since the last call. User input is
    /// already on screen.
    fn print_new_messages(&mut self) {
        let shown = self.shown;
        let (rendered, last_seen) = self.controller.with_log(|log| {
            let rendered: Vec<String> = log
                .all()
                .filter(|m| m.sequence_id > shown && m.role == Role::Assistant)
                .map(|m| self.renderer.message(m))
                .collect();
            (rendered, log.last().map_or(shown, |m| m.sequence_id))
        });
        for text in rendered {
            println!("{text}");
        }
        self.shown = last_seen;
    }

    async fn show_booking_state(&self) {
        let session_id = match self.controller.session_id() {
            Ok(id) => id,
            Err(e) => {
                println!("{}", self.renderer.notice(&e.to_string()));
                return;
            }
        };

        match self.http.booking_state(&session_id).await {
            Ok(state) => println!("{}", self.renderer.booking_state(&state)),
            Err(e) => {
                tracing::warn!(
                    session_id = %session_id,
                    kind = e.kind.label(),
                    error = %e,
                    "Booking state lookup failed"
                );
                println!(
                    "{}",
                    self.renderer
                        .notice("Could not fetch booking state, please try again later.")
                );
            }
        }
    }

    fn dump_transcript(&self) {
        let (total, pending, empty) = self
            .controller
            .with_log(|log| (log.len(), log.pending_count(), log.is_empty()));
        if empty {
            println!("{}", self.renderer.notice("Nothing to show yet."));
            return;
        }

        tracing::debug!(messages = total, pending, "Dumping transcript");
        match serde_json::to_string_pretty(&self.controller.messages()) {
            Ok(json) => println!("{json}"),
            Err(e) => tracing::error!(error = %e, "Failed to serialize transcript"),
        }
    }
}
