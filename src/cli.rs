//! Terminal front-end — drives a form session from stdin/stdout.

use tokio::io::{AsyncBufReadExt, BufReader};

use crate::error::Result;
use crate::form::fields::{FieldKind, fields_for_step};
use crate::form::{FieldName, FormSession, SubmitOutcome};
use crate::notify::{LiveRegion, ToastKind, ToastRack};

/// One line of user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `key=value`; the value is raw input for that field.
    Set { key: String, value: String },
    Next,
    Back,
    Submit,
    Show,
    Help,
    Quit,
    /// Blank line: next step, or submit on the last one.
    Continue,
    Unknown(String),
}

impl Command {
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        if let Some((key, value)) = line.split_once('=') {
            return Self::Set {
                key: key.trim().to_string(),
                value: value.trim().to_string(),
            };
        }
        match line {
            "" => Self::Continue,
            "next" | "n" => Self::Next,
            "back" | "b" => Self::Back,
            "submit" => Self::Submit,
            "show" | "s" => Self::Show,
            "help" | "?" => Self::Help,
            "/quit" | "quit" | "exit" => Self::Quit,
            other => Self::Unknown(other.to_string()),
        }
    }
}

/// Stdin/stdout REPL over one session. Announcements and toasts are read
/// back from the live region and toast rack after every command.
pub struct CliFrontend {
    session: FormSession,
    live_region: LiveRegion,
    toasts: ToastRack,
}

impl CliFrontend {
    pub fn new(session: FormSession, live_region: LiveRegion, toasts: ToastRack) -> Self {
        Self {
            session,
            live_region,
            toasts,
        }
    }

    pub fn session(&self) -> &FormSession {
        &self.session
    }

    /// Read commands until EOF, `quit`, or a successful submission.
    pub async fn run(mut self) -> Result<FormSession> {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();

        self.print_step();
        eprint!("> ");

        while let Some(line) = lines.next_line().await? {
            let done = self.handle(Command::parse(&line)).await;
            self.flush_notices();
            if done {
                break;
            }
            eprint!("> ");
        }
        Ok(self.session)
    }

    /// Apply one command. Returns true when the loop should stop.
    pub async fn handle(&mut self, command: Command) -> bool {
        match command {
            Command::Set { key, value } => {
                if let Err(e) = self.session.set_input(&key, &value).await {
                    eprintln!("❌ {e}");
                } else if key == FieldName::BusinessDetails.key() {
                    eprintln!("   {}", self.session.word_count_hint().label);
                }
            }
            Command::Next => self.next(),
            Command::Back => {
                if self.session.retreat() {
                    self.print_step();
                }
            }
            Command::Submit => return self.submit().await,
            Command::Continue => {
                if self.session.current_step().is_last() {
                    return self.submit().await;
                }
                self.next();
            }
            Command::Show => self.print_step(),
            Command::Help => print_help(),
            Command::Quit => return true,
            Command::Unknown(other) => {
                eprintln!("Unknown command: {other} (type 'help')");
            }
        }
        false
    }

    fn next(&mut self) {
        if self.session.advance() {
            self.print_step();
        } else {
            self.print_errors();
        }
    }

    async fn submit(&mut self) -> bool {
        if !self.session.view().submit_visible {
            eprintln!("Submit is available on the last step; use 'next' to continue.");
            return false;
        }
        let outcome = self.session.handle_submit().await;
        match outcome {
            SubmitOutcome::Submitted | SubmitOutcome::AlreadySubmitted => {
                println!("\nThanks! We'll be in touch shortly.\n");
                true
            }
            SubmitOutcome::Invalid => {
                self.print_errors();
                false
            }
            SubmitOutcome::Bot => true,
            SubmitOutcome::TooFast | SubmitOutcome::Failed => false,
        }
    }

    fn print_step(&self) {
        let view = self.session.view();
        let step = view.active_step;
        println!(
            "\n── {} ({:.0}%) ──",
            view.step_label(),
            view.progress_percent
        );
        let values = self.session.values();
        for spec in fields_for_step(step) {
            let marker = if spec.required { "*" } else { " " };
            let current = match spec.kind {
                FieldKind::Text => values.text(spec.name).to_string(),
                FieldKind::SingleChoice(_) => values.choice(spec.name).unwrap_or_default().to_string(),
                FieldKind::MultiChoice(_) => values.selected(spec.name).join(","),
            };
            let options = spec.kind.options();
            if options.is_empty() {
                println!("{marker} {:<18} {current}", spec.name.key());
            } else {
                println!(
                    "{marker} {:<18} {current}  [{}: {}]",
                    spec.name.key(),
                    spec.kind.label(),
                    options.join("|")
                );
            }
        }
        let controls = [
            (view.back_visible, "back"),
            (view.next_visible, "next"),
            (view.submit_visible, "submit"),
        ];
        let shown: Vec<&str> = controls
            .iter()
            .filter(|(visible, _)| *visible)
            .map(|(_, name)| *name)
            .collect();
        println!("  ({})", shown.join(" · "));
    }

    fn print_errors(&self) {
        for (field, message) in &self.session.view().errors {
            eprintln!("   {field}: {message}");
        }
    }

    fn flush_notices(&self) {
        let announced = self.live_region.text();
        if !announced.is_empty() {
            eprintln!("ℹ️  {announced}");
        }
        for toast in self.toasts.active() {
            let icon = match toast.kind {
                ToastKind::Error => "⚠️ ",
                ToastKind::Success => "✅",
            };
            eprintln!("{icon} {}", toast.message);
            self.toasts.dismiss(toast.id);
        }
    }
}

fn print_help() {
    eprintln!("  field=value    set a field (comma-separate multiple choices)");
    eprintln!("  next | back    move between steps (blank line = next)");
    eprintln!("  submit         send the form from the last step");
    eprintln!("  show           reprint the current step");
    eprintln!("  quit           leave; your answers are kept as a draft");
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use super::*;
    use crate::config::FormConfig;
    use crate::form::SessionDeps;
    use crate::notify::DataLayer;
    use crate::store::MemoryDraftStore;
    use crate::submit::GoogleFormsClient;

    async fn frontend() -> (CliFrontend, Arc<DataLayer>) {
        let analytics = Arc::new(DataLayer::new());
        let live_region = LiveRegion::new();
        let toasts = ToastRack::new();
        let config = FormConfig {
            endpoint: "http://127.0.0.1:9/formResponse".into(),
            min_dwell: Duration::ZERO,
            ..FormConfig::default()
        };
        let deps = SessionDeps {
            store: Arc::new(MemoryDraftStore::new()),
            ingest: Arc::new(GoogleFormsClient::new(config.endpoint.clone())),
            analytics: analytics.clone(),
            announcer: Arc::new(live_region.clone()),
            notifier: Arc::new(toasts.clone()),
        };
        let session = FormSession::mount(deps, &config).await;
        (CliFrontend::new(session, live_region, toasts), analytics)
    }

    #[tokio::test]
    async fn submit_is_ignored_before_last_step() {
        let (mut cli, analytics) = frontend().await;
        assert!(!cli.handle(Command::Submit).await);

        assert!(cli.session().view().errors.is_empty());
        assert!(analytics.named("form_validation_error").is_empty());
        assert!(cli.toasts.active().is_empty());
        assert_eq!(cli.session().current_step().number(), 1);
    }

    #[test]
    fn parses_assignments() {
        assert_eq!(
            Command::parse(" sales_channels = online,in_store "),
            Command::Set {
                key: "sales_channels".into(),
                value: "online,in_store".into(),
            }
        );
        // Only the first '=' splits.
        assert_eq!(
            Command::parse("website=https://x.test/?a=b"),
            Command::Set {
                key: "website".into(),
                value: "https://x.test/?a=b".into(),
            }
        );
    }

    #[test]
    fn parses_keywords() {
        assert_eq!(Command::parse(""), Command::Continue);
        assert_eq!(Command::parse("next"), Command::Next);
        assert_eq!(Command::parse("b"), Command::Back);
        assert_eq!(Command::parse("submit"), Command::Submit);
        assert_eq!(Command::parse("/quit"), Command::Quit);
        assert_eq!(Command::parse("dance"), Command::Unknown("dance".into()));
    }
}
