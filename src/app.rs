//! Interactive terminal front-end.
//!
//! Reads lines from stdin on the main thread and turns them into orchestrator
//! [`Command`]s; a background thread prints [`OrchestratorEvent`]s as they
//! arrive.  A plain line sets the input text and translates it; everything
//! else is a `:command`.

use std::io::{BufRead, Write};

use tokio::sync::mpsc;

use crate::lang;
use crate::orchestrator::{Command, NoticeLevel, OrchestratorEvent, SharedState};
use crate::session::AuthService;

// ---------------------------------------------------------------------------
// Line parsing
// ---------------------------------------------------------------------------

/// One parsed input line.
#[derive(Debug, Clone, PartialEq)]
pub enum Input {
    /// Forward to the orchestrator.
    Commands(Vec<Command>),
    Login { email: String, password: String },
    Signup { name: String, email: String, password: String },
    Logout,
    WhoAmI,
    Status,
    Langs,
    Help,
    Quit,
    Empty,
    Unknown(String),
}

/// Parse a single line of user input.
pub fn parse(line: &str) -> Input {
    let line = line.trim();
    if line.is_empty() {
        return Input::Empty;
    }

    // Plain text: set it as the input and translate.
    if !line.starts_with(':') {
        return Input::Commands(vec![
            Command::SetInput(line.to_string()),
            Command::Translate,
        ]);
    }

    let mut parts = line.split_whitespace();
    let head = parts.next().unwrap_or("");
    let args: Vec<&str> = parts.collect();

    match (head, args.as_slice()) {
        (":listen", []) => Input::Commands(vec![Command::StartListening]),
        (":stop", []) => Input::Commands(vec![Command::StopListening]),
        (":translate", []) => Input::Commands(vec![Command::Translate]),
        (":src", [code]) => Input::Commands(vec![Command::SetSourceLanguage(code.to_string())]),
        (":tgt", [code]) => Input::Commands(vec![Command::SetTargetLanguage(code.to_string())]),
        (":swap", []) => Input::Commands(vec![Command::SwapLanguages]),
        (":clear", []) => Input::Commands(vec![Command::Clear]),
        (":speak", []) => Input::Commands(vec![Command::SpeakTranslation]),
        (":speak", ["in"]) => Input::Commands(vec![Command::SpeakInput]),
        (":login", [email, password]) => Input::Login {
            email: email.to_string(),
            password: password.to_string(),
        },
        (":signup", [name, email, password]) => Input::Signup {
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        },
        (":logout", []) => Input::Logout,
        (":whoami", []) => Input::WhoAmI,
        (":status", []) => Input::Status,
        (":langs", []) => Input::Langs,
        (":help", []) => Input::Help,
        (":quit" | ":q" | ":exit", []) => Input::Quit,
        _ => Input::Unknown(line.to_string()),
    }
}

const HELP: &str = "\
Type text to translate it, or use a command:
  :listen              start speech capture
  :stop                stop speech capture
  :src <code>          set source language (e.g. en-US)
  :tgt <code>          set target language (e.g. es-ES)
  :swap                swap source and target languages
  :translate           re-translate the current input
  :clear               clear input and translation
  :speak               read the translation aloud
  :speak in            read the input aloud
  :langs               list supported languages
  :status              show session state
  :login <email> <pw>  sign in
  :signup <name> <email> <pw>
  :logout              sign out
  :whoami              show the signed-in user
  :quit                exit";

// ---------------------------------------------------------------------------
// Front-end loop
// ---------------------------------------------------------------------------

/// Everything the front-end needs from `main`.
pub struct AppContext {
    pub commands: mpsc::Sender<Command>,
    pub state: SharedState,
    pub auth: AuthService,
}

/// Run the front-end until `:quit` or EOF.  Blocks the calling thread.
pub fn run(ctx: AppContext, events: mpsc::Receiver<OrchestratorEvent>) -> anyhow::Result<()> {
    spawn_event_printer(events)?;

    {
        let st = ctx.state.lock().unwrap();
        println!(
            "Voice Translator — {} → {}  (:help for commands)",
            lang::display_name(&st.source_language),
            lang::display_name(&st.target_language)
        );
    }

    let stdin = std::io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next() else { break };
        let line = line?;

        match parse(&line) {
            Input::Empty => {}

            Input::Commands(cmds) => {
                for cmd in cmds {
                    if ctx.commands.blocking_send(cmd).is_err() {
                        return Ok(()); // orchestrator is gone
                    }
                }
            }

            Input::Login { email, password } => match ctx.auth.login(&email, &password) {
                Ok(user) => println!("Signed in as {}", user.email),
                Err(e) => println!("✖ {e}"),
            },

            Input::Signup { name, email, password } => {
                match ctx.auth.signup(&name, &email, &password) {
                    Ok(user) => println!("Welcome, {}", user.name.as_deref().unwrap_or(&user.email)),
                    Err(e) => println!("✖ {e}"),
                }
            }

            Input::Logout => match ctx.auth.logout() {
                Ok(()) => println!("Logged out"),
                Err(e) => println!("✖ {e}"),
            },

            Input::WhoAmI => match ctx.auth.current_user() {
                Some(user) => println!("{}", user.email),
                None => println!("Not signed in"),
            },

            Input::Status => print_status(&ctx.state),

            Input::Langs => {
                for l in lang::LANGUAGES {
                    println!("  {}  {}", l.code, l.name);
                }
            }

            Input::Help => println!("{HELP}"),

            Input::Unknown(line) => println!("Unknown command: {line}  (:help for commands)"),

            Input::Quit => break,
        }
    }

    Ok(())
}

fn print_status(state: &SharedState) {
    let st = state.lock().unwrap();
    println!("  phase:      {}", st.phase().label());
    println!(
        "  languages:  {} → {}",
        lang::display_name(&st.source_language),
        lang::display_name(&st.target_language)
    );
    println!("  input:      {}", st.input_text);
    println!("  translated: {}", st.translated_text);
}

/// Print orchestrator events from a background thread so results appear as
/// they arrive, not only on the next prompt.
fn spawn_event_printer(
    mut events: mpsc::Receiver<OrchestratorEvent>,
) -> anyhow::Result<std::thread::JoinHandle<()>> {
    let handle = std::thread::Builder::new()
        .name("event-printer".into())
        .spawn(move || {
            while let Some(ev) = events.blocking_recv() {
                match ev {
                    OrchestratorEvent::ListeningChanged(true) => println!("🎤 listening…"),
                    OrchestratorEvent::ListeningChanged(false) => println!("🎤 stopped"),
                    OrchestratorEvent::TranslationStarted => {}
                    OrchestratorEvent::TranslationComplete { translated_text } => {
                        println!("→ {translated_text}");
                    }
                    OrchestratorEvent::Notice(n) => match n.level {
                        NoticeLevel::Warning => println!("⚠ {}", n.message),
                        NoticeLevel::Error => println!("✖ {}", n.message),
                    },
                }
            }
        })?;
    Ok(handle)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
