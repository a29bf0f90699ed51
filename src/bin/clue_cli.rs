use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

use clue_session::config::{ClientConfig, DEFAULT_AI_TURN_DELAY, DEFAULT_BASE_URL};
use clue_session::domain::GameConstants;
use clue_session::session::{AutoplayScheduler, SessionClient, SessionError};
use clue_session::ui::{held_message, parse_character_choice, parse_command, Command, Screen, HELP};

const LOG_TARGET: &str = "bin::clue_cli";

#[derive(Debug, Parser)]
#[command(name = "clue_cli")]
#[command(about = "Play Clue against AI players from the terminal", long_about = None)]
struct Args {
    /// Base URL of the game backend
    #[arg(long, env = "CLUE_API_URL", default_value = DEFAULT_BASE_URL)]
    api_url: String,

    /// Pause before each AI turn, in milliseconds
    #[arg(long, env = "CLUE_AI_DELAY_MS", default_value_t = DEFAULT_AI_TURN_DELAY.as_millis() as u64)]
    ai_delay_ms: u64,

    /// Character to play; chosen interactively when omitted
    #[arg(long, env = "CLUE_CHARACTER")]
    character: Option<String>,

    /// Toggle structured (JSON) logs
    #[arg(long, env = "CLUE_LOG_JSON", default_value_t = false)]
    json: bool,
}

type InputLines = Lines<BufReader<Stdin>>;

#[tokio::main]
async fn main() -> Result<()> {
    load_dotenv();
    let args = Args::parse();
    init_tracing(args.json)?;

    let config = ClientConfig::parse(&args.api_url)
        .context("invalid CLUE_API_URL")?
        .with_ai_turn_delay(Duration::from_millis(args.ai_delay_ms));
    info!(
        target: LOG_TARGET,
        api_url = %config.base_url,
        ai_delay_ms = args.ai_delay_ms,
        "starting clue client"
    );

    let session = Arc::new(SessionClient::new(Arc::new(config.http_backend())));
    let constants = session
        .constants()
        .await
        .context("failed to load game constants; is the backend running?")?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let character = choose_character(args.character.as_deref(), &constants, &mut lines).await?;
    session
        .start(&character)
        .await
        .with_context(|| format!("failed to start a game as {character}"))?;

    let scheduler = AutoplayScheduler::spawn(Arc::clone(&session), config.ai_turn_delay);
    let result = play(&session, &constants, &mut lines).await;
    scheduler.shutdown().await;
    result
}

fn load_dotenv() {
    let manifest_env_path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join(".env");
    dotenv::from_filename(manifest_env_path).ok();
    dotenv::dotenv().ok();
}

fn init_tracing(json: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = fmt::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr);

    if json {
        builder.json().flatten_event(true).init();
    } else {
        builder.compact().init();
    }

    Ok(())
}

async fn choose_character(
    requested: Option<&str>,
    constants: &GameConstants,
    lines: &mut InputLines,
) -> Result<String> {
    let suspects = constants.suspects.as_slice();
    if suspects.is_empty() {
        return Err(anyhow!("backend offered no characters"));
    }
    if let Some(requested) = requested {
        return parse_character_choice(requested, suspects)
            .map(str::to_string)
            .ok_or_else(|| anyhow!("unknown character {requested:?}"));
    }

    println!("\n🕵 CHOOSE YOUR CHARACTER");
    println!("{}", "-".repeat(40));
    for (i, suspect) in suspects.iter().enumerate() {
        println!("  {}. {}", i + 1, suspect);
    }
    loop {
        prompt(&format!("Your choice (1-{}): ", suspects.len()))?;
        let Some(line) = lines.next_line().await? else {
            return Err(anyhow!("input closed before a character was chosen"));
        };
        match parse_character_choice(&line, suspects) {
            Some(choice) => {
                println!("✅ You are {choice}");
                return Ok(choice.to_string());
            }
            None => println!("❌ Pick a number from the list or type a name."),
        }
    }
}

async fn play(
    session: &SessionClient,
    constants: &GameConstants,
    lines: &mut InputLines,
) -> Result<()> {
    let mut snapshots = session.subscribe();
    snapshots.borrow_and_update();
    draw(session, constants)?;

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    info!(target: LOG_TARGET, "input closed");
                    return Ok(());
                };
                let command = match parse_command(&line, constants) {
                    Ok(command) => command,
                    Err(err) => {
                        println!("❌ {err}");
                        prompt("> ")?;
                        continue;
                    }
                };
                match command {
                    Command::Quit => return Ok(()),
                    Command::Help => println!("{HELP}"),
                    command => match execute(session, command).await {
                        Ok(Some(message)) => println!("{message}"),
                        Ok(None) => {}
                        Err(err) => println!("❌ {err}"),
                    },
                }
                snapshots.borrow_and_update();
                draw(session, constants)?;
            }
            changed = snapshots.changed() => {
                if changed.is_err() {
                    warn!(target: LOG_TARGET, "session closed");
                    return Ok(());
                }
                snapshots.borrow_and_update();
                draw(session, constants)?;
            }
        }
    }
}

async fn execute(session: &SessionClient, command: Command) -> Result<Option<String>, SessionError> {
    let message = match command {
        Command::Roll => {
            let outcome = session.roll().await?;
            Some(format!("🎲 You rolled {}", outcome.roll))
        }
        Command::Move(room) => {
            session.move_to(&room).await?;
            None
        }
        Command::Suspect { suspect, weapon } => {
            let held = session.propose_suspicion(&suspect, &weapon).await?;
            Some(held_message(&held))
        }
        Command::Accuse {
            suspect,
            weapon,
            room,
        } => {
            let outcome = session.accuse(&suspect, &weapon, &room).await?;
            Some(if outcome.correct {
                "🎉 Your accusation is correct!".to_string()
            } else {
                "💀 Wrong accusation. You are out of the game.".to_string()
            })
        }
        Command::Pass => {
            session.pass_turn().await?;
            None
        }
        Command::Ack => {
            session.acknowledge_suspicion().await?;
            None
        }
        Command::Refresh => {
            session.refresh().await?;
            None
        }
        Command::Help | Command::Quit => None,
    };
    Ok(message)
}

fn draw(session: &SessionClient, constants: &GameConstants) -> Result<()> {
    let Some(state) = session.state() else {
        return Ok(());
    };
    let human_character = session.human_character();
    let held = session.held_suspicion();
    let enabled = session.enabled_actions();
    let screen = Screen {
        state: &state,
        constants: Some(constants),
        human_character: human_character.as_deref(),
        last_roll: session.last_roll(),
        held: held.as_ref(),
        enabled: &enabled,
    };
    print!("{}", screen.render());
    prompt("> ")
}

fn prompt(text: &str) -> Result<()> {
    print!("{text}");
    io::stdout().flush()?;
    Ok(())
}
