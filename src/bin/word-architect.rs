//! word-architect CLI: play the morpheme game in a terminal.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};

use word_architect::core::{GameConfig, GenerationMode};
use word_architect::morphemes::GameData;
use word_architect::round::Scheduler;
use word_architect::session::{
    format_clock, GameEvent, GameNotice, HighScoreStore, JsonFileHighScore, Session,
    SessionStatus,
};
use word_architect::Verdict;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Variant {
    /// Curated questions, typed answers, 3-minute countdown
    Challenge,
    /// Derived questions, assemble parts then spell
    Construction,
}

#[derive(Parser)]
#[command(name = "word-architect", version, about = "Build words from morphemes")]
struct Cli {
    /// Game data JSON (morphemes and curated questions)
    #[arg(long, default_value = "data/game-data.json")]
    data: PathBuf,

    /// Game variant
    #[arg(long, value_enum, default_value = "challenge")]
    variant: Variant,

    /// TOML config file; overrides the variant preset
    #[arg(long)]
    config: Option<PathBuf>,

    /// Derive questions from root examples instead of curated records
    #[arg(long)]
    derived: bool,

    /// Disable the countdown
    #[arg(long)]
    untimed: bool,

    /// Fixed RNG seed
    #[arg(long)]
    seed: Option<u64>,

    /// High score file
    #[arg(long, default_value = "word-architect-scores.json")]
    scores: PathBuf,
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("word_architect=warn".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn build_config(cli: &Cli) -> Result<GameConfig> {
    let mut config = match &cli.config {
        Some(path) => GameConfig::from_toml_file(path)?,
        None => match cli.variant {
            Variant::Challenge => GameConfig::timed_challenge(),
            Variant::Construction => GameConfig::construction(),
        },
    };
    if cli.derived {
        config = config.with_mode(GenerationMode::Derived);
    }
    if cli.untimed {
        config = config.with_timer(None);
    }
    if let Some(seed) = cli.seed {
        config = config.with_seed(seed);
    }
    Ok(config)
}

fn run(cli: Cli) -> Result<()> {
    let config = build_config(&cli)?;
    let data = GameData::load(&cli.data)
        .with_context(|| format!("could not load the morpheme database {}", cli.data.display()))?;

    let mut session = Session::new(config, data, JsonFileHighScore::new(&cli.scores))?;
    let mut scheduler = Scheduler::new();

    println!("High score: {}", session.high_score());
    print_help();
    render(&session.dispatch(GameEvent::Start, &mut scheduler)?, &session);

    let stdin = io::stdin();
    let mut last = Instant::now();
    prompt()?;
    for line in stdin.lock().lines() {
        let line = line?;
        let elapsed = last.elapsed();
        last = Instant::now();
        render(&session.advance_time(&mut scheduler, millis(elapsed))?, &session);
        if session.status() == SessionStatus::Over {
            break;
        }

        let Some(event) = parse_command(line.trim()) else {
            break;
        };
        let notices = session.dispatch(event, &mut scheduler)?;
        render(&notices, &session);

        // Play out a pending round change so the next question shows up.
        if let Some(delay) = notices.iter().find_map(|n| match n {
            GameNotice::Schedule(t) => Some(t.delay_ms),
            _ => None,
        }) {
            std::thread::sleep(Duration::from_millis(delay));
            last = Instant::now();
            render(&session.advance_time(&mut scheduler, delay)?, &session);
        }
        if session.status() == SessionStatus::Over {
            break;
        }
        prompt()?;
    }

    if session.status() != SessionStatus::Over {
        println!("Final score: {}", session.score());
    }
    Ok(())
}

fn millis(d: Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
}

fn parse_command(input: &str) -> Option<GameEvent> {
    let event = match input {
        ":q" | ":quit" => return None,
        ":h" | ":hint" => GameEvent::RequestHint,
        ":r" | ":reveal" => GameEvent::RevealAnswer,
        ":s" | ":skip" => GameEvent::Skip,
        _ => {
            if let Some(part) = input.strip_prefix('+') {
                GameEvent::AssemblePart(part.trim().to_string())
            } else if let Some(part) = input.strip_prefix('-').filter(|p| p.starts_with(' ')) {
                GameEvent::RemovePart(part.trim().to_string())
            } else {
                GameEvent::SubmitAnswer(input.to_string())
            }
        }
    };
    Some(event)
}

fn print_help() {
    println!("Type the word to answer. Commands:");
    println!("  + <part>   place a bank tile      - <part>   remove a placed tile");
    println!("  :hint      show the root hint     :reveal    show the answer");
    println!("  :skip      new question           :quit      leave");
}

fn prompt() -> io::Result<()> {
    print!("> ");
    io::stdout().flush()
}

fn render<S: HighScoreStore>(notices: &[GameNotice], session: &Session<S>) {
    for notice in notices {
        match notice {
            GameNotice::NewQuestion { definition, .. } => {
                println!();
                println!("\"{definition}\"");
                if let Some(round) = session.snapshot().round {
                    let tiles: Vec<String> = round
                        .bank
                        .iter()
                        .map(|item| match &item.meaning {
                            Some(meaning) => format!("{} ({meaning})", item.morpheme),
                            None => item.morpheme.clone(),
                        })
                        .collect();
                    println!("Bank: {}", tiles.join(" | "));
                }
            }
            GameNotice::Answered {
                verdict: Verdict::Correct,
                points,
                score,
            } => println!("Correct! +{points} points (score {score})"),
            GameNotice::Answered {
                verdict: Verdict::Incorrect,
                ..
            } => println!("Not quite. Try again or use a hint."),
            GameNotice::Hint { text, .. } => println!("Hint: the root word(s) are: {text}"),
            GameNotice::Revealed { answer, breakdown } => {
                println!("The correct answer was: {answer}");
                println!("  {breakdown}");
            }
            GameNotice::Assembly {
                assembled,
                spelling_open,
                gate_changed,
            } => {
                println!("Built: {}", assembled.join(" + "));
                match (*gate_changed, *spelling_open) {
                    (true, true) => println!("Now spell the whole word."),
                    (true, false) => println!("Spelling closed until the parts are back."),
                    _ => {}
                }
            }
            GameNotice::Countdown { remaining } if remaining % 30 == 0 => {
                println!("[{} left]", format_clock(*remaining));
            }
            GameNotice::SessionOver {
                final_score,
                new_high_score,
                ..
            } => {
                println!();
                println!("Time's up! Final score: {final_score}");
                if *new_high_score {
                    println!("New high score!");
                }
            }
            GameNotice::Countdown { .. } | GameNotice::Schedule(_) => {}
        }
    }
}
