use clap::{Parser, Subcommand};
use std::error::Error;
use std::io::BufRead;
use std::path::{Path, PathBuf};
use std::sync::mpsc;

use signbridge::annotation::rule_tagger::RuleTagger;
use signbridge::config::{self, Config};
use signbridge::conversation::{start_translation_worker, SpeechEvent};
use signbridge::engine::gloss::translate;
use signbridge::lexicon::SignLexicon;
use signbridge::progress::{MasteryLevel, ProgressTracker};

#[derive(Parser, Debug)]
#[command(name = "signbridge", about = "English to SASL gloss translation toolkit")]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(long, default_value = "config.toml")]
    config: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Translate one English sentence to a SASL gloss.
    Translate {
        sentence: String,
        /// Emit the result as JSON instead of plain text.
        #[arg(long)]
        json: bool,
    },
    /// Resolve a gloss token to a local sign video path.
    Lookup { gloss: String },
    /// Show per-category learning progress and pending feedback.
    Progress,
    /// Queue feedback about a sign for later upload.
    Feedback {
        sign: String,
        province: String,
        description: String,
    },
    /// Record practice of a sign at a mastery level (new/learning/mastered).
    Practice {
        sign: String,
        category: String,
        level: String,
    },
    /// Read sentences from stdin and stream gloss updates, one per line.
    Interactive,
}

fn print_result(sentence: &str, json: bool) -> Result<(), Box<dyn Error>> {
    let tagger = RuleTagger::new();
    let result = translate(sentence, &tagger)?;
    if json {
        println!("{}", serde_json::to_string(&result)?);
    } else {
        println!("Gloss: {}", result.gloss.join(" "));
        println!("Face:  {}", result.facial_marker);
    }
    Ok(())
}

fn run_lookup(config: &Config, gloss: &str) -> Result<(), Box<dyn Error>> {
    let lexicon = SignLexicon::load(Path::new(&config.lexicon_file))?;
    let asset_root = PathBuf::from(&config.asset_dir);
    match lexicon.resolve(gloss, &asset_root) {
        Some(path) => println!("{}", path.display()),
        None if lexicon.contains(gloss) => {
            println!("Sign '{}' is known but its video is not available locally.", gloss.to_uppercase());
        }
        None => println!("Sign '{}' is not in the dictionary.", gloss.to_uppercase()),
    }
    Ok(())
}

fn run_progress(config: &Config) -> Result<(), Box<dyn Error>> {
    let tracker = ProgressTracker::load_or_default(Path::new(&config.profile_file))?;
    let counts = tracker.progress_by_category();
    if counts.is_empty() {
        println!("No signs practiced yet.");
    } else {
        for (category, count) in counts {
            println!("{}: {} sign(s) in progress or mastered", category, count);
        }
    }
    let pending = tracker.unsynced_feedback().len();
    if pending > 0 {
        println!("{} feedback entr(ies) waiting to sync.", pending);
    }
    Ok(())
}

fn parse_level(level: &str) -> Result<MasteryLevel, String> {
    match level.to_lowercase().as_str() {
        "new" => Ok(MasteryLevel::New),
        "learning" => Ok(MasteryLevel::Learning),
        "mastered" => Ok(MasteryLevel::Mastered),
        other => Err(format!(
            "unknown mastery level '{}', expected new/learning/mastered",
            other
        )),
    }
}

fn run_interactive() -> Result<(), Box<dyn Error>> {
    let (speech_tx, speech_rx) = mpsc::channel();
    let (update_tx, update_rx) = mpsc::channel();
    let worker = start_translation_worker(RuleTagger::new(), speech_rx, update_tx);

    println!("Reading sentences from stdin (Ctrl-D to stop)...");
    let stdin = std::io::stdin();
    for line in stdin.lock().lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        speech_tx.send(SpeechEvent::Recognized(line))?;
        // The rule tagger never rejects an utterance, so every send yields
        // exactly one update.
        let update = update_rx.recv()?;
        println!(
            "{} [{}]",
            update.result.gloss.join(" "),
            update.result.facial_marker
        );
    }

    speech_tx.send(SpeechEvent::Stop)?;
    worker.join().map_err(|_| "translation worker panicked")?;
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::Translate { sentence, json } => print_result(&sentence, json)?,
        Command::Interactive => run_interactive()?,
        Command::Lookup { gloss } => {
            let config = config::load_config_from_file(&cli.config)?;
            run_lookup(&config, &gloss)?;
        }
        Command::Progress => {
            let config = config::load_config_from_file(&cli.config)?;
            run_progress(&config)?;
        }
        Command::Feedback {
            sign,
            province,
            description,
        } => {
            let config = config::load_config_from_file(&cli.config)?;
            let profile_path = PathBuf::from(&config.profile_file);
            let mut tracker = ProgressTracker::load_or_default(&profile_path)?;
            tracker.queue_feedback(&sign, &province, &description);
            tracker.save_snapshot(&profile_path)?;
            println!("Feedback for '{}' queued.", sign.to_uppercase());
        }
        Command::Practice {
            sign,
            category,
            level,
        } => {
            let config = config::load_config_from_file(&cli.config)?;
            let profile_path = PathBuf::from(&config.profile_file);
            let mut tracker = ProgressTracker::load_or_default(&profile_path)?;
            tracker.update_mastery(&sign, &category, parse_level(&level)?);
            tracker.save_snapshot(&profile_path)?;
            println!("Recorded '{}' at level {}.", sign.to_uppercase(), level.to_lowercase());
        }
    }

    Ok(())
}
