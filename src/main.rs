//! Peppi developer CLI
//!
//! Exercises the core from a terminal:
//! - `translit <lang> <text>` prints the Roman rendering
//! - `compare <answer> <reference>` prints the similarity score
//! - `check <lang> <answer> <native text>` scores an answer against native text
//! - `speak <lang> [gender] <text>` routes a speech request and prints the outcome as JSON

use log::{debug, error, info};
use peppi_core::config::Config;
use peppi_core::speech::{SpeechPipeline, SpeechRequest, VoiceGender};
use peppi_core::{AnswerMatcher, Language, PeppiError, Result, Transliterator};
use std::process;

const USAGE: &str = "\
Usage: peppi [--debug] <command> [args]

Commands:
  translit <lang> <text...>            Transliterate native-script text
  compare <answer> <reference>         Similarity of two Roman spellings
  check <lang> <answer> <native...>    Score a Roman answer against native text
  speak <lang> [gender] <text...>      Request speech (falls back to text-only)";

fn main() {
    // Parse command line arguments
    let args: Vec<String> = std::env::args().skip(1).collect();
    let debug_mode = args.iter().any(|arg| arg == "--debug" || arg == "-d");

    // Initialize logger
    if debug_mode {
        // Debug mode: write to peppi.log file
        use std::fs::OpenOptions;
        match OpenOptions::new()
            .create(true)
            .append(true)
            .open("peppi.log")
        {
            Ok(log_file) => {
                env_logger::Builder::new()
                    .filter_level(log::LevelFilter::Debug)
                    .target(env_logger::Target::Pipe(Box::new(log_file)))
                    .init();
            }
            Err(e) => {
                eprintln!("Warning: Failed to open peppi.log for debug logging: {}", e);
                eprintln!("Continuing without file logging...");
                env_logger::Builder::new()
                    .filter_level(log::LevelFilter::Warn)
                    .init();
            }
        }

        info!(
            "{} version {} starting (debug mode, logging to peppi.log)",
            peppi_core::APP_NAME,
            peppi_core::VERSION
        );
    } else {
        // Normal mode: errors only, unless RUST_LOG says otherwise
        env_logger::Builder::new()
            .filter_level(log::LevelFilter::Error)
            .parse_default_env()
            .init();
    }

    let args: Vec<String> = args
        .into_iter()
        .filter(|arg| arg != "--debug" && arg != "-d")
        .collect();

    if let Err(e) = run(&args) {
        error!("Fatal error: {}", e);
        eprintln!("Error: {}", e);
        if matches!(e, PeppiError::InvalidRequest(_)) {
            eprintln!("{}", USAGE);
        }
        process::exit(1);
    }
}

fn run(args: &[String]) -> Result<()> {
    let config = Config::load()?;
    debug!("Configuration loaded from {:?}", config.path());

    let (command, rest) = args
        .split_first()
        .ok_or_else(|| PeppiError::InvalidRequest("missing command".to_string()))?;

    match command.as_str() {
        "translit" => {
            let (language, text) = language_and_text(rest)?;
            let roman = Transliterator::from_config(&config).transliterate(&text, language)?;
            println!("{}", roman);
        }
        "compare" => {
            let [answer, reference] = rest else {
                return Err(PeppiError::InvalidRequest(
                    "compare takes exactly two arguments".to_string(),
                ));
            };
            let matcher = AnswerMatcher::from_config(&config);
            let score = peppi_core::similarity(answer, reference);
            println!(
                "{:.3} ({})",
                score,
                if matcher.is_match(answer, reference) { "match" } else { "no match" }
            );
        }
        "check" => {
            let (language, rest) = language_and_rest(rest)?;
            let (answer, native) = rest.split_first().ok_or_else(|| {
                PeppiError::InvalidRequest("check needs an answer and native text".to_string())
            })?;
            let native = rest_text(native)?;
            let matcher = AnswerMatcher::from_config(&config);
            let score = matcher.score_against_native(answer, &native, language)?;
            println!(
                "{:.3} ({})",
                score,
                if score >= matcher.threshold() { "accepted" } else { "rejected" }
            );
        }
        "speak" => {
            let (language, rest) = language_and_rest(rest)?;
            let (gender, text) = gender_and_text(rest, config.default_gender())?;
            let request = SpeechRequest::new(text, language, gender)?;
            let pipeline = SpeechPipeline::from_config(&config)?;

            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()?;
            let outcome = runtime.block_on(pipeline.speak(&request))?;

            let json = serde_json::to_string_pretty(&outcome)
                .map_err(|e| PeppiError::Config(format!("Failed to encode outcome: {}", e)))?;
            println!("{}", json);
        }
        other => {
            return Err(PeppiError::InvalidRequest(format!(
                "unknown command '{}'",
                other
            )))
        }
    }

    Ok(())
}

fn language_and_rest(args: &[String]) -> Result<(Language, &[String])> {
    let (code, rest) = args
        .split_first()
        .ok_or_else(|| PeppiError::InvalidRequest("missing language".to_string()))?;
    Ok((code.parse()?, rest))
}

fn language_and_text(args: &[String]) -> Result<(Language, String)> {
    let (language, rest) = language_and_rest(args)?;
    Ok((language, rest_text(rest)?))
}

fn rest_text(args: &[String]) -> Result<String> {
    if args.is_empty() {
        return Err(PeppiError::InvalidRequest("missing text".to_string()));
    }
    Ok(args.join(" "))
}

/// Optional leading gender, otherwise `default` (the `[speech] default_gender`)
fn gender_and_text(args: &[String], default: VoiceGender) -> Result<(VoiceGender, String)> {
    if let Some((first, rest)) = args.split_first() {
        if let (Ok(gender), false) = (first.parse::<VoiceGender>(), rest.is_empty()) {
            return Ok((gender, rest_text(rest)?));
        }
    }
    debug!("No voice gender given, using {}", default);
    Ok((default, rest_text(args)?))
}
