//! Command-line interface for singlish-rs
//!
//! Usage:
//!   singlish [OPTIONS] [TEXT]
//!   echo "mama gedhara yanavaa" | singlish

use clap::Parser;
use serde::Serialize;
use singlish_rs::{Config, LiveSession, Token, Transliterator};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;

/// singlish - convert romanized Sinhala to Sinhala script
#[derive(Parser, Debug)]
#[command(name = "singlish")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    singlish \"mama gedhara yanavaa\"
    singlish --tokens \"mata help ekak oonee\"
    echo \"Oyaa hodhin innavaa nedha?\" | singlish --json
    singlish --keystrokes \"kohomadha\"")]
struct Cli {
    /// Text to convert (reads stdin line by line when omitted)
    text: Option<String>,

    /// Print a token table instead of the converted text
    #[arg(short, long)]
    tokens: bool,

    /// Output as JSON
    #[arg(short, long)]
    json: bool,

    /// Print the output after every typed character
    #[arg(short, long)]
    keystrokes: bool,

    /// Extra lexicon TSV file (repeatable)
    #[arg(long, value_name = "FILE")]
    lexicon: Vec<PathBuf>,

    /// Extra passthrough word list (repeatable)
    #[arg(long, value_name = "FILE")]
    passthrough: Vec<PathBuf>,

    /// Lexicon pack to load
    #[arg(long, value_name = "NAME")]
    pack: Option<String>,

    /// Directory containing lexicon packs
    #[arg(long, value_name = "DIR")]
    pack_dir: Option<PathBuf>,

    /// TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Serialize)]
struct JsonOutput<'a> {
    input: &'a str,
    output: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    tokens: Option<Vec<Token>>,
}

fn init_logging(verbose: bool) {
    let log_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

fn load_config(cli: &Cli) -> singlish_rs::Result<Config> {
    let mut config = match cli.config {
        Some(ref path) => Config::load(path)?,
        None => Config::default(),
    };

    config.data.lexicon_files.extend(cli.lexicon.iter().cloned());
    config.data.passthrough_files.extend(cli.passthrough.iter().cloned());
    if cli.pack.is_some() {
        config.data.pack = cli.pack.clone();
    }
    if cli.pack_dir.is_some() {
        config.data.pack_dir = cli.pack_dir.clone();
    }

    debug!(?config, "effective configuration");
    Ok(config)
}

fn print_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Error serializing to JSON: {}", e);
            std::process::exit(1);
        }
    }
}

fn print_tokens(tokens: &[Token]) {
    for token in tokens {
        if token.is_whitespace() {
            continue;
        }
        let source = match (token.reason, &token.tag) {
            (Some(reason), _) => reason.as_str().to_string(),
            (None, Some(tag)) => format!("{:?}:{}", token.origin, tag),
            (None, None) => format!("{:?}", token.origin),
        };
        println!(
            "{}\t{}\t{}\t{}",
            token.text,
            token.kind.as_str(),
            token.rendered,
            source
        );
    }
}

fn convert_text(engine: &Transliterator, cli: &Cli, text: &str) {
    if cli.json {
        let tokens = engine.tokenize(text);
        let output = singlish_rs::reassemble(&tokens).as_string();
        print_json(&JsonOutput {
            input: text,
            output,
            tokens: cli.tokens.then_some(tokens),
        });
    } else if cli.tokens {
        print_tokens(&engine.tokenize(text));
    } else {
        println!("{}", engine.convert(text));
    }
}

fn replay_keystrokes<W: Write>(
    mut session: LiveSession,
    text: &str,
    out: &mut W,
) -> io::Result<()> {
    for c in text.chars() {
        session.push_char(c);
        let output = session.output();
        writeln!(out, "{}\t{}", session.text(), output)?;
    }
    Ok(())
}

fn run(cli: &Cli) -> singlish_rs::Result<()> {
    let config = load_config(cli)?;

    if cli.keystrokes {
        let text = match cli.text {
            Some(ref text) => text.clone(),
            None => io::read_to_string(io::stdin())
                .map_err(|e| singlish_rs::Error::io("<stdin>", e))?,
        };
        let session = config.build_session()?;
        return replay_keystrokes(session, &text, &mut io::stdout().lock())
            .map_err(|e| singlish_rs::Error::io("<stdout>", e));
    }

    let engine = config.build_transliterator()?;

    if let Some(ref text) = cli.text {
        convert_text(&engine, cli, text);
        return Ok(());
    }

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line.map_err(|e| singlish_rs::Error::io("<stdin>", e))?;
        convert_text(&engine, cli, &line);
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
