use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use lexigrid_core as game;
use game::BoardGenerator;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

mod config;
mod host;
mod input;
mod render;

#[derive(Parser, Debug)]
#[command(version, about = "Find every word hidden in a letter grid", long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: Verbosity<WarnLevel>,

    /// Newline separated word list
    #[arg(long, global = true, default_value = "assets/words.txt")]
    dict: PathBuf,

    /// TOML file with game options
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Force a seed instead of random
    #[arg(short, long, global = true)]
    seed: Option<u64>,

    #[command(flatten)]
    overrides: config::Overrides,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List every word on a board given as rows, e.g. CATS,OREN,DIAL,PEGS
    Solve {
        board: String,
        /// Print word paths as JSON
        #[arg(long)]
        json: bool,
    },
    /// Generate a board and report what can be found on it
    Generate {
        /// Also list the words
        #[arg(long)]
        words: bool,
    },
    /// Play rounds in the terminal
    Play {
        /// Edge length in pixels of the virtual frame used by drag commands
        #[arg(long, default_value_t = 400.0)]
        frame: f32,
        /// Print session snapshots as JSON lines
        #[arg(long)]
        json: bool,
    },
}

#[derive(Serialize)]
struct SolveReport<'a> {
    board: Vec<String>,
    words: &'a [game::BoardWord],
    max_score: u32,
}

fn init_logging(verbose: &Verbosity<WarnLevel>) {
    let level = verbose.log_level_filter().as_str().to_ascii_lowercase();
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_trie(path: &Path, config: &game::GameConfig) -> Result<game::Trie> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading dictionary {}", path.display()))?;
    let trie = game::load_dictionary(&text, config)
        .with_context(|| format!("loading dictionary {}", path.display()))?;
    log::info!("Dictionary {} has {} words", path.display(), trie.len());
    Ok(trie)
}

fn solve(trie: &game::Trie, board: &str, json: bool) -> Result<()> {
    let board: game::GameBoard = board.parse().context("parsing board")?;
    let words = game::WordSearch::new(&board, trie).find_all_words();
    let distinct = game::distinct_words(&words);
    let max_score = game::max_score(distinct.iter().map(String::as_str));

    if json {
        let report = SolveReport {
            board: board.rows().collect(),
            words: &words,
            max_score,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("{}\n", board);
    for game::BoardWord { word, path } in &words {
        let path: Vec<String> = path.iter().map(ToString::to_string).collect();
        println!("{:<12} {}", word, path.join(" "));
    }
    println!(
        "\n{} words, {} paths, max score {}",
        distinct.len(),
        words.len(),
        max_score
    );
    Ok(())
}

fn generate(trie: &game::Trie, config: &game::GameConfig, seed: u64, list: bool) -> Result<()> {
    let game::GeneratedBoard {
        board,
        words,
        rerolls,
    } = game::RandomBoardGenerator::new(seed).generate(config, trie);
    let distinct = game::distinct_words(&words);
    let covered = game::coverage(&words).len();

    println!("seed {}\n{}\n", seed, board);
    println!(
        "{} words, max score {}, {}/{} cells covered after {} re-rolls",
        distinct.len(),
        game::max_score(distinct.iter().map(String::as_str)),
        covered,
        config.total_cells(),
        rerolls
    );
    if list {
        println!("{}", distinct.join(" "));
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args.verbose);

    let config = config::load(args.config.as_deref(), &args.overrides)?;
    let trie = load_trie(&args.dict, &config)?;
    let seed = args.seed.unwrap_or_else(rand::random);
    log::debug!("seed: {}", seed);

    match args.command {
        Command::Solve { board, json } => solve(&trie, &board, json),
        Command::Generate { words } => generate(&trie, &config, seed, words),
        Command::Play { frame, json } => {
            let session = game::Session::new(config, Arc::new(trie), seed)?;
            let output = if json {
                host::Output::Json
            } else {
                host::Output::Text
            };
            host::play(session, frame, output)
        }
    }
}
