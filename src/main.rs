//! Wordle Engine CLI
//!
//! Interactive command-line interface for the solving engine.

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;

use wordle_engine::{
    default_corpus, load_config, validate_config, Corpus, EngineConfig, FeedbackPattern,
    RankedGuess, Session, Solver, Word,
};

const HELP_TEXT: &str = "\
Commands:
  suggest | s              best next guess
  top [N] | t [N]          top N guesses
  feedback WORD PATTERN    apply a round, e.g. `feedback crane gybbb`
                           (g/2 = exact, y/1 = present, b/0 = absent)
  remaining | r            list remaining candidates
  hard                     toggle hard mode
  solve WORD               let the solver play against WORD
  bench                    play every answer and show the guess distribution
  reset                    start a new puzzle
  quit | q                 exit";

#[derive(Parser)]
#[command(name = "wordle-engine", version, about = "Entropy-based word-puzzle solver")]
struct Cli {
    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Candidate word list (overrides the configuration)
    #[arg(long)]
    words: Option<PathBuf>,
    /// Allowed guesses word list (overrides the configuration)
    #[arg(long)]
    allowed: Option<PathBuf>,
    /// Only suggest guesses that reuse revealed hints
    #[arg(long)]
    hard: bool,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Interactive session (default)
    Play,
    /// Print the best opening guesses
    Suggest {
        #[arg(short = 'n', long)]
        top: Option<usize>,
    },
    /// Let the solver play against a known answer
    Solve { word: String },
    /// Play every answer and report the guess distribution
    Bench,
    /// Answer JSON requests, one per line, on stdin
    Serve,
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = load_config(cli.config.as_deref()).context("Failed to load configuration")?;
    if let Some(words) = cli.words {
        config.corpus.words = Some(words);
    }
    if let Some(allowed) = cli.allowed {
        config.corpus.allowed = Some(allowed);
    }
    if cli.hard {
        config.game.hard_mode = true;
    }
    validate_config(&config).context("Configuration validation failed")?;

    let mut solver = build_solver(&config)?;

    match cli.command.unwrap_or(Command::Play) {
        Command::Play => run_interactive(&mut solver, &config),
        Command::Suggest { top } => {
            print_top(&solver.suggest(top.unwrap_or(config.game.top_n))?);
            Ok(())
        }
        Command::Solve { word } => {
            let target = Word::new(&word).context("Invalid target word")?;
            solve(&mut solver, &target)
        }
        Command::Bench => bench(&solver),
        Command::Serve => serve(Session::new(solver, config.game.top_n)),
    }
}

fn load_corpus(path: Option<&Path>) -> Result<Corpus> {
    match path {
        Some(path) => Corpus::from_path(path)
            .with_context(|| format!("Failed to load word list from {:?}", path)),
        None => default_corpus().context("Failed to load bundled word list"),
    }
}

fn build_solver(config: &EngineConfig) -> Result<Solver> {
    let corpus = Arc::new(load_corpus(config.corpus.words.as_deref())?);
    let allowed = match config.corpus.allowed.as_deref() {
        Some(path) => Some(Arc::new(load_corpus(Some(path))?)),
        None => None,
    };
    info!(
        words = corpus.len(),
        word_length = corpus.word_length(),
        "Corpus ready"
    );
    Ok(Solver::from_config(config, corpus, allowed)?)
}

fn print_top(top: &[RankedGuess]) {
    println!();
    println!("{} ranked guesses:", top.len());
    println!("{:>4} {:>8} {:>8} {:>10}  {}", "rank", "guess", "bits", "expected", "answer?");
    for (i, analysis) in top.iter().enumerate() {
        println!(
            "{:>4} {:>8} {:>8.3} {:>10.1}  {}",
            i + 1,
            analysis.word.as_str().to_uppercase(),
            analysis.score,
            analysis.expected_remaining,
            if analysis.is_candidate { "yes" } else { "" }
        );
    }
    println!();
}

fn print_remaining(solver: &Solver, limit: usize) {
    let dictionary = solver.dictionary();
    println!();
    println!("{} candidates left", dictionary.remaining_count());
    if dictionary.remaining_count() <= limit {
        let words: Vec<String> = dictionary
            .remaining_words()
            .map(|w| w.as_str().to_uppercase())
            .collect();
        for row in words.chunks(10) {
            println!("  {}", row.join(" "));
        }
    }
    println!();
}

fn solve(solver: &mut Solver, target: &Word) -> Result<()> {
    println!();
    println!("Target {}", target.as_str().to_uppercase());
    println!();

    solver.reset();
    let guesses = solver.solve_for_target(target)?;
    for (i, (guess, pattern)) in guesses.iter().enumerate() {
        println!("{:>2}. {} {}", i + 1, guess.as_str().to_uppercase(), pattern);
    }

    println!();
    match guesses.last() {
        Some((_, pattern)) if pattern.is_win() => println!("Found in {} guesses.", guesses.len()),
        _ => println!("Not found within {} guesses.", solver.max_turns()),
    }
    println!();
    solver.reset();
    Ok(())
}

fn bench(solver: &Solver) -> Result<()> {
    let start = Instant::now();
    let distribution = solver.benchmark_distribution()?;
    let elapsed = start.elapsed();

    let total: usize = distribution.iter().map(|(_, c)| c).sum();
    let total_guesses: usize = distribution.iter().map(|(g, c)| g * c).sum();
    let average = total_guesses as f64 / total.max(1) as f64;

    println!();
    println!("Guesses per game:");
    for (guesses, count) in &distribution {
        let share = *count as f64 / total as f64;
        let bar = "#".repeat(((share * 40.0).round() as usize).max(1));
        let label = if *guesses > solver.max_turns() {
            "unsolved".to_string()
        } else {
            guesses.to_string()
        };
        println!("{:>9} {:>5} {:>6.1}% {}", label, count, share * 100.0, bar);
    }
    println!();
    println!("{} games, {:.3} guesses on average, {:.2?}", total, average, elapsed);
    println!();
    Ok(())
}

fn serve(session: Session) -> Result<()> {
    info!("Serving JSON requests on stdin");
    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();
    for line in stdin.lock().lines() {
        let line = line.context("Failed to read request")?;
        if line.trim().is_empty() {
            continue;
        }
        writeln!(stdout, "{}", session.handle_json(&line))?;
        stdout.flush()?;
    }
    Ok(())
}

fn run_interactive(solver: &mut Solver, config: &EngineConfig) -> Result<()> {
    println!("{} words loaded.", solver.dictionary().corpus().len());
    println!("Enter a command ('help' lists them).");
    println!();

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("> ");
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }

        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.is_empty() {
            continue;
        }

        match parts[0].to_lowercase().as_str() {
            "help" | "h" | "?" => println!("{}", HELP_TEXT),
            "quit" | "exit" | "q" => {
                println!("Bye.");
                break;
            }
            "suggest" | "s" | "best" => match solver.best_guess() {
                Ok(analysis) => {
                    println!();
                    println!("{}  ({:.3} bits)", analysis.word.as_str().to_uppercase(), analysis.score);
                    println!("  {:.1} words expected to remain", analysis.expected_remaining);
                    if analysis.is_candidate {
                        println!("  could be the answer");
                    } else {
                        println!("  cannot be the answer");
                    }
                    println!();
                    println!(
                        "{} candidates left{}",
                        solver.remaining_count(),
                        if solver.is_hard_mode() { " (hard mode)" } else { "" }
                    );
                    println!();
                }
                Err(e) => println!("{}. Use 'reset' to start over.", e),
            },
            "hard" | "hardmode" => {
                solver.set_hard_mode(!solver.is_hard_mode());
                match solver.is_hard_mode() {
                    true => println!("Hard mode on: suggestions reuse every revealed hint."),
                    false => println!("Hard mode off."),
                }
            }
            "top" | "t" => {
                let n = parts
                    .get(1)
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(config.game.top_n);
                match solver.suggest(n) {
                    Ok(top) => print_top(&top),
                    Err(e) => println!("{}.", e),
                }
            }
            "feedback" | "f" | "fb" => {
                if parts.len() < 3 {
                    println!("feedback needs a word and a pattern, e.g. `feedback crane gybbb`");
                    continue;
                }
                if let Err(e) = apply_round(solver, parts[1], parts[2]) {
                    println!("{:#}", e);
                }
            }
            "remaining" | "r" | "left" => print_remaining(solver, 20),
            "solve" => match parts.get(1).map(|w| Word::new(w)) {
                Some(Ok(target)) => solve(solver, &target)?,
                Some(Err(e)) => println!("{}", e),
                None => println!("Usage: solve <target_word>"),
            },
            "benchmark" | "bench" => bench(solver)?,
            "reset" => {
                solver.reset();
                println!("New puzzle, {} candidates.", solver.remaining_count());
            }
            other => println!("No such command {:?} ('help' lists them)", other),
        }
    }
    Ok(())
}

fn apply_round(solver: &mut Solver, word: &str, pattern: &str) -> Result<()> {
    let guess = Word::new(word)?;
    let Some(pattern) = FeedbackPattern::parse(pattern) else {
        bail!(
            "Invalid pattern: {} (use g=green, y=yellow, b=black, {} characters)",
            pattern,
            solver.dictionary().word_length()
        );
    };

    let prev_count = solver.remaining_count();
    let eliminated = solver.apply_feedback(&guess, pattern)?;
    let new_count = solver.remaining_count();

    println!();
    println!("{} {}", guess.as_str().to_uppercase(), pattern);
    println!("{} ruled out, {} of {} left", eliminated, new_count, prev_count);

    if pattern.is_win() {
        println!();
        println!("Solved.");
    } else if new_count == 0 {
        println!();
        println!("No word in the list fits every round so far; check the patterns or `reset`.");
    } else if new_count <= 10 {
        println!();
        let remaining: Vec<String> = solver
            .dictionary()
            .remaining_words()
            .map(|w| w.as_str().to_uppercase())
            .collect();
        println!("Left: {}", remaining.join(" "));
    }
    println!();
    Ok(())
}
