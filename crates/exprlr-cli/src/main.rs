use anyhow::Context as _;
use clap::{Parser, Subcommand};
use exprlr::{
    grammar::{PARSE_TERMINALS, RULES},
    parser::Parser as LrParser,
    Scanner, Terminal,
};
use std::{
    io::{self, BufRead as _, Write as _},
    path::{Path, PathBuf},
};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(author, version, about = "Scanner and LR(1) parser for arithmetic expressions", long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Disable the legacy rule that a literal `$` terminates input.
    #[arg(long, global = true)]
    no_dollar_eof: bool,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the lexeme stream of a source file.
    Scan { input: PathBuf },

    /// Parse a file, or read expressions interactively when omitted.
    Parse { input: Option<PathBuf> },
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_ansi(true)
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    tracing::trace!("CLI args = {:?}", args);

    let dollar_eof = !args.no_dollar_eof;
    match args.command {
        Command::Scan { input } => scan(&input, dollar_eof),
        Command::Parse { input: Some(path) } => parse_file(&path, dollar_eof),
        Command::Parse { input: None } => repl(dollar_eof),
    }
}

fn scan(path: &Path, dollar_eof: bool) -> anyhow::Result<()> {
    let mut scanner = Scanner::from_path(path)
        .with_context(|| format!("failed to open {}", path.display()))?
        .with_dollar_eof(dollar_eof);

    loop {
        let kind = scanner.advance()?;
        let lexeme = scanner.current().context("scanner yielded no lexeme")?;
        println!(
            "line {:>3}  token {:>2}-{:<12} lexeme: {}",
            lexeme.line,
            kind.code(),
            kind,
            lexeme.text,
        );
        if kind == Terminal::Eof {
            break;
        }
    }
    Ok(())
}

fn parse_file(path: &Path, dollar_eof: bool) -> anyhow::Result<()> {
    let scanner = Scanner::from_path(path)
        .with_context(|| format!("failed to open {}", path.display()))?
        .with_dollar_eof(dollar_eof);
    let tree = LrParser::new(scanner).parse()?;
    print!("{}", tree);
    Ok(())
}

fn repl(dollar_eof: bool) -> anyhow::Result<()> {
    let tokens: Vec<&str> = PARSE_TERMINALS.iter().map(Terminal::name).collect();
    println!("Supported tokens: {}", tokens.join(", "));
    println!("Grammar rules:");
    for (index, rule) in RULES.iter().enumerate() {
        println!("  {}. {}", index + 1, rule);
    }
    println!("Enter an expression to parse, or /exit to quit.");

    let stdin = io::stdin();
    let mut line = String::new();
    loop {
        print!("> ");
        io::stdout().flush()?;
        line.clear();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let input = line.trim();
        if input == "/exit" {
            break;
        }
        if input.is_empty() {
            continue;
        }

        let scanner = Scanner::from_text(input)?.with_dollar_eof(dollar_eof);
        match LrParser::new(scanner).parse() {
            Ok(tree) => print!("{}", tree),
            Err(err) => println!("{}", err),
        }
    }
    Ok(())
}
