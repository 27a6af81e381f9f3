use std::fs::File;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::Parser;
use matchers::{
    AhoCorasickSearch, CommentzWalterSearch, Match, MultiPatternSearch, RabinKarpSearch,
};

#[derive(Debug, Clone, clap::ValueEnum)]
enum Algorithm {
    AhoCorasick,
    CommentzWalter,
    RabinKarp,
}

/// Example:
/// cargo run --release -- -a aho-corasick -t article.txt -p free -p open-source
/// cargo run --release -- -a commentz-walter -t - --pattern-file patterns.txt --measure-time
#[derive(Debug, clap::Parser)]
#[command(
    name = "multi-search",
    about = "Run a multi-pattern string matching engine over one or more texts"
)]
struct Cli {
    #[arg(short, long, value_enum)]
    algo: Algorithm,

    #[arg(short = 't', long = "text", value_name = "TEXT", required = true)]
    texts: Vec<PathBuf>,

    #[arg(
        short = 'p',
        long = "pattern",
        conflicts_with = "pattern_file",
        required_unless_present = "pattern_file"
    )]
    patterns: Vec<String>,

    /// File with one pattern per line; blank lines are skipped
    #[arg(
        long = "pattern-file",
        value_name = "PATTERN_FILE",
        conflicts_with = "patterns",
        required_unless_present = "patterns"
    )]
    pattern_file: Option<PathBuf>,

    /// Optional output file; if omitted, results are written to stdout
    #[arg(short = 'o', long = "output", value_name = "OUTPUT")]
    output: Option<PathBuf>,

    /// Measure and print execution time (build + scan) per text
    #[arg(long)]
    measure_time: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let cli = Cli::parse();

    let patterns = load_patterns(&cli)?;
    if patterns.is_empty() {
        return Err("At least one non-empty pattern is required".into());
    }

    let mut out: Box<dyn Write> = match cli.output {
        Some(ref path) => Box::new(File::create(path)?),
        None => Box::new(io::stdout()),
    };

    writeln!(
        out,
        "# algorithm={:?}, patterns={}",
        cli.algo,
        patterns.len()
    )?;

    let pattern_refs: Vec<&str> = patterns.iter().map(String::as_str).collect();

    for text_path in cli.texts.iter() {
        let text = load_text(text_path)?;
        let (matches, duration) = run_algorithm(&cli, &pattern_refs, &text)?;

        writeln!(out, "text={:?}", text_path)?;
        if let Some(d) = duration {
            writeln!(out, "execution_time: {}ns", d.as_nanos())?;
        }
        writeln!(out, "matches: {}", matches.len())?;
        for m in matches {
            writeln!(out, "  ({:?}, {})", m.pattern, m.start)?;
        }
        writeln!(out)?;
    }

    Ok(())
}

/// The engines compare against lowercased text, so patterns are lowercased
/// here before building.
fn load_patterns(cli: &Cli) -> Result<Vec<String>, Box<dyn std::error::Error>> {
    let raw: Vec<String> = if let Some(ref path) = cli.pattern_file {
        load_text(path)?
            .lines()
            .map(str::to_string)
            .filter(|line| !line.is_empty())
            .collect()
    } else {
        cli.patterns.clone()
    };
    Ok(raw.iter().map(|p| p.to_lowercase()).collect())
}

fn load_text(path: &PathBuf) -> Result<String, Box<dyn std::error::Error>> {
    if path.as_os_str() == "-" {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        Ok(buf)
    } else {
        let mut file = File::open(path)?;
        let mut buf = String::new();
        file.read_to_string(&mut buf)?;
        Ok(buf)
    }
}

fn run_algorithm(
    cli: &Cli,
    patterns: &[&str],
    text: &str,
) -> Result<(Vec<Match>, Option<Duration>), Box<dyn std::error::Error>> {
    let start = if cli.measure_time {
        Some(Instant::now())
    } else {
        None
    };

    let result = match cli.algo {
        Algorithm::AhoCorasick => {
            let automaton = AhoCorasickSearch::build(patterns)?;
            AhoCorasickSearch::scan(&automaton, text)
        }
        Algorithm::CommentzWalter => {
            let automaton = CommentzWalterSearch::build(patterns)?;
            CommentzWalterSearch::scan(&automaton, text)
        }
        Algorithm::RabinKarp => {
            let automaton = RabinKarpSearch::build(patterns)?;
            RabinKarpSearch::scan(&automaton, text)
        }
    };

    let duration = start.map(|s| s.elapsed());

    Ok((result, duration))
}
