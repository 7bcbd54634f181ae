/// Jabberwock — generates pseudo-words from sample text files.
///
/// Usage: jabberwock [--config <file.ron>] [--count <n>] [--seed <n>]
///                   [--min-length <n>] [--output <file>] [--verbose] <files...>
use jabberwock::core::config::JabberConfig;
use jabberwock::core::corpus::{load_texts, parse_words, require_min_text};
use jabberwock::core::generator::WordGenerator;
use jabberwock::core::model::build_model;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::io::Write;
use std::path::Path;
use std::process;

const USAGE: &str = "Usage: jabberwock [--config <file.ron>] [-c|--count <n>] [-s|--seed <n>] \
[-m|--min-length <n>] [-o|--output <file>] [-v|--verbose] <files...>";

struct Args {
    config: Option<String>,
    count: Option<usize>,
    seed: Option<u64>,
    min_length: Option<usize>,
    output: Option<String>,
    verbose: bool,
    files: Vec<String>,
}

fn main() {
    let args = parse_args();

    let default_filter = if args.verbose { "info" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let mut config = match &args.config {
        Some(path) => JabberConfig::load_from_ron(Path::new(path)).unwrap_or_else(|e| {
            eprintln!("Error loading config '{}': {}", path, e);
            process::exit(1);
        }),
        None => JabberConfig::default(),
    };
    if let Some(count) = args.count {
        config.count = count;
    }
    if let Some(seed) = args.seed {
        config.seed = Some(seed);
    }
    if let Some(min_length) = args.min_length {
        config.min_word_length = min_length;
    }
    if let Err(e) = config.validate() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }

    if args.files.is_empty() {
        eprintln!("Error: at least one sample text file is required");
        eprintln!("{}", USAGE);
        process::exit(1);
    }

    let text = load_texts(&args.files).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        process::exit(1);
    });
    let chars = require_min_text(&text, config.min_text_length).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        eprintln!("Add more sample text files and try again.");
        process::exit(1);
    });
    eprintln!("Loaded {} chars of sample text", chars);

    let words = parse_words(&text, config.min_word_length);
    let model = build_model(&words).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        process::exit(1);
    });

    let stats = model.stats();
    eprintln!(
        "Model trained: {} words, {} contexts, {} transitions, lengths {}..={}",
        stats.words, stats.contexts, stats.transitions, stats.min_length, stats.max_length
    );

    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let generator = WordGenerator::from_model(&model)
        .with_end_bias(config.end_bias)
        .with_max_length_factor(config.max_length_factor);
    let generated = generator.generate(config.count, &mut rng);

    let mut out = String::new();
    for word in &generated {
        out.push_str(word.as_str());
        out.push('\n');
    }

    match &args.output {
        Some(path) => {
            std::fs::write(path, &out).unwrap_or_else(|e| {
                eprintln!("Error writing words to '{}': {}", path, e);
                process::exit(1);
            });
            eprintln!("Wrote {} words to '{}'", generated.len(), path);
        }
        None => {
            let stdout = std::io::stdout();
            let mut handle = stdout.lock();
            if let Err(e) = handle.write_all(out.as_bytes()) {
                eprintln!("Error writing words: {}", e);
                process::exit(1);
            }
        }
    }
}

fn parse_args() -> Args {
    let argv: Vec<String> = std::env::args().collect();
    let mut args = Args {
        config: None,
        count: None,
        seed: None,
        min_length: None,
        output: None,
        verbose: false,
        files: Vec::new(),
    };

    let mut i = 1;
    while i < argv.len() {
        match argv[i].as_str() {
            "--config" if i + 1 < argv.len() => {
                i += 1;
                args.config = Some(argv[i].clone());
            }
            "-c" | "--count" if i + 1 < argv.len() => {
                i += 1;
                args.count = Some(parse_number(&argv[i], "--count"));
            }
            "-s" | "--seed" if i + 1 < argv.len() => {
                i += 1;
                args.seed = Some(parse_number(&argv[i], "--seed"));
            }
            "-m" | "--min-length" if i + 1 < argv.len() => {
                i += 1;
                args.min_length = Some(parse_number(&argv[i], "--min-length"));
            }
            "-o" | "--output" if i + 1 < argv.len() => {
                i += 1;
                args.output = Some(argv[i].clone());
            }
            "-v" | "--verbose" => args.verbose = true,
            "--help" | "-h" => {
                println!("{}", USAGE);
                process::exit(0);
            }
            other if other.starts_with('-') => {
                eprintln!("Unknown argument: {}", other);
                eprintln!("{}", USAGE);
                process::exit(1);
            }
            file => args.files.push(file.to_string()),
        }
        i += 1;
    }

    args
}

fn parse_number<T: std::str::FromStr>(value: &str, flag: &str) -> T {
    value.parse().unwrap_or_else(|_| {
        eprintln!("Error: {} expects a non-negative integer, got '{}'", flag, value);
        process::exit(1);
    })
}
