//! CLI tool for compressing text using compression-prompt.

use compression_prompt::{CompressionEngine, PipelineOptions};
use std::env;
use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::process;

fn print_usage() {
    eprintln!("Usage: compress [OPTIONS] [INPUT_FILE]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -a, --aggressive   Enable semantic pruning and summarization (stages 5-6)");
    eprintln!("  -o, --output <FILE>  Output file (default: stdout)");
    eprintln!("  -s, --stats        Show compression statistics on stderr");
    eprintln!("  -h, --help         Show this help message");
    eprintln!();
    eprintln!("Examples:");
    eprintln!("  compress input.txt                  # Compress to stdout");
    eprintln!("  compress -a input.txt                # Aggressive mode");
    eprintln!("  compress -s -o out.txt input.txt     # Save and print stats");
    eprintln!("  cat input.txt | compress             # Read from stdin");
}

struct Config {
    input_file: Option<PathBuf>,
    output_file: Option<PathBuf>,
    aggressive: bool,
    show_stats: bool,
}

impl Config {
    fn parse_args() -> Result<Self, String> {
        let args: Vec<String> = env::args().collect();

        let mut config = Config {
            input_file: None,
            output_file: None,
            aggressive: false,
            show_stats: false,
        };

        let mut i = 1;
        while i < args.len() {
            match args[i].as_str() {
                "-h" | "--help" => {
                    print_usage();
                    process::exit(0);
                }
                "-a" | "--aggressive" => {
                    config.aggressive = true;
                }
                "-o" | "--output" => {
                    i += 1;
                    if i >= args.len() {
                        return Err("Missing value for --output".to_string());
                    }
                    config.output_file = Some(PathBuf::from(&args[i]));
                }
                "-s" | "--stats" => {
                    config.show_stats = true;
                }
                arg if arg.starts_with('-') => {
                    return Err(format!("Unknown option: {}", arg));
                }
                arg => {
                    config.input_file = Some(PathBuf::from(arg));
                }
            }
            i += 1;
        }

        Ok(config)
    }
}

fn read_input(config: &Config) -> io::Result<String> {
    if let Some(ref input_file) = config.input_file {
        fs::read_to_string(input_file)
    } else {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        Ok(buffer)
    }
}

fn write_output(config: &Config, text: &str) -> io::Result<()> {
    if let Some(ref output_file) = config.output_file {
        fs::write(output_file, text)
    } else {
        io::stdout().write_all(text.as_bytes())?;
        io::stdout().flush()
    }
}

fn main() {
    tracing_subscriber::fmt::init();

    let config = match Config::parse_args() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!();
            print_usage();
            process::exit(1);
        }
    };

    let input = match read_input(&config) {
        Ok(text) => text,
        Err(e) => {
            eprintln!("Error reading input: {}", e);
            process::exit(1);
        }
    };

    let engine = CompressionEngine::new();
    engine.init();

    let result = match engine.compress(
        &input,
        PipelineOptions {
            aggressive: config.aggressive,
        },
    ) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Compression error: {}", e);
            process::exit(1);
        }
    };

    if config.show_stats {
        eprintln!("Compression Statistics:");
        eprintln!("  Original tokens:    {}", result.original_tokens);
        eprintln!("  Compressed tokens:  {}", result.compressed_tokens);
        eprintln!("  Saved tokens:       {}", result.saved_tokens);
        eprintln!("  Compression ratio:  {:.3}", result.compression_ratio);
        eprintln!("  Compression %:      {:.1}%", result.compression_percentage);
        eprintln!("  Dictionary entries: {}", result.dictionary.len());
        eprintln!();
    }

    if let Err(e) = write_output(&config, &result.compressed_text) {
        eprintln!("Error writing output: {}", e);
        process::exit(1);
    }
}
