use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use clap::{Parser, ValueEnum};
use lempelziv::{compress_file, decompress_file, CodecConfig, SearchStrategy, TokenFormat};

#[derive(Parser, Debug)]
#[command(name = "lempelziv")]
#[command(about = "Compress files with sliding-window LZ77/LZSS coding")]
#[command(version)]
struct Args {
    /// File to compress, or a .LZ77/.LZSS file to decompress
    #[arg(short, long)]
    input: PathBuf,

    /// Decompress instead of compress
    #[arg(short, long)]
    decompress: bool,

    /// Sliding window size in bytes
    #[arg(short = 'w', long, default_value = "4096")]
    window_size: usize,

    /// Lookahead buffer size in bytes
    #[arg(short = 'b', long, default_value = "32")]
    buffer_size: usize,

    /// Token format (default: lzss, or the input's extension when decompressing)
    #[arg(short, long, value_enum)]
    format: Option<FormatArg>,

    /// Search the whole window for every match instead of using the position index
    #[arg(long)]
    brute_force: bool,

    /// Show verbose statistics
    #[arg(short, long)]
    verbose: bool,

    /// Print every token
    #[arg(long)]
    trace: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum FormatArg {
    Lz77,
    Lzss,
}

impl From<FormatArg> for TokenFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Lz77 => TokenFormat::Lz77,
            FormatArg::Lzss => TokenFormat::Lzss,
        }
    }
}

const EXIT_ERROR: u8 = 1;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(EXIT_ERROR)
        }
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let format = match args.format {
        Some(format) => format.into(),
        None if args.decompress => TokenFormat::from_path(&args.input).unwrap_or_default(),
        None => TokenFormat::default(),
    };
    let search =
        if args.brute_force { SearchStrategy::BruteForce } else { SearchStrategy::Indexed };
    let config = CodecConfig::new(args.window_size, args.buffer_size)?
        .with_format(format)
        .with_search(search);

    let start = Instant::now();
    let report = if args.decompress {
        decompress_file(&args.input, &config)?
    } else {
        compress_file(&args.input, &config)?
    };
    let elapsed = start.elapsed();

    if args.trace {
        for token in &report.tokens {
            println!("{}", token);
        }
    }

    if args.verbose {
        let stats = &report.stats;
        eprintln!("{} complete:", if args.decompress { "Decompression" } else { "Compression" });
        eprintln!("  Format:           {:?}", config.format());
        eprintln!("  Window size:      {} bytes", config.window_size());
        eprintln!("  Buffer size:      {} bytes", config.buffer_size());
        eprintln!("  Output:           {}", report.path.display());
        eprintln!("  Original size:    {} bytes", stats.original_bytes);
        eprintln!("  Compressed size:  {} bytes", stats.compressed_bytes);
        eprintln!("  Ratio:            {:.2}", stats.compression_ratio());
        eprintln!("  Tokens:           {} ({} matches)", stats.tokens, stats.match_tokens);
        eprintln!("  Longest match:    {} bytes", stats.longest_match);
        eprintln!("  Time:             {:.2?}", elapsed);
    }

    Ok(())
}
