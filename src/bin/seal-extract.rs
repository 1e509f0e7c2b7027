use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;

use seal_extraction::{
    default_output_path, Color, ColorMode, ExtractionParams, ProcessResult, SealExtractor,
};

#[derive(Parser)]
#[command(
    name = "seal-extract",
    about = "Isolate colored stamp/seal markings from scanned documents",
    version,
    after_help = "Simple usage: seal-extract scan.jpg  (extract a red seal to scan_seal.png)\n\n\
                  Pass --color more than once to match several seal colors at the\n\
                  same time, e.g. --color FF0000 --color 0066CC."
)]
struct Cli {
    /// Input image file or directory
    input: String,

    /// Output file or directory (default: {name}_seal.png)
    #[arg(short, long)]
    output: Option<String>,

    /// Target seal color as 6 hex digits, repeatable (default: #FF0000)
    #[arg(short, long = "color")]
    colors: Vec<String>,

    /// Color match tolerance (0.0 = exact color only, 1.0 = near-universal)
    #[arg(short, long, default_value = "0.3")]
    tolerance: f32,

    /// Median denoise level (0.0 disables)
    #[arg(short, long, default_value = "0.0")]
    denoise: f32,

    /// Unsharp masking strength (0.0 disables)
    #[arg(short, long, default_value = "0.0")]
    sharpness: f32,

    /// Collapse the extracted seal to its red channel (reference behavior)
    #[arg(long)]
    monochrome: bool,

    /// Suppress all non-error output
    #[arg(short, long)]
    quiet: bool,
}

fn main() {
    let cli = Cli::parse();

    let target_colors = if cli.colors.is_empty() {
        vec![Color::new(255, 0, 0)]
    } else {
        match cli.colors.iter().map(|s| Color::parse(s)).collect() {
            Ok(colors) => colors,
            Err(e) => {
                eprintln!("Error: {e}");
                process::exit(1);
            }
        }
    };

    let params = ExtractionParams {
        target_colors,
        color_tolerance: cli.tolerance,
        denoise_level: cli.denoise,
        sharpness: cli.sharpness,
        color_mode: if cli.monochrome {
            ColorMode::Monochrome
        } else {
            ColorMode::FullColor
        },
    };

    let extractor = match SealExtractor::new(params) {
        Ok(e) => e,
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    };

    let input_path = Path::new(&cli.input);
    if !input_path.exists() {
        eprintln!("Error: Input path does not exist: {}", cli.input);
        process::exit(1);
    }

    if !cli.quiet {
        let palette: Vec<String> = extractor
            .params()
            .target_colors
            .iter()
            .map(ToString::to_string)
            .collect();
        eprintln!(
            "Extracting {} (tolerance: {:.2})",
            palette.join(", "),
            extractor.params().color_tolerance
        );
        eprintln!();
    }

    let results = if input_path.is_dir() {
        let output_dir = if let Some(o) = &cli.output {
            PathBuf::from(o)
        } else {
            eprintln!("Error: Output directory is required for batch processing");
            eprintln!("Usage: seal-extract <input_dir> -o <output_dir>");
            process::exit(1);
        };
        extractor.process_directory(input_path, &output_dir)
    } else {
        let output_path = match &cli.output {
            Some(o) => PathBuf::from(o),
            None => default_output_path(input_path),
        };
        vec![extractor.process_file(input_path, &output_path)]
    };

    let mut success_count = 0u32;
    let mut fail_count = 0u32;

    for r in &results {
        print_result(r, cli.quiet);
        if r.success {
            success_count += 1;
        } else {
            fail_count += 1;
        }
    }

    if results.len() > 1 && !cli.quiet {
        eprintln!();
        eprint!("[Summary] Processed: {success_count}");
        if fail_count > 0 {
            eprint!(", Failed: {fail_count}");
        }
        eprintln!(" (Total: {})", results.len());
    }

    if fail_count > 0 {
        process::exit(1);
    }
}

fn print_result(result: &ProcessResult, quiet: bool) {
    if quiet && result.success {
        return;
    }

    let filename = result.path.file_name().map_or_else(
        || result.path.display().to_string(),
        |f| f.to_string_lossy().to_string(),
    );

    if result.success {
        if !quiet {
            eprintln!("[OK] {filename}");
        }
    } else {
        eprintln!("[FAIL] {filename}: {}", result.message);
    }
}
