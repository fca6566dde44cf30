//! Segment extracted resume lines into section blocks.
//!
//! Reads the line extractor's JSON output and prints the annotated lines as
//! JSON, or the grouped blocks as text. Boxes are read with a bottom-left
//! origin unless `--top-left` is given.
//!
//! Usage:
//!   cargo run --release --bin segment_lines -- lines.json
//!   cargo run --release --bin segment_lines -- lines.json --text --top-left

use section_oxide::ingest::{read_extracted_file, Origin};
use section_oxide::pipeline::{SegmentationPipeline, SegmentedDocument};
use std::path::PathBuf;
use std::process;

struct SegmentArgs {
    input: PathBuf,
    origin: Origin,
    text: bool,
}

impl SegmentArgs {
    fn from_args() -> Result<Self, String> {
        let args: Vec<String> = std::env::args().collect();
        let mut input = None;
        let mut origin = Origin::default();
        let mut text = false;

        for arg in args.iter().skip(1) {
            match arg.as_str() {
                "--text" => text = true,
                "--bottom-left" => origin = Origin::BottomLeft,
                "--top-left" => origin = Origin::TopLeft,
                flag if flag.starts_with("--") => {
                    return Err(format!("unknown option {}", flag));
                },
                path => input = Some(PathBuf::from(path)),
            }
        }

        let input = input.ok_or_else(|| {
            "Usage: segment_lines <lines.json> [--text] [--top-left]".to_string()
        })?;

        Ok(Self {
            input,
            origin,
            text,
        })
    }
}

fn print_blocks(result: &SegmentedDocument) {
    println!("Extracted Blocks:");
    for block in result.blocks() {
        println!();
        println!("Block {} ({}):", block.id, block.section_key());
        println!("{}", block);
    }
}

fn run(args: &SegmentArgs) -> Result<(), Box<dyn std::error::Error>> {
    let document = read_extracted_file(&args.input, args.origin)?;
    let result = SegmentationPipeline::new().segment(document)?;

    if args.text {
        print_blocks(&result);
    } else {
        println!("{}", serde_json::to_string_pretty(&result.lines)?);
    }
    Ok(())
}

fn main() {
    env_logger::init();

    let args = match SegmentArgs::from_args() {
        Ok(args) => args,
        Err(message) => {
            eprintln!("{}", message);
            process::exit(1);
        },
    };

    if let Err(e) = run(&args) {
        eprintln!("Error: {}: {}", args.input.display(), e);
        process::exit(1);
    }
}
