use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "paperkit")]
#[command(about = "PDF page extraction and merging, plus photo sheet layout")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Extract pages into a new PDF, optionally trimming each page
    Extract {
        /// PDF file to extract from
        path: PathBuf,

        /// Page specifiers: single pages ("3") or inclusive ranges ("5-9")
        #[arg(short, long, required = true, num_args = 1..)]
        pages: Vec<String>,

        /// Output file
        #[arg(short, long)]
        output: PathBuf,

        /// Normalized trim rectangle applied to every extracted page
        #[arg(short, long, num_args = 4, value_names = ["LEFT", "TOP", "RIGHT", "BOTTOM"])]
        trim: Option<Vec<f32>>,
    },

    /// Combine multiple PDFs into one, with a bookmark per input file
    Merge {
        /// PDF files to merge, in order
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Output file
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Crop a square from a photo and replicate it onto a 6x4 inch sheet
    Sheet {
        /// Image to crop
        path: PathBuf,

        /// Selection top-left X, in original pixels
        #[arg(short, long, default_value_t = 0)]
        x: u32,

        /// Selection top-left Y, in original pixels
        #[arg(short, long, default_value_t = 0)]
        y: u32,

        /// Selection square size, in original pixels
        #[arg(short, long)]
        size: u32,

        /// Output image file
        #[arg(short, long)]
        output: PathBuf,
    },
}
