use clap::Parser;
use iucount_rs::pipeline::{CountConfig, DEFAULT_MIN_SPAN};
use iucount_rs::strand::LibraryType;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "iucount-rs",
    about = "Count intron usage information from a coordinate-sorted BAM",
    version
)]
pub struct Args {
    /// Intron table: tab-delimited chrom, start, end, strand (0-based, half-open)
    #[arg(short = 'i', long = "intron", value_name = "TSV")]
    pub intron: PathBuf,

    /// Coordinate-sorted BAM [default: standard input]
    #[arg(short = 'b', long = "bam", value_name = "BAM")]
    pub bam: Option<PathBuf>,

    /// Output table [default: standard output]
    #[arg(short = 'o', long = "output", value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Library protocol used to infer the transcript strand of each read
    #[arg(short = 't', long = "library-type", value_enum, default_value_t = LibraryType::Unstranded)]
    pub library_type: LibraryType,

    /// Library is paired-end; only proper pairs are counted
    #[arg(short = 'p', long)]
    pub paired: bool,

    /// Only count unique alignments (NH:i:1)
    #[arg(short = 'u', long)]
    pub unique: bool,

    /// Minimal span of a segment when counting skip and inclusion
    #[arg(short = 's', long, default_value_t = DEFAULT_MIN_SPAN)]
    pub span: u32,

    /// Read length of the library, used by --calculate
    #[arg(short = 'r', long = "read-length")]
    pub read_length: Option<u32>,

    /// Write the effective length of each intron instead of counting reads
    #[arg(short = 'c', long, requires = "read_length")]
    pub calculate: bool,

    /// Warn about decreasing positions instead of failing, and count the
    /// out-of-order reads anyway
    #[arg(long)]
    pub lenient_sort: bool,

    /// Set logging level to WARN
    #[arg(short = 'q', long)]
    pub quiet: bool,
}

impl Args {
    pub fn count_config(&self) -> CountConfig {
        CountConfig {
            library_type: self.library_type,
            paired: self.paired,
            unique: self.unique,
            min_span: self.span,
            strict_sort: !self.lenient_sort,
        }
    }
}
