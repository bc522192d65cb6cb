mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use iucount_rs::annotation::load_introns;
use iucount_rs::bam_input::BamInput;
use iucount_rs::{output, pipeline};
use mimalloc::MiMalloc;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use tracing_subscriber::EnvFilter;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

fn main() -> Result<()> {
    let args = cli::Args::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if args.quiet {
            EnvFilter::new("warn")
        } else {
            EnvFilter::new("info")
        }
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    if args.output.is_none() {
        tracing::warn!("output file not provided, writing results to standard output");
    }

    tracing::info!("loading intron file");
    let mut introns = load_introns(&args.intron)?;
    tracing::info!(introns = introns.len(), "loaded intron file");

    if args.calculate {
        // clap enforces --read-length alongside --calculate
        let read_length = args.read_length.context("--calculate requires --read-length")?;
        tracing::info!(read_length, "calculating effective lengths");
        let mut writer = open_output(args.output.as_deref())?;
        output::write_effective_lengths(&mut writer, &introns, read_length, args.span)
            .context("failed to write effective lengths")?;
        return Ok(());
    }

    if args.bam.is_none() {
        tracing::warn!("BAM file not provided, reading from standard input");
    }
    tracing::info!("loading bam file");
    let mut bam = BamInput::open(args.bam.as_deref())?;
    let reference_names = bam.reference_names.clone();

    let config = args.count_config();
    let stats = pipeline::count(&mut bam, &reference_names, &mut introns, &config)?;

    let mut writer = open_output(args.output.as_deref())?;
    output::write_counts(&mut writer, &introns).context("failed to write counts")?;

    tracing::info!(
        references = stats.references,
        total_records = stats.total_records,
        counted_reads = stats.counted_reads,
        unmapped_reads = stats.unmapped_reads,
        improper_pairs = stats.improper_pairs,
        multimapped_reads = stats.multimapped_reads,
        undefined_strand = stats.undefined_strand,
        unplaced_introns = stats.unplaced_introns,
        "iucount-rs: processing complete"
    );
    Ok(())
}

fn open_output(path: Option<&Path>) -> Result<Box<dyn Write>> {
    Ok(match path {
        Some(path) => Box::new(BufWriter::new(
            File::create(path)
                .with_context(|| format!("failed to create output file {}", path.display()))?,
        )),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    })
}
