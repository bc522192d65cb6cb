use crate::annotation::Intron;
use std::io::{self, Write};

/// Number of distinct read placements that can produce each kind of
/// evidence for one intron, given a read length and minimum span.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EffectiveLengths {
    pub inclusion: i64,
    pub containment: i64,
    pub skip: i64,
}

impl EffectiveLengths {
    pub fn new(intron_length: u32, read_length: u32, min_span: u32) -> Self {
        let intron_length = i64::from(intron_length);
        let read_length = i64::from(read_length);
        let skip = read_length - 2 * i64::from(min_span) + 1;
        let inclusion = skip + skip.min(intron_length);
        let containment = inclusion + (intron_length - read_length + 1).max(0);
        Self {
            inclusion,
            containment,
            skip,
        }
    }
}

/// One line per intron, in table order:
/// `chrom, start, end, strand, inclusion, containment, skip`.
pub fn write_counts<W: Write>(writer: &mut W, introns: &[Intron]) -> io::Result<()> {
    for intron in introns {
        writeln!(
            writer,
            "{}\t{}\t{}\t{}\t{}\t{}\t{}",
            intron.chrom,
            intron.start,
            intron.end,
            intron.strand,
            intron.counts.inclusion,
            intron.counts.containment,
            intron.counts.skip,
        )?;
    }
    writer.flush()
}

/// Same layout as [`write_counts`], with effective lengths in place of counts.
pub fn write_effective_lengths<W: Write>(
    writer: &mut W,
    introns: &[Intron],
    read_length: u32,
    min_span: u32,
) -> io::Result<()> {
    for intron in introns {
        let lengths = EffectiveLengths::new(intron.length(), read_length, min_span);
        writeln!(
            writer,
            "{}\t{}\t{}\t{}\t{}\t{}\t{}",
            intron.chrom,
            intron.start,
            intron.end,
            intron.strand,
            lengths.inclusion,
            lengths.containment,
            lengths.skip,
        )?;
    }
    writer.flush()
}
