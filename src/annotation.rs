use anyhow::{anyhow, bail, Context, Result};
use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strand {
    Forward,
    Reverse,
    Unstranded,
}

impl Strand {
    pub fn as_char(self) -> char {
        match self {
            Strand::Forward => '+',
            Strand::Reverse => '-',
            Strand::Unstranded => '.',
        }
    }

    /// Two strands conflict only when both are known and differ.
    pub fn is_compatible(self, other: Strand) -> bool {
        self == Strand::Unstranded || other == Strand::Unstranded || self == other
    }
}

impl fmt::Display for Strand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

impl FromStr for Strand {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "+" => Ok(Strand::Forward),
            "-" => Ok(Strand::Reverse),
            "." => Ok(Strand::Unstranded),
            _ => Err(anyhow!("invalid strand {s:?}, expected '+', '-' or '.'")),
        }
    }
}

/// Per-intron evidence tallies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Counts {
    pub inclusion: u64,
    pub containment: u64,
    pub skip: u64,
}

#[derive(Debug, Clone)]
pub struct Intron {
    pub chrom: String,
    /// 0-based, inclusive.
    pub start: u32,
    /// 0-based, exclusive.
    pub end: u32,
    pub strand: Strand,
    pub counts: Counts,
}

impl Intron {
    pub fn new(chrom: impl Into<String>, start: u32, end: u32, strand: Strand) -> Self {
        Self {
            chrom: chrom.into(),
            start,
            end,
            strand,
            counts: Counts::default(),
        }
    }

    pub fn length(&self) -> u32 {
        self.end.saturating_sub(self.start)
    }
}

/// Load the intron table.
///
/// The table is tab-delimited with `chrom, start, end, strand` as its first
/// four columns; further columns are ignored. Lines starting with `#` and
/// blank lines are skipped. Coordinates are 0-based half-open, the same
/// convention as BAM positions. Introns keep file order, which is also the
/// output order.
pub fn load_introns(path: &Path) -> Result<Vec<Intron>> {
    let file = File::open(path)
        .with_context(|| format!("failed to open intron file {}", path.display()))?;
    read_introns(BufReader::new(file))
        .with_context(|| format!("failed to read intron file {}", path.display()))
}

pub fn read_introns<R: BufRead>(reader: R) -> Result<Vec<Intron>> {
    let mut introns = Vec::new();
    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim_end_matches('\r');
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let intron = parse_line(line).with_context(|| format!("malformed line {}", i + 1))?;
        introns.push(intron);
    }
    Ok(introns)
}

fn parse_line(line: &str) -> Result<Intron> {
    let mut fields = line.split('\t');
    let mut next = |name: &str| {
        fields
            .next()
            .filter(|f| !f.is_empty())
            .ok_or_else(|| anyhow!("missing {name} column"))
    };

    let chrom = next("chrom")?;
    let start: u32 = next("start")?
        .parse()
        .context("start is not a non-negative integer")?;
    let end: u32 = next("end")?
        .parse()
        .context("end is not a non-negative integer")?;
    let strand: Strand = next("strand")?.parse()?;

    if end < start {
        bail!("end {end} is before start {start}");
    }

    Ok(Intron::new(chrom, start, end, strand))
}
