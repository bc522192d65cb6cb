use crate::alignment::Alignment;
use anyhow::{Context, Result};
use noodles::bam;
use noodles::bgzf::{self, VirtualPosition};
use noodles::sam::alignment::record::data::field::{Tag, Value};
use std::fs::File;
use std::io;
use std::path::Path;

/// Sequential access to a coordinate-sorted alignment stream.
///
/// Offsets are opaque positions handed out by [`AlignmentSource::offset`]
/// and accepted back by [`AlignmentSource::seek`].
pub trait AlignmentSource {
    /// Position the stream before its first record.
    fn rewind(&mut self) -> io::Result<()>;

    /// Offset of the next record to be read.
    fn offset(&self) -> u64;

    fn seek(&mut self, offset: u64) -> io::Result<()>;

    /// Decode the next record into `alignment`. Returns `false` at end of stream.
    fn read_alignment(&mut self, alignment: &mut Alignment) -> io::Result<bool>;
}

pub struct BamInput {
    pub reference_names: Vec<String>,
    reader: bam::io::Reader<bgzf::Reader<File>>,
    record: bam::Record,
    first_record: VirtualPosition,
}

impl BamInput {
    /// Open a BAM file, or standard input when `path` is `None`.
    ///
    /// Standard input is spooled to an anonymous temporary file first, since
    /// the indexing pass needs to rewind and seek.
    pub fn open(path: Option<&Path>) -> Result<Self> {
        let file = match path {
            Some(path) => File::open(path)
                .with_context(|| format!("failed to open BAM file {}", path.display()))?,
            None => spool_stdin()?,
        };
        Self::from_file(file)
    }

    fn from_file(file: File) -> Result<Self> {
        let mut reader = bam::io::Reader::new(file);
        let header = reader.read_header().context("failed to read BAM header")?;
        let reference_names = header
            .reference_sequences()
            .keys()
            .map(|name| name.to_string())
            .collect();
        let first_record = reader.get_ref().virtual_position();
        Ok(Self {
            reference_names,
            reader,
            record: bam::Record::default(),
            first_record,
        })
    }
}

fn spool_stdin() -> Result<File> {
    use std::io::{Seek, SeekFrom};

    let mut file = tempfile::tempfile().context("failed to create spool file for stdin")?;
    let bytes = io::copy(&mut io::stdin().lock(), &mut file).context("failed to read stdin")?;
    file.seek(SeekFrom::Start(0))?;
    tracing::debug!(bytes, "spooled standard input");
    Ok(file)
}

impl AlignmentSource for BamInput {
    fn rewind(&mut self) -> io::Result<()> {
        self.reader.get_mut().seek(self.first_record)?;
        Ok(())
    }

    fn offset(&self) -> u64 {
        u64::from(self.reader.get_ref().virtual_position())
    }

    fn seek(&mut self, offset: u64) -> io::Result<()> {
        self.reader.get_mut().seek(VirtualPosition::from(offset))?;
        Ok(())
    }

    fn read_alignment(&mut self, alignment: &mut Alignment) -> io::Result<bool> {
        if self.reader.read_record(&mut self.record)? == 0 {
            return Ok(false);
        }
        decode(&self.record, alignment)?;
        Ok(true)
    }
}

fn decode(record: &bam::Record, alignment: &mut Alignment) -> io::Result<()> {
    alignment.clear();
    alignment.reference_id = record.reference_sequence_id().transpose()?;
    if let Some(start) = record.alignment_start().transpose()? {
        // noodles positions are 1-based
        alignment.position = u32::try_from(usize::from(start) - 1)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    }
    alignment.flags = record.flags();
    for op in record.cigar().iter() {
        alignment.cigar.push(op?);
    }
    alignment.hit_count = match record.data().get(&Tag::ALIGNMENT_HIT_COUNT) {
        Some(value) => int_value(&value?),
        None => None,
    };
    Ok(())
}

fn int_value(value: &Value<'_>) -> Option<i64> {
    match value {
        Value::Int8(n) => Some(i64::from(*n)),
        Value::UInt8(n) => Some(i64::from(*n)),
        Value::Int16(n) => Some(i64::from(*n)),
        Value::UInt16(n) => Some(i64::from(*n)),
        Value::Int32(n) => Some(i64::from(*n)),
        Value::UInt32(n) => Some(i64::from(*n)),
        _ => None,
    }
}
