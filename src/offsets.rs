use crate::alignment::Alignment;
use crate::bam_input::AlignmentSource;
use crate::error::{Error, Result};
use crate::types::{HashMap, HashMapExt, RefId};

/// Stream offset of the first record of every reference with at least one
/// placed record, in the order references appear in the stream.
#[derive(Debug, Clone, Default)]
pub struct OffsetTable {
    entries: Vec<(RefId, u64)>,
    lookup: HashMap<RefId, usize>,
}

impl OffsetTable {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            lookup: HashMap::new(),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (RefId, u64)> + '_ {
        self.entries.iter().copied()
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    fn insert(&mut self, reference_id: RefId, offset: u64) -> Result<()> {
        if self.lookup.contains_key(&reference_id) {
            return Err(Error::NonContiguousReference { reference_id });
        }
        self.lookup.insert(reference_id, self.entries.len());
        self.entries.push((reference_id, offset));
        Ok(())
    }
}

/// Validate sort order in one forward pass and record where each reference
/// starts.
///
/// Fails when a reference reappears after another one, or when a placed
/// record follows records without a reference. A position lower than the
/// previous one on the same reference is an error when `strict` is set and
/// a warning otherwise. The source is rewound before and after the pass;
/// `alignment` is used as the decode buffer.
pub fn build_offset_table<S: AlignmentSource>(
    source: &mut S,
    alignment: &mut Alignment,
    strict: bool,
) -> Result<OffsetTable> {
    source.rewind()?;

    let mut table = OffsetTable::new();
    let mut last_reference: Option<RefId> = None;
    let mut last_position = 0u32;
    let mut last_offset = source.offset();
    let mut unplaced_seen = false;
    let mut records = 0u64;

    while source.read_alignment(alignment)? {
        records += 1;
        let reference = alignment.reference_id;

        if alignment.flags.is_unmapped() && reference.is_none() {
            unplaced_seen = true;
        }

        match reference {
            Some(reference_id) if reference != last_reference => {
                if unplaced_seen {
                    return Err(Error::MappedAfterUnmapped { reference_id });
                }
                table.insert(reference_id, last_offset)?;
            }
            Some(reference_id) if alignment.position < last_position => {
                let err = Error::OutOfOrder {
                    reference_id,
                    position: alignment.position,
                    previous: last_position,
                };
                if strict {
                    return Err(err);
                }
                tracing::warn!("{err}");
            }
            _ => {}
        }

        last_reference = reference;
        last_offset = source.offset();
        last_position = alignment.position;
    }

    tracing::debug!(records, references = table.len(), "indexed alignment stream");
    source.rewind()?;
    Ok(table)
}
