use crate::types::RefId;
use noodles::sam::alignment::record::cigar::{op::Kind, Op};
use noodles::sam::alignment::record::Flags;
use std::slice;

/// Reusable working copy of one decoded alignment record.
///
/// Sources decode into the same `Alignment` for every record, so the CIGAR
/// vector keeps its capacity across the whole pass.
#[derive(Debug, Clone)]
pub struct Alignment {
    /// `None` for records without a reference (unplaced unmapped reads).
    pub reference_id: Option<RefId>,
    /// 0-based leftmost reference position.
    pub position: u32,
    pub flags: Flags,
    pub cigar: Vec<Op>,
    /// Value of the `NH` tag, if present and integral.
    pub hit_count: Option<i64>,
}

impl Default for Alignment {
    fn default() -> Self {
        Self {
            reference_id: None,
            position: 0,
            flags: Flags::empty(),
            cigar: Vec::new(),
            hit_count: None,
        }
    }
}

impl Alignment {
    pub fn clear(&mut self) {
        self.reference_id = None;
        self.position = 0;
        self.flags = Flags::empty();
        self.cigar.clear();
        self.hit_count = None;
    }

    pub fn blocks(&self) -> Blocks<'_> {
        blocks(self.position, &self.cigar)
    }
}

/// Half-open `[start, end)` reference interval covered by one exonic block,
/// or the splice gap between two blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Block {
    pub start: u32,
    pub end: u32,
}

impl Block {
    pub fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> u32 {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    /// The splice gap between this block and the next block of the same read.
    pub fn gap_to(&self, next: &Block) -> Block {
        Block::new(self.end, next.start)
    }
}

/// Split a CIGAR into exonic blocks at `N` operations.
///
/// `M`, `D`, `=` and `X` extend the current block; `I`, `S`, `H` and `P` do
/// not consume the reference. A block is started for every run of operations
/// following the alignment start or an `N`, so an empty CIGAR yields nothing
/// and a trailing `N` does not produce an empty final block.
pub fn blocks(start: u32, cigar: &[Op]) -> Blocks<'_> {
    Blocks {
        ops: cigar.iter(),
        cursor: start,
    }
}

#[derive(Debug, Clone)]
pub struct Blocks<'a> {
    ops: slice::Iter<'a, Op>,
    cursor: u32,
}

impl Iterator for Blocks<'_> {
    type Item = Block;

    fn next(&mut self) -> Option<Block> {
        if self.ops.as_slice().is_empty() {
            return None;
        }

        let start = self.cursor;
        for op in self.ops.by_ref() {
            let len = u32::try_from(op.len()).unwrap_or(u32::MAX);
            match op.kind() {
                Kind::Match | Kind::Deletion | Kind::SequenceMatch | Kind::SequenceMismatch => {
                    self.cursor = self.cursor.saturating_add(len);
                }
                Kind::Skip => {
                    let block = Block::new(start, self.cursor);
                    self.cursor = self.cursor.saturating_add(len);
                    return Some(block);
                }
                // Non-reference-consuming: Insertion, SoftClip, HardClip, Pad
                _ => {}
            }
        }

        Some(Block::new(start, self.cursor))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.ops.len();
        (usize::from(remaining > 0), Some(remaining))
    }
}
