use crate::alignment::Block;
use crate::annotation::{Intron, Strand};
use crate::index::ReferenceIntrons;
use crate::types::{HashSet, HashSetExt};

/// Matches the exonic blocks of one read at a time against the introns of a
/// reference.
///
/// Inclusion and containment are first collected per read so that a read
/// overlapping an intron with several blocks still counts once; the scratch
/// sets are reused from read to read.
#[derive(Debug)]
pub struct ReadMatcher {
    min_span: u32,
    included: HashSet<usize>,
    contained: HashSet<usize>,
}

impl ReadMatcher {
    pub fn new(min_span: u32) -> Self {
        Self {
            min_span,
            included: HashSet::new(),
            contained: HashSet::new(),
        }
    }

    /// Count one read and return the guide to start the next read on the
    /// same reference from.
    ///
    /// The guide is carried between the blocks of this read, but the value
    /// handed back is the one reached after the first block. Reads arrive in
    /// start order, so every intron the next read can touch lies at or after
    /// that point.
    pub fn count_read<I>(
        &mut self,
        blocks: I,
        strand: Strand,
        introns: &mut [Intron],
        reference: &ReferenceIntrons,
        guide: usize,
    ) -> usize
    where
        I: IntoIterator<Item = Block>,
    {
        let mut next_guide = guide;
        let mut cursor = guide;
        let mut previous: Option<Block> = None;

        for block in blocks {
            cursor = self.scan_block(block, strand, introns, reference, cursor);
            match previous {
                None => next_guide = cursor,
                Some(previous) => self.match_junction(previous, block, strand, introns, reference),
            }
            previous = Some(block);
        }

        for i in self.included.drain() {
            introns[i].counts.inclusion += 1;
        }
        for i in self.contained.drain() {
            introns[i].counts.containment += 1;
        }

        next_guide
    }

    /// Mark the introns `block` overlaps by at least the minimum span.
    ///
    /// Introns ending at or before the block start are passed over for good;
    /// the returned guide is the first one still ending after it.
    pub fn scan_block(
        &mut self,
        block: Block,
        strand: Strand,
        introns: &[Intron],
        reference: &ReferenceIntrons,
        guide: usize,
    ) -> usize {
        let sorted = &reference.by_start;
        let min_span = i64::from(self.min_span);
        let block_start = i64::from(block.start);
        let block_end = i64::from(block.end);

        let mut i = guide;
        while i < sorted.len() && introns[sorted[i]].end <= block.start {
            i += 1;
        }
        let guide = i;

        while i < sorted.len() && introns[sorted[i]].start < block.end {
            let idx = sorted[i];
            i += 1;

            let intron = &introns[idx];
            if !strand.is_compatible(intron.strand) {
                continue;
            }

            let intron_start = i64::from(intron.start);
            let intron_end = i64::from(intron.end);
            let overlap = intron_end.min(block_end) - intron_start.max(block_start);
            if overlap < min_span {
                continue;
            }

            let left_span = intron_start - block_start;
            let right_span = block_end - intron_end;
            if left_span >= min_span || right_span >= min_span {
                self.included.insert(idx);
            }
            if left_span <= 0 && right_span <= 0 {
                self.contained.insert(idx);
            }
        }

        guide
    }

    /// Count a skip for the intron exactly matching the gap between
    /// `previous` and `block`.
    ///
    /// Both flanking blocks must be longer than the minimum span. Unstranded
    /// reads are matched against both strands.
    pub fn match_junction(
        &self,
        previous: Block,
        block: Block,
        strand: Strand,
        introns: &mut [Intron],
        reference: &ReferenceIntrons,
    ) {
        if previous.len() <= self.min_span || block.len() <= self.min_span {
            return;
        }

        let gap = previous.gap_to(&block);
        if strand != Strand::Reverse {
            if let Some(i) = reference.junction(Strand::Forward, gap.start, gap.end) {
                introns[i].counts.skip += 1;
            }
        }
        if strand != Strand::Forward {
            if let Some(i) = reference.junction(Strand::Reverse, gap.start, gap.end) {
                introns[i].counts.skip += 1;
            }
        }
    }
}
