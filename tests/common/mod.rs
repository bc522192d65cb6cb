#![allow(dead_code)]

use iucount_rs::{Alignment, AlignmentSource};
use noodles::sam::alignment::record::cigar::{op::Kind, Op};
use noodles::sam::alignment::record::Flags;
use std::io;

/// In-memory alignment stream. Offsets are record indices.
pub struct MemorySource {
    records: Vec<Alignment>,
    next: usize,
    /// Records served once the stream has been rewound `swap_after` times.
    replacement: Option<(usize, Vec<Alignment>)>,
    rewinds: usize,
}

impl MemorySource {
    pub fn new(records: Vec<Alignment>) -> Self {
        Self {
            records,
            next: 0,
            replacement: None,
            rewinds: 0,
        }
    }

    /// A stream whose content changes after `rewinds` rewinds, to simulate a
    /// source that is not stable between the indexing and counting passes.
    pub fn changing_after(records: Vec<Alignment>, rewinds: usize, later: Vec<Alignment>) -> Self {
        Self {
            replacement: Some((rewinds, later)),
            ..Self::new(records)
        }
    }
}

impl AlignmentSource for MemorySource {
    fn rewind(&mut self) -> io::Result<()> {
        self.next = 0;
        self.rewinds += 1;
        let swap = matches!(&self.replacement, Some((after, _)) if self.rewinds >= *after);
        if swap {
            if let Some((_, later)) = self.replacement.take() {
                self.records = later;
            }
        }
        Ok(())
    }

    fn offset(&self) -> u64 {
        self.next as u64
    }

    fn seek(&mut self, offset: u64) -> io::Result<()> {
        self.next = offset as usize;
        Ok(())
    }

    fn read_alignment(&mut self, alignment: &mut Alignment) -> io::Result<bool> {
        match self.records.get(self.next) {
            Some(record) => {
                alignment.clone_from(record);
                self.next += 1;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

/// Parse a compact CIGAR such as `20M100N60M`.
pub fn cigar(s: &str) -> Vec<Op> {
    let mut ops = Vec::new();
    let mut len = 0usize;
    for c in s.chars() {
        if let Some(d) = c.to_digit(10) {
            len = len * 10 + d as usize;
            continue;
        }
        let kind = match c {
            'M' => Kind::Match,
            'I' => Kind::Insertion,
            'D' => Kind::Deletion,
            'N' => Kind::Skip,
            'S' => Kind::SoftClip,
            'H' => Kind::HardClip,
            'P' => Kind::Pad,
            '=' => Kind::SequenceMatch,
            'X' => Kind::SequenceMismatch,
            _ => panic!("bad CIGAR op {c}"),
        };
        ops.push(Op::new(kind, len));
        len = 0;
    }
    ops
}

pub fn mapped(reference_id: usize, position: u32, ops: &str) -> Alignment {
    Alignment {
        reference_id: Some(reference_id),
        position,
        flags: Flags::empty(),
        cigar: cigar(ops),
        hit_count: Some(1),
    }
}

pub fn unplaced() -> Alignment {
    Alignment {
        flags: Flags::UNMAPPED,
        ..Alignment::default()
    }
}

pub fn names(names: &[&str]) -> Vec<String> {
    names.iter().map(|n| n.to_string()).collect()
}
