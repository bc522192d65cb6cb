use crate::annotation::{Intron, Strand};
use crate::types::{HashMap, HashMapExt, RefId};

/// Introns of one reference, as indices into the intron table.
#[derive(Debug, Clone, Default)]
pub struct ReferenceIntrons {
    /// Sorted by start; order among equal starts follows the table.
    pub by_start: Vec<usize>,
    /// Forward-strand introns keyed by exact `(start, end)`.
    forward_junctions: HashMap<(u32, u32), usize>,
    /// Reverse-strand introns keyed by exact `(start, end)`.
    reverse_junctions: HashMap<(u32, u32), usize>,
}

impl ReferenceIntrons {
    /// Intron whose boundaries are exactly `(start, end)` on `strand`.
    ///
    /// Two introns with the same coordinates and strand share one key; only
    /// the one loaded last is reachable here.
    pub fn junction(&self, strand: Strand, start: u32, end: u32) -> Option<usize> {
        let map = match strand {
            Strand::Forward => &self.forward_junctions,
            Strand::Reverse => &self.reverse_junctions,
            Strand::Unstranded => return None,
        };
        map.get(&(start, end)).copied()
    }
}

#[derive(Debug, Clone, Default)]
pub struct IntronIndex {
    references: Vec<ReferenceIntrons>,
    /// Introns on references the alignment header does not know.
    unplaced: usize,
}

impl IntronIndex {
    /// Group introns by reference id, using the order of `reference_names`
    /// (the alignment header) to assign ids.
    pub fn build(introns: &[Intron], reference_names: &[String]) -> Self {
        let mut ids: HashMap<&str, RefId> = HashMap::with_capacity(reference_names.len());
        for (id, name) in reference_names.iter().enumerate() {
            ids.insert(name.as_str(), id);
        }

        let mut references = vec![ReferenceIntrons::default(); reference_names.len()];
        let mut unplaced = 0;

        for (i, intron) in introns.iter().enumerate() {
            let Some(&id) = ids.get(intron.chrom.as_str()) else {
                unplaced += 1;
                continue;
            };
            let reference = &mut references[id];
            reference.by_start.push(i);
            let key = (intron.start, intron.end);
            match intron.strand {
                Strand::Forward => {
                    reference.forward_junctions.insert(key, i);
                }
                Strand::Reverse => {
                    reference.reverse_junctions.insert(key, i);
                }
                Strand::Unstranded => {}
            }
        }

        for reference in &mut references {
            reference.by_start.sort_by_key(|&i| introns[i].start);
        }

        Self {
            references,
            unplaced,
        }
    }

    pub fn reference(&self, reference_id: RefId) -> Option<&ReferenceIntrons> {
        self.references.get(reference_id)
    }

    pub fn n_references(&self) -> usize {
        self.references.len()
    }

    pub fn unplaced(&self) -> usize {
        self.unplaced
    }
}
