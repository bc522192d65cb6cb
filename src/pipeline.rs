use crate::alignment::Alignment;
use crate::annotation::Intron;
use crate::bam_input::AlignmentSource;
use crate::error::{Error, Result};
use crate::index::IntronIndex;
use crate::matcher::ReadMatcher;
use crate::offsets::build_offset_table;
use crate::strand::{resolve_strand, LibraryType};

pub const DEFAULT_MIN_SPAN: u32 = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountConfig {
    pub library_type: LibraryType,
    /// Paired-end library: only proper pairs are counted and strand is taken
    /// from mate identity.
    pub paired: bool,
    /// Only count alignments with `NH:i:1`.
    pub unique: bool,
    pub min_span: u32,
    /// Treat a decreasing position as fatal. When off, such reads are
    /// counted by rescanning the reference's introns from the start.
    pub strict_sort: bool,
}

impl Default for CountConfig {
    fn default() -> Self {
        Self {
            library_type: LibraryType::Unstranded,
            paired: false,
            unique: false,
            min_span: DEFAULT_MIN_SPAN,
            strict_sort: true,
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Stats {
    pub references: u64,
    pub total_records: u64,
    pub counted_reads: u64,
    pub unmapped_reads: u64,
    pub improper_pairs: u64,
    pub multimapped_reads: u64,
    pub undefined_strand: u64,
    pub unplaced_introns: u64,
}

/// Count inclusion, containment and skip evidence for every intron.
///
/// The source is indexed first, so an unsorted stream fails before any
/// counter is touched. Each reference is then scanned from its first record
/// until the reference changes. `reference_names` must follow the source's
/// reference ids.
pub fn count<S: AlignmentSource>(
    source: &mut S,
    reference_names: &[String],
    introns: &mut [Intron],
    config: &CountConfig,
) -> Result<Stats> {
    let mut alignment = Alignment::default();
    let offsets = build_offset_table(source, &mut alignment, config.strict_sort)?;
    let index = IntronIndex::build(introns, reference_names);

    let mut stats = Stats {
        unplaced_introns: index.unplaced() as u64,
        ..Stats::default()
    };
    if index.unplaced() > 0 {
        tracing::warn!(
            introns = index.unplaced(),
            "introns on references missing from the alignment header are left at zero"
        );
    }

    let mut matcher = ReadMatcher::new(config.min_span);

    for (reference_id, offset) in offsets.iter() {
        let reference = index
            .reference(reference_id)
            .ok_or(Error::UnknownReference {
                reference_id,
                n_references: index.n_references(),
            })?;
        tracing::info!("processing {}", reference_names[reference_id]);
        stats.references += 1;

        source.seek(offset)?;
        let mut guide = 0usize;
        let mut last_position = 0u32;

        while source.read_alignment(&mut alignment)? {
            if alignment.reference_id != Some(reference_id) {
                break;
            }
            stats.total_records += 1;

            // Only reachable in lenient mode, or when the stream changed
            // after indexing.
            let behind = alignment.position < last_position;
            if behind && config.strict_sort {
                return Err(Error::ScanOutOfOrder {
                    reference_id,
                    position: alignment.position,
                    previous: last_position,
                });
            }
            last_position = last_position.max(alignment.position);

            if alignment.flags.is_unmapped() {
                stats.unmapped_reads += 1;
                continue;
            }
            if config.paired && !alignment.flags.is_properly_segmented() {
                stats.improper_pairs += 1;
                continue;
            }
            if config.unique && alignment.hit_count != Some(1) {
                stats.multimapped_reads += 1;
                continue;
            }
            let Some(strand) = resolve_strand(config.library_type, config.paired, alignment.flags)
            else {
                stats.undefined_strand += 1;
                continue;
            };

            if behind {
                // The guide may already be past introns this read touches;
                // rescan from the start and keep the guide of the sorted reads.
                matcher.count_read(alignment.blocks(), strand, introns, reference, 0);
            } else {
                guide = matcher.count_read(alignment.blocks(), strand, introns, reference, guide);
            }
            stats.counted_reads += 1;
        }
    }

    Ok(stats)
}
