use crate::annotation::Strand;
use clap::ValueEnum;
use noodles::sam::alignment::record::Flags;

/// Library protocol, named after the TopHat/Cufflinks `--library-type` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum LibraryType {
    #[default]
    #[value(name = "fr-unstranded")]
    Unstranded,
    /// dUTP and friends: read 1 maps to the reverse of the transcript.
    #[value(name = "fr-firststrand")]
    FirstStrand,
    /// Ligation protocols: read 1 maps to the transcript strand.
    #[value(name = "fr-secondstrand")]
    SecondStrand,
}

/// Infer the transcript strand a read was sequenced from.
///
/// Returns `None` when the flags of a paired read do not place it on either
/// strand (no first/second mate bit, or an orientation the protocol cannot
/// produce). Such reads carry no strand evidence and are not counted.
/// Upstream iucount exits the whole run on such a read instead.
pub fn resolve_strand(library: LibraryType, paired: bool, flags: Flags) -> Option<Strand> {
    let reverse = flags.is_reverse_complemented();
    let mate_reverse = flags.is_mate_reverse_complemented();
    let first = flags.is_first_segment();
    let second = flags.is_last_segment();

    // Orientation of read 1 relative to its pair, as seen from either mate.
    let read1_reverse = (first && reverse) || (second && mate_reverse);
    let read1_forward = (first && mate_reverse) || (second && reverse);

    match library {
        LibraryType::Unstranded => Some(Strand::Unstranded),
        LibraryType::FirstStrand if paired => {
            if read1_reverse {
                Some(Strand::Forward)
            } else if read1_forward {
                Some(Strand::Reverse)
            } else {
                None
            }
        }
        LibraryType::FirstStrand => Some(if reverse { Strand::Forward } else { Strand::Reverse }),
        LibraryType::SecondStrand if paired => {
            if read1_forward {
                Some(Strand::Forward)
            } else if read1_reverse {
                Some(Strand::Reverse)
            } else {
                None
            }
        }
        LibraryType::SecondStrand => Some(if reverse { Strand::Reverse } else { Strand::Forward }),
    }
}
