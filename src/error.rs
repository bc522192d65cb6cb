use crate::types::RefId;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("unsorted alignments: reference {reference_id} starts after unplaced unmapped records")]
    MappedAfterUnmapped { reference_id: RefId },

    #[error("reference {reference_id} is not contiguous in the alignment stream")]
    NonContiguousReference { reference_id: RefId },

    #[error("unsorted alignments: position {position} follows {previous} on reference {reference_id}")]
    OutOfOrder {
        reference_id: RefId,
        position: u32,
        previous: u32,
    },

    #[error("unsorted alignments while counting: position {position} follows {previous} on reference {reference_id}")]
    ScanOutOfOrder {
        reference_id: RefId,
        position: u32,
        previous: u32,
    },

    #[error("alignment on reference {reference_id} which is not in the header ({n_references} references)")]
    UnknownReference {
        reference_id: RefId,
        n_references: usize,
    },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
