//! iucount-rs: count how reads use annotated introns.
//!
//! For every intron in a table, a coordinate-sorted BAM is scanned once and
//! three kinds of evidence are tallied:
//!
//! - **inclusion**: an exonic block of the read reaches into the intron and
//!   extends past one of its boundaries by at least the minimum span;
//! - **containment**: an exonic block lies entirely within the intron
//!   (an intron read exactly end to end is both contained and covered);
//! - **skip**: a splice gap of the read matches the intron boundaries exactly.
//!
//! # Library usage
//!
//! ```no_run
//! use iucount_rs::annotation::load_introns;
//! use iucount_rs::bam_input::BamInput;
//! use iucount_rs::{count, CountConfig};
//! use std::path::Path;
//!
//! # fn main() -> anyhow::Result<()> {
//! let mut introns = load_introns(Path::new("introns.tsv"))?;
//! let mut bam = BamInput::open(Some(Path::new("sorted.bam")))?;
//! let names = bam.reference_names.clone();
//! let stats = count(&mut bam, &names, &mut introns, &CountConfig::default())?;
//! # let _ = stats;
//! # Ok(())
//! # }
//! ```

pub mod alignment;
pub mod annotation;
pub mod bam_input;
pub mod error;
pub mod index;
pub mod matcher;
pub mod offsets;
pub mod output;
pub mod pipeline;
pub mod strand;
pub(crate) mod types;

// Flat re-exports for the most commonly used public types.
pub use alignment::{Alignment, Block};
pub use annotation::{Counts, Intron, Strand};
pub use bam_input::AlignmentSource;
pub use error::Error;
pub use pipeline::{count, CountConfig, Stats};
pub use strand::LibraryType;
pub use types::RefId;
