mod common;

use common::{mapped, unplaced, MemorySource};
use iucount_rs::offsets::build_offset_table;
use iucount_rs::{Alignment, AlignmentSource, Error};

fn index(records: Vec<Alignment>, strict: bool) -> (Result<Vec<(usize, u64)>, Error>, MemorySource) {
    let mut source = MemorySource::new(records);
    let mut alignment = Alignment::default();
    let result = build_offset_table(&mut source, &mut alignment, strict)
        .map(|table| table.iter().collect());
    (result, source)
}

#[test]
fn records_first_offset_of_each_reference() {
    let records = vec![
        mapped(0, 10, "10M"),
        mapped(0, 20, "10M"),
        mapped(1, 5, "10M"),
        mapped(3, 0, "10M"),
        mapped(3, 0, "10M"),
        unplaced(),
        unplaced(),
    ];
    let (table, source) = index(records, true);
    assert_eq!(table.unwrap(), vec![(0, 0), (1, 2), (3, 3)]);
    // rewound for the counting pass
    assert_eq!(source.offset(), 0);
}

#[test]
fn placed_unmapped_records_keep_their_slot() {
    let mut mate = mapped(0, 30, "");
    mate.flags = noodles::sam::alignment::record::Flags::UNMAPPED;
    let records = vec![mapped(0, 30, "10M"), mate, mapped(1, 0, "10M")];
    let (table, _) = index(records, true);
    assert_eq!(table.unwrap(), vec![(0, 0), (1, 2)]);
}

#[test]
fn reference_seen_twice_is_rejected() {
    let records = vec![mapped(0, 10, "10M"), mapped(1, 10, "10M"), mapped(0, 50, "10M")];
    let (table, _) = index(records, true);
    assert!(matches!(
        table,
        Err(Error::NonContiguousReference { reference_id: 0 })
    ));
}

#[test]
fn mapped_after_unplaced_is_rejected() {
    let records = vec![mapped(0, 10, "10M"), unplaced(), mapped(1, 10, "10M")];
    let (table, _) = index(records, true);
    assert!(matches!(
        table,
        Err(Error::MappedAfterUnmapped { reference_id: 1 })
    ));
}

#[test]
fn decreasing_position_is_rejected_when_strict() {
    let records = vec![mapped(0, 100, "10M"), mapped(0, 99, "10M")];
    let (table, _) = index(records.clone(), true);
    assert!(matches!(
        table,
        Err(Error::OutOfOrder {
            reference_id: 0,
            position: 99,
            previous: 100
        })
    ));

    let (table, _) = index(records, false);
    assert_eq!(table.unwrap(), vec![(0, 0)]);
}

#[test]
fn position_resets_on_new_reference() {
    let records = vec![mapped(0, 5000, "10M"), mapped(1, 10, "10M")];
    let (table, _) = index(records, true);
    assert_eq!(table.unwrap(), vec![(0, 0), (1, 1)]);
}

#[test]
fn empty_stream_has_no_entries() {
    let (table, _) = index(Vec::new(), true);
    assert!(table.unwrap().is_empty());
}
