mod common;

use common::cigar;
use iucount_rs::alignment::blocks;
use iucount_rs::Block;

fn walk(start: u32, ops: &str) -> Vec<(u32, u32)> {
    blocks(start, &cigar(ops)).map(|b| (b.start, b.end)).collect()
}

#[test]
fn unspliced_read_is_one_block() {
    assert_eq!(walk(100, "50M"), vec![(100, 150)]);
}

#[test]
fn splice_gaps_split_blocks() {
    assert_eq!(walk(80, "20M100N60M"), vec![(80, 100), (200, 260)]);
    assert_eq!(
        walk(0, "10M5N10M5N10M"),
        vec![(0, 10), (15, 25), (30, 40)]
    );
}

#[test]
fn deletions_extend_and_clips_do_not() {
    // 5S and 2I consume no reference; 3D does
    assert_eq!(walk(1000, "5S10M2I5M3D5M100N20M4S"), vec![(1000, 1023), (1123, 1143)]);
    assert_eq!(walk(10, "3H4=1X5=3H"), vec![(10, 20)]);
}

#[test]
fn empty_cigar_has_no_blocks() {
    assert!(walk(500, "").is_empty());
}

#[test]
fn trailing_gap_does_not_open_a_block() {
    assert_eq!(walk(100, "10M50N"), vec![(100, 110)]);
}

#[test]
fn leading_gap_yields_an_empty_block() {
    assert_eq!(walk(100, "50N10M"), vec![(100, 100), (150, 160)]);
}

#[test]
fn gap_between_blocks() {
    let b: Vec<Block> = blocks(80, &cigar("20M100N60M")).collect();
    assert_eq!(b[0].gap_to(&b[1]), Block::new(100, 200));
    assert_eq!(b[0].len(), 20);
    assert_eq!(b[1].len(), 60);
}
