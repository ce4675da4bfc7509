//! Integration tests for the result-file writers

#[allow(dead_code)]
mod helpers;

use std::fs;

use driftkit::header::{BARYV, DELTAF, FCNTR, NAXIS1};
use driftkit::{Error, FileMode, GeneralWriter, Header, Hit, HitWriter};

use helpers::temp_path;

#[test]
fn test_open_close_tracks_live_handle() {
    let path = temp_path("open_close.txt");
    let mut w = GeneralWriter::new(&path, FileMode::Append);
    w.open(None).expect("open append");
    assert!(w.is_open());
    assert_eq!(w.mode(), FileMode::Append);

    w.open(Some(FileMode::Read)).expect("reopen read");
    assert!(w.is_open());
    assert_eq!(w.mode(), FileMode::Read);

    w.close();
    assert!(!w.is_open());

    fs::remove_file(&path).ok();
}

#[test]
fn test_writable_needs_open_writable_handle() {
    let path = temp_path("writable.txt");
    let mut w = GeneralWriter::new(&path, FileMode::Append);
    assert!(!w.writable(), "not writable before open");

    w.open(Some(FileMode::Write)).expect("open write");
    assert!(w.writable());

    w.open(Some(FileMode::Read)).expect("open read");
    assert!(!w.writable());
    assert!(matches!(
        w.write("ignored"),
        Err(Error::NotWritable { mode: FileMode::Read, .. })
    ));

    w.close();
    fs::remove_file(&path).ok();
}

#[test]
fn test_close_is_idempotent() {
    let path = temp_path("close_twice.txt");
    let mut w = GeneralWriter::new(&path, FileMode::Read);
    w.close();
    assert!(!w.writable());
    assert!(!w.is_open());
    w.close();
    assert!(!w.is_open());
}

#[test]
fn test_write_then_read_back() {
    let path = temp_path("round_trip.txt");
    let mut w = GeneralWriter::new(&path, FileMode::Write);
    let text = "This is some text.";

    w.open(None).expect("open write");
    w.write(text).expect("write");
    w.open(Some(FileMode::Read)).expect("open read");
    assert_eq!(w.read_to_string().expect("read"), text);

    w.open(Some(FileMode::Append)).expect("open append");
    w.write(" This should get appended.").expect("append");
    w.open(Some(FileMode::Read)).expect("open read");
    assert_eq!(
        w.read_to_string().expect("read"),
        "This is some text. This should get appended."
    );

    w.close();
    fs::remove_file(&path).ok();
}

#[test]
fn test_reopen_same_mode_keeps_position() {
    let path = temp_path("same_mode.txt");
    let mut w = GeneralWriter::new(&path, FileMode::Write);
    w.open(None).expect("open write");
    w.write("abc").expect("write");
    // same mode: the live handle is kept, no truncation
    w.open(Some(FileMode::Write)).expect("reopen write");
    w.write("def").expect("write");
    w.close();

    assert_eq!(fs::read_to_string(&path).expect("read"), "abcdef");
    fs::remove_file(&path).ok();
}

#[test]
fn test_reopen_read_rewinds() {
    let path = temp_path("reread.txt");
    let mut w = GeneralWriter::new(&path, FileMode::Write);
    w.open(None).expect("open write");
    w.write("abc").expect("write");

    w.open(Some(FileMode::Read)).expect("open read");
    assert_eq!(w.read_to_string().expect("first read"), "abc");
    // same mode again: the live read handle starts over from the beginning
    w.open(Some(FileMode::Read)).expect("reopen read");
    assert!(w.is_open());
    assert_eq!(w.read_to_string().expect("second read"), "abc");
    w.close();
    fs::remove_file(&path).ok();
}

#[test]
fn test_start_over_empties_file() {
    let path = temp_path("start_over.txt");
    let mut w = GeneralWriter::new(&path, FileMode::Write);
    w.open(None).expect("open write");
    w.write("I will be wiped.").expect("write");
    w.open(Some(FileMode::Read)).expect("open read");
    assert_eq!(w.read_to_string().expect("read"), "I will be wiped.");

    w.start_over().expect("start over");
    w.open(Some(FileMode::Read)).expect("open read");
    assert_eq!(w.read_to_string().expect("read"), "");

    w.close();
    fs::remove_file(&path).ok();
}

#[test]
fn test_start_over_rewinds_live_write_handle() {
    let path = temp_path("start_over_live.txt");
    let mut w = GeneralWriter::new(&path, FileMode::Write);
    w.open(None).expect("open write");
    w.write("old contents").expect("write");
    w.start_over().expect("start over");
    assert!(w.is_open());
    w.write("new").expect("write");
    w.close();

    assert_eq!(fs::read_to_string(&path).expect("read"), "new");
    fs::remove_file(&path).ok();
}

#[test]
fn test_start_over_on_closed_writer() {
    let path = temp_path("start_over_closed.txt");
    fs::write(&path, "stale").expect("seed file");
    let mut w = GeneralWriter::new(&path, FileMode::Append);
    w.start_over().expect("start over");
    w.start_over().expect("start over twice");
    assert!(!w.is_open());
    assert_eq!(fs::read_to_string(&path).expect("read"), "");
    fs::remove_file(&path).ok();
}

#[test]
fn test_drop_releases_and_flushes() {
    let path = temp_path("drop.txt");
    {
        let mut w = GeneralWriter::new(&path, FileMode::Append);
        w.open(None).expect("open append");
        w.write("kept").expect("write");
    }
    assert_eq!(fs::read_to_string(&path).expect("read"), "kept");
    fs::remove_file(&path).ok();
}

#[test]
fn test_hit_writer_records() {
    let path = temp_path("hits.dat");
    let header = Header::new()
        .with(NAXIS1, 16i64)
        .with(FCNTR, 100.0)
        .with(DELTAF, 0.5)
        .with(BARYV, 0.0)
        .with("source_name", "Voyager1");

    let mut hits = HitWriter::create(&path).expect("create hits file");
    hits.report_header("synthetic", &header).expect("header");
    for (rank, index) in [(1, 10), (2, 4)] {
        let hit = Hit::from_channel(&header, rank, 0.1, 30.0, index, 16).expect("hit");
        hits.report_hit(&hit).expect("report hit");
    }
    assert_eq!(hits.hits(), 2);
    hits.close();

    let text = fs::read_to_string(&path).expect("read");
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "# Source: synthetic");
    assert!(lines.iter().any(|l| *l == "# NAXIS1: 16"));
    assert!(lines.iter().any(|l| *l == "# source_name: Voyager1"));
    let rows: Vec<&str> = lines.iter().copied().filter(|l| !l.starts_with('#')).collect();
    assert_eq!(rows.len(), 2);
    assert!(rows[0].starts_with("000001\t"));
    assert!(rows[0].ends_with("\t10"));
    assert!(rows[1].contains("98.000000"));

    fs::remove_file(&path).ok();
}
