use std::fs;
use std::io::Write;
use tempfile::{NamedTempFile, TempDir};
use tycho_catalog::query::record::encode;
use tycho_catalog::query::{CatalogRecord, CatalogSearchEngine, RECORD_LEN};
use tycho_catalog::xref::{self, HdMapping};
use tycho_catalog::CatalogError;

fn record(id1: i16, id2: i16, id3: u8, magnitude: f32) -> CatalogRecord {
    CatalogRecord {
        id1,
        id2,
        id3,
        magnitude,
    }
}

fn write_catalog(records: &[CatalogRecord]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    for r in records {
        file.write_all(&encode(r)).unwrap();
    }
    file.flush().unwrap();
    file
}

fn write_text(text: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(text.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

/// Index where groups 1..=9 are empty and group 10 spans records 1 and 2.
fn group_ten_index() -> NamedTempFile {
    let mut text = "1; 1\n".repeat(9);
    text.push_str("1; 3\n");
    write_text(&text)
}

fn bsc_line(hr: u32, hd: u32, vmag: &str) -> String {
    let mut line = vec![b' '; 197];
    line[0..4].copy_from_slice(format!("{:>4}", hr).as_bytes());
    line[25..31].copy_from_slice(format!("{:>6}", hd).as_bytes());
    line[75..77].copy_from_slice(b"00");
    line[102..107].copy_from_slice(format!("{:>5}", vmag).as_bytes());
    String::from_utf8(line).unwrap()
}

#[test]
fn test_two_record_catalog_lookup() {
    let catalog = write_catalog(&[record(10, 5, b'A', 4.32), record(10, 6, b'B', 3.10)]);
    assert_eq!(fs::metadata(catalog.path()).unwrap().len(), 2 * RECORD_LEN as u64);
    let index = group_ten_index();

    let mut engine = CatalogSearchEngine::open(index.path(), catalog.path()).unwrap();

    let hit = engine.lookup(10, 5, b'A').unwrap().expect("expected a record");
    assert_eq!((hit.id1, hit.id2, hit.id3_char()), (10, 5, 'A'));
    assert_eq!(hit.magnitude.to_bits(), 4.32f32.to_bits());

    assert_eq!(engine.lookup(10, 9, b'Z').unwrap(), None);
    assert_eq!(
        engine.lookup(10, 6, b'B').unwrap(),
        Some(record(10, 6, b'B', 3.10))
    );
}

#[test]
fn test_out_of_range_groups() {
    let catalog = write_catalog(&[record(10, 5, b'A', 4.32), record(10, 6, b'B', 3.10)]);
    let index = group_ten_index();
    let mut engine = CatalogSearchEngine::open(index.path(), catalog.path()).unwrap();

    for id1 in [0, 11] {
        let err = engine.lookup(id1, 5, b'A').unwrap_err();
        assert!(matches!(err, CatalogError::OutOfRange { groups: 10, .. }));
        assert!(err.is_recoverable());
    }
}

#[test]
fn test_more_than_fifty_matches_is_capped() {
    let mut records: Vec<_> = (0..60).map(|i| record(2, 7, b'1', i as f32)).collect();
    records.push(record(1, 7, b'1', 99.0));
    let catalog = write_catalog(&records);
    let index = write_text("1; 62\n");
    let mut engine = CatalogSearchEngine::open(index.path(), catalog.path()).unwrap();

    // The genuine group-1 record sits after 60 decoys and is never reached.
    assert_eq!(engine.lookup(1, 7, b'1').unwrap(), None);
}

#[test]
fn test_malformed_index_is_fatal() {
    let catalog = write_catalog(&[record(1, 1, b'1', 1.0)]);
    let index = write_text("1; 2\n2; two\n");

    let err = CatalogSearchEngine::open(index.path(), catalog.path())
        .err()
        .expect("expected error");
    assert!(matches!(err, CatalogError::Format { line: 2, .. }));
    assert!(!err.is_recoverable());
}

#[test]
fn test_full_cross_reference_run() {
    let catalog = write_catalog(&[
        record(10, 5, b'A', 4.32),
        record(10, 6, b'B', 3.10),
    ]);
    let index = group_ten_index();
    let mapping = write_text("# hd tyc\n1000 10 5 A\n2000 10 6 B\n3000 10 9 Z\n4000 12 1 1\n");

    let lines = [
        bsc_line(1, 1000, "4.32"),
        bsc_line(2, 2000, "3.25"),
        bsc_line(3, 3000, "5.00"),
        bsc_line(4, 4000, "6.00"),
        bsc_line(5, 5000, "7.00"),
    ];
    let bsc = write_text(&(lines.join("\n") + "\n"));

    let out_dir = TempDir::new().unwrap();
    let xref_path = out_dir.path().join("bsc_tyc.txt");
    let bsc_out_path = out_dir.path().join("catalog.corrected");

    let mut engine = CatalogSearchEngine::open(index.path(), catalog.path()).unwrap();
    let mapping = HdMapping::open(mapping.path()).unwrap();
    let stats = xref::run_files(&mut engine, &mapping, bsc.path(), &xref_path, &bsc_out_path).unwrap();

    assert_eq!(stats.total, 5);
    assert_eq!(stats.matched, 2);
    assert_eq!(stats.corrected, 1);
    assert_eq!(stats.not_found, 1);
    assert_eq!(stats.out_of_range, 1);
    assert_eq!(stats.unmapped, 1);

    assert_eq!(fs::read_to_string(&xref_path).unwrap(), "1 10-5-A\n2 10-6-B\n");

    let corrected = fs::read_to_string(&bsc_out_path).unwrap();
    let out_lines: Vec<&str> = corrected.lines().collect();
    assert_eq!(out_lines.len(), 5);
    assert_eq!(out_lines[0], lines[0]);
    assert_eq!(&out_lines[1][102..107], " 3.10");
    assert_eq!(&out_lines[1][..102], &lines[1][..102]);
    assert_eq!(&out_lines[1][107..], &lines[1][107..]);
    for (out, original) in out_lines[2..].iter().zip(&lines[2..]) {
        assert_eq!(*out, original.as_str());
    }
}
