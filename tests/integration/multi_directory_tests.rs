use filededupe::duplicates::{DuplicateFinder, FingerprintIndex};
use std::fs::{self, File};
use std::io::Write;
use tempfile::tempdir;

#[test]
fn test_scan_two_non_overlapping_directories() {
    let dir1 = tempdir().unwrap();
    let dir2 = tempdir().unwrap();

    File::create(dir1.path().join("a.txt"))
        .unwrap()
        .write_all(b"dup")
        .unwrap();
    File::create(dir2.path().join("b.txt"))
        .unwrap()
        .write_all(b"dup")
        .unwrap();

    let finder = DuplicateFinder::with_defaults();
    let (groups, summary) = finder
        .find_duplicates_in_paths(&[dir1.path().to_path_buf(), dir2.path().to_path_buf()])
        .unwrap();

    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].len(), 2);
    assert_eq!(summary.total_files, 2);
    assert_eq!(summary.roots.len(), 2);
}

#[test]
fn test_group_order_follows_argument_order() {
    let dir1 = tempdir().unwrap();
    let dir2 = tempdir().unwrap();
    fs::write(dir1.path().join("first"), "same").unwrap();
    fs::write(dir2.path().join("second"), "same").unwrap();

    let finder = DuplicateFinder::with_defaults();
    let (groups, _) = finder
        .find_duplicates_in_paths(&[dir2.path().to_path_buf(), dir1.path().to_path_buf()])
        .unwrap();

    assert!(groups[0].paths[0].ends_with("second"));
    assert!(groups[0].paths[1].ends_with("first"));
}

#[test]
fn test_cross_directory_duplicate_detection() {
    let dir1 = tempdir().unwrap();
    let dir2 = tempdir().unwrap();
    let dir3 = tempdir().unwrap();

    for (dir, name) in [(&dir1, "1.txt"), (&dir2, "2.txt"), (&dir3, "3.txt")] {
        let mut f = File::create(dir.path().join(name)).unwrap();
        f.write_all(b"triple").unwrap();
        f.sync_all().unwrap();
    }

    let finder = DuplicateFinder::with_defaults();
    let (groups, summary) = finder
        .find_duplicates_in_paths(&[
            dir1.path().to_path_buf(),
            dir2.path().to_path_buf(),
            dir3.path().to_path_buf(),
        ])
        .unwrap();

    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].len(), 3);
    assert_eq!(summary.duplicate_files, 3);
}

#[test]
fn test_overlapping_roots_index_a_file_once() {
    let dir = tempdir().unwrap();
    let sub = dir.path().join("sub");
    fs::create_dir(&sub).unwrap();
    fs::write(sub.join("only.txt"), "content").unwrap();

    let finder = DuplicateFinder::with_defaults();
    let (groups, summary) = finder
        .find_duplicates_in_paths(&[dir.path().to_path_buf(), sub.clone()])
        .unwrap();

    // Both roots see the file, only the first one indexes it
    assert_eq!(summary.total_files, 2);
    assert_eq!(summary.fingerprinted, 1);
    assert_eq!(summary.roots[1].already_indexed, 1);
    assert!(groups.is_empty());
    assert_eq!(summary.duplicate_files, 0);
}

#[test]
fn test_shared_index_across_scan_root_calls() {
    let dir1 = tempdir().unwrap();
    let dir2 = tempdir().unwrap();
    fs::write(dir1.path().join("a"), "alpha").unwrap();
    fs::write(dir2.path().join("b"), "alpha").unwrap();
    fs::write(dir2.path().join("c"), "beta").unwrap();

    let finder = DuplicateFinder::with_defaults();
    let mut index = FingerprintIndex::new();

    let first = finder.scan_root(dir1.path(), &mut index).unwrap();
    assert_eq!(first.files_found, 1);
    assert!(finder.finish(&index).groups.is_empty());

    let second = finder.scan_root(dir2.path(), &mut index).unwrap();
    assert_eq!(second.files_found, 2);

    let report = finder.finish(&index);
    assert_eq!(report.groups.len(), 1);
    assert_eq!(report.duplicate_count, 2);
    assert_eq!(index.file_count(), 3);
}

#[test]
fn test_same_root_twice_reports_no_self_duplicates() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a"), "1").unwrap();
    fs::write(dir.path().join("b"), "2").unwrap();

    let finder = DuplicateFinder::with_defaults();
    let (groups, summary) = finder
        .find_duplicates_in_paths(&[dir.path().to_path_buf(), dir.path().to_path_buf()])
        .unwrap();

    assert!(groups.is_empty());
    assert_eq!(summary.duplicate_files, 0);
    assert_eq!(summary.fingerprinted, 2);
}
