use filededupe::duplicates::{DuplicateFinder, FingerprintIndex};
use filededupe::scanner::{Fingerprinter, WalkerConfig};
use std::collections::BTreeSet;
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;
use tempfile::tempdir;

fn scan(root: &Path, exclude_subdirs: bool) -> (FingerprintIndex, usize) {
    let config = filededupe::duplicates::FinderConfig::default()
        .with_walker_config(WalkerConfig::new(exclude_subdirs, false));
    let finder = DuplicateFinder::new(config);
    let mut index = FingerprintIndex::new();
    let report = finder.scan_root(root, &mut index).unwrap();
    (index, report.files_found)
}

#[test]
fn test_scan_empty_directory() {
    let dir = tempdir().unwrap();
    let finder = DuplicateFinder::with_defaults();

    let (groups, summary) = finder.find_duplicates(dir.path()).unwrap();

    assert!(groups.is_empty());
    assert_eq!(summary.total_files, 0);
    assert_eq!(summary.duplicate_groups, 0);
    assert!(summary.roots[0].is_empty());
}

#[test]
fn test_scan_single_file() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("only.txt"), "lonely").unwrap();

    let (index, found) = scan(dir.path(), false);

    assert_eq!(found, 1);
    assert_eq!(index.len(), 1);
    assert_eq!(index.file_count(), 1);

    let (groups, total) = filededupe::duplicates::extract(&index);
    assert!(groups.is_empty());
    assert_eq!(total, 0);
}

#[test]
fn test_scan_two_empty_files() {
    let dir = tempdir().unwrap();
    File::create(dir.path().join("a")).unwrap();
    File::create(dir.path().join("b")).unwrap();

    let finder = DuplicateFinder::with_defaults();
    let (groups, summary) = finder.find_duplicates(dir.path()).unwrap();

    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].fingerprint, 0);
    assert_eq!(groups[0].len(), 2);
    assert_eq!(summary.duplicate_files, 2);
}

#[test]
fn test_scan_duplicate_files() {
    let dir = tempdir().unwrap();

    // 2 identical files and 1 unique
    File::create(dir.path().join("a.txt"))
        .unwrap()
        .write_all(b"duplicate")
        .unwrap();
    File::create(dir.path().join("b.txt"))
        .unwrap()
        .write_all(b"duplicate")
        .unwrap();
    File::create(dir.path().join("c.txt"))
        .unwrap()
        .write_all(b"unique")
        .unwrap();

    let finder = DuplicateFinder::with_defaults();
    let (groups, summary) = finder.find_duplicates(dir.path()).unwrap();

    assert_eq!(groups.len(), 1);
    assert_eq!(summary.total_files, 3);
    assert_eq!(summary.duplicate_files, 2);

    let names: BTreeSet<_> = groups[0]
        .paths
        .iter()
        .map(|p| Path::new(p).file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, BTreeSet::from(["a.txt".to_string(), "b.txt".to_string()]));
}

#[test]
fn test_scan_unique_files() {
    let dir = tempdir().unwrap();
    for (name, content) in [("a", "content a"), ("b", "content b"), ("c", "content c")] {
        fs::write(dir.path().join(name), content).unwrap();
    }

    let finder = DuplicateFinder::with_defaults();
    let (groups, summary) = finder.find_duplicates(dir.path()).unwrap();

    assert!(groups.is_empty());
    assert_eq!(summary.total_files, 3);
    assert_eq!(summary.duplicate_files, 0);
}

#[test]
fn test_depth_control() {
    let dir = tempdir().unwrap();
    let nested = dir.path().join("a").join("b");
    fs::create_dir_all(&nested).unwrap();
    fs::write(dir.path().join("top.txt"), "X").unwrap();
    fs::write(nested.join("deep.txt"), "X").unwrap();

    let (with_subdirs, found) = scan(dir.path(), false);
    assert_eq!(found, 2);
    let fp = Fingerprinter::calculate_bytes(b"X");
    assert_eq!(with_subdirs.entries(fp).len(), 2);

    let (top_only, found) = scan(dir.path(), true);
    assert_eq!(found, 1);
    assert_eq!(top_only.entries(fp).len(), 1);
    assert!(filededupe::duplicates::extract(&top_only).0.is_empty());
}

#[test]
fn test_scan_is_idempotent() {
    let dir = tempdir().unwrap();
    fs::create_dir(dir.path().join("sub")).unwrap();
    fs::write(dir.path().join("a"), "one").unwrap();
    fs::write(dir.path().join("b"), "two").unwrap();
    fs::write(dir.path().join("sub").join("c"), "one").unwrap();

    let (first, _) = scan(dir.path(), false);
    let (second, _) = scan(dir.path(), false);

    let keys = |index: &FingerprintIndex| index.keys().collect::<BTreeSet<_>>();
    assert_eq!(keys(&first), keys(&second));

    for fp in first.keys() {
        let a: BTreeSet<_> = first.entries(fp).iter().collect();
        let b: BTreeSet<_> = second.entries(fp).iter().collect();
        assert_eq!(a, b);
    }
}

#[test]
fn test_paths_keep_root_prefix() {
    let dir = tempdir().unwrap();
    fs::create_dir(dir.path().join("nested")).unwrap();
    fs::write(dir.path().join("nested").join("f"), "data").unwrap();

    let (index, _) = scan(dir.path(), false);
    let fp = index.keys().next().unwrap();
    let path = &index.entries(fp)[0];

    assert!(Path::new(path).starts_with(dir.path()));
    assert!(path.ends_with("f"));
}

#[test]
fn test_index_only_holds_scanned_files() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("x"), "1").unwrap();
    fs::write(dir.path().join("y"), "2").unwrap();
    fs::write(dir.path().join("z"), "2").unwrap();

    let (index, found) = scan(dir.path(), false);
    let total: usize = index.iter().map(|(_, paths)| paths.len()).sum();

    assert_eq!(total, found);
    assert_eq!(index.file_count(), found);
}
