use filededupe::duplicates::{
    DuplicateFinder, FinderConfig, FinderError, FingerprintIndex, RootErrorPolicy,
};
use std::fs;
use std::path::PathBuf;
use tempfile::tempdir;

#[test]
fn test_missing_root_aborts_by_default() {
    let good = tempdir().unwrap();
    fs::write(good.path().join("a"), "x").unwrap();

    let finder = DuplicateFinder::with_defaults();
    let result = finder.find_duplicates_in_paths(&[
        PathBuf::from("/nonexistent/filededupe/root"),
        good.path().to_path_buf(),
    ]);

    assert!(matches!(result, Err(FinderError::PathNotFound(_))));
}

#[test]
fn test_file_as_root_is_rejected() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("plain.txt");
    fs::write(&file, "content").unwrap();

    let finder = DuplicateFinder::with_defaults();
    let mut index = FingerprintIndex::new();
    let result = finder.scan_root(&file, &mut index);

    assert!(matches!(result, Err(FinderError::NotADirectory(_))));
    assert!(index.is_empty());
}

#[test]
fn test_skip_policy_continues_with_remaining_roots() {
    let good = tempdir().unwrap();
    fs::write(good.path().join("a"), "x").unwrap();
    fs::write(good.path().join("b"), "x").unwrap();

    let config = FinderConfig::default().with_root_error_policy(RootErrorPolicy::Skip);
    let finder = DuplicateFinder::new(config);
    let (groups, summary) = finder
        .find_duplicates_in_paths(&[
            PathBuf::from("/nonexistent/filededupe/root"),
            good.path().to_path_buf(),
        ])
        .unwrap();

    assert_eq!(summary.invalid_roots.len(), 1);
    assert_eq!(summary.roots.len(), 1);
    assert_eq!(groups.len(), 1);
}

#[cfg(unix)]
#[test]
fn test_unreadable_file_is_skipped() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a"), "same").unwrap();
    fs::write(dir.path().join("b"), "same").unwrap();
    let locked = dir.path().join("locked");
    fs::write(&locked, "same").unwrap();
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

    // Root ignores permission bits; nothing to observe in that case
    if fs::File::open(&locked).is_ok() {
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o644)).unwrap();
        return;
    }

    let finder = DuplicateFinder::with_defaults();
    let mut index = FingerprintIndex::new();
    let report = finder.scan_root(dir.path(), &mut index).unwrap();

    assert_eq!(report.files_found, 3);
    assert_eq!(report.fingerprinted, 2);
    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].path(), locked.as_path());
    assert_eq!(index.file_count(), 2);

    let result = finder.finish(&index);
    assert_eq!(result.duplicate_count, 2);

    fs::set_permissions(&locked, fs::Permissions::from_mode(0o644)).unwrap();
}

#[cfg(unix)]
#[test]
fn test_unreadable_subdirectory_keeps_other_files() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempdir().unwrap();
    fs::write(dir.path().join("visible"), "v").unwrap();
    let hidden = dir.path().join("closed");
    fs::create_dir(&hidden).unwrap();
    fs::write(hidden.join("inside"), "i").unwrap();
    fs::set_permissions(&hidden, fs::Permissions::from_mode(0o000)).unwrap();

    if fs::read_dir(&hidden).is_ok() {
        fs::set_permissions(&hidden, fs::Permissions::from_mode(0o755)).unwrap();
        return;
    }

    let finder = DuplicateFinder::with_defaults();
    let mut index = FingerprintIndex::new();
    let report = finder.scan_root(dir.path(), &mut index).unwrap();

    assert_eq!(report.files_found, 1);
    assert_eq!(report.fingerprinted, 1);
    assert!(!report.scan_errors.is_empty());

    fs::set_permissions(&hidden, fs::Permissions::from_mode(0o755)).unwrap();
}
