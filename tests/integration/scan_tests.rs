use dupsweep::duplicates::{DuplicateFinder, FinderConfig, FinderError};
use dupsweep::scanner::Hasher;
use std::fs::{self, File};
use std::io::Write;
use std::path::PathBuf;
use tempfile::tempdir;

fn write(root: &std::path::Path, name: &str, content: &[u8]) -> PathBuf {
    let path = root.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    File::create(&path).unwrap().write_all(content).unwrap();
    path
}

#[test]
fn test_scan_empty_directory() {
    let dir = tempdir().unwrap();
    let finder = DuplicateFinder::with_defaults();

    let (index, summary) = finder.find_duplicates(dir.path()).unwrap();

    assert!(index.is_empty());
    assert_eq!(summary.total_files, 0);
    assert_eq!(summary.duplicate_groups, 0);
}

#[test]
fn test_scan_unique_files() {
    let dir = tempdir().unwrap();
    write(dir.path(), "a.txt", b"content a");
    write(dir.path(), "b.txt", b"content b");
    write(dir.path(), "c.txt", b"content c");

    let (index, summary) = DuplicateFinder::with_defaults()
        .find_duplicates(dir.path())
        .unwrap();

    assert!(index.is_empty());
    assert_eq!(summary.total_files, 3);
    assert_eq!(summary.duplicate_groups, 0);
}

#[test]
fn test_scan_hello_world_scenario() {
    let dir = tempdir().unwrap();
    let a = write(dir.path(), "a.txt", b"hello");
    let b = write(dir.path(), "b.txt", b"hello");
    write(dir.path(), "c.txt", b"world");

    let (index, summary) = DuplicateFinder::with_defaults()
        .find_duplicates(dir.path())
        .unwrap();

    assert_eq!(index.len(), 1);
    let group = &index.groups()[0];
    assert_eq!(group.paths, vec![a.clone(), b]);
    assert_eq!(
        group.digest.to_hex(),
        "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824"
    );
    assert_eq!(group.survivor(), Some(a.as_path()));
    assert_eq!(summary.total_files, 3);
    assert_eq!(summary.duplicate_files, 1);
    assert_eq!(summary.reclaimable_space, 5);
}

#[test]
fn test_scan_nested_directories_discovery_order() {
    let dir = tempdir().unwrap();
    let top = write(dir.path(), "top.txt", b"same");
    let deep = write(dir.path(), "sub/deeper/file.txt", b"same");
    let mid = write(dir.path(), "sub/mid.txt", b"same");
    let zed = write(dir.path(), "zed.txt", b"same");

    let (index, _) = DuplicateFinder::with_defaults()
        .find_duplicates(dir.path())
        .unwrap();

    assert_eq!(index.len(), 1);
    // Entries are visited in file-name order, directories depth-first.
    assert_eq!(index.groups()[0].paths, vec![deep, mid, top, zed]);
}

#[test]
fn test_scan_paths_are_joined_to_root() {
    let dir = tempdir().unwrap();
    write(dir.path(), "x/1.bin", b"data");
    write(dir.path(), "y/2.bin", b"data");

    let (index, _) = DuplicateFinder::with_defaults()
        .find_duplicates(dir.path())
        .unwrap();

    for path in &index.groups()[0].paths {
        assert!(path.starts_with(dir.path()));
    }
}

#[test]
fn test_scan_groups_partition_by_content() {
    let dir = tempdir().unwrap();
    write(dir.path(), "a1", b"alpha");
    write(dir.path(), "b1", b"beta");
    write(dir.path(), "a2", b"alpha");
    write(dir.path(), "b2", b"beta");
    write(dir.path(), "a3", b"alpha");
    write(dir.path(), "solo", b"gamma");

    let (index, summary) = DuplicateFinder::with_defaults()
        .find_duplicates(dir.path())
        .unwrap();

    assert_eq!(index.len(), 2);
    assert_eq!(index.file_count(), 5);
    assert_eq!(summary.duplicate_files, 3);

    let hasher = Hasher::new();
    for group in &index {
        assert!(group.len() >= 2);
        let first = fs::read(&group.paths[0]).unwrap();
        for path in &group.paths {
            assert_eq!(fs::read(path).unwrap(), first);
            assert_eq!(hasher.hash_file(path).unwrap(), group.digest);
        }
    }
}

#[test]
fn test_scan_empty_files_are_duplicates() {
    let dir = tempdir().unwrap();
    write(dir.path(), "empty1", b"");
    write(dir.path(), "empty2", b"");

    let (index, summary) = DuplicateFinder::with_defaults()
        .find_duplicates(dir.path())
        .unwrap();

    assert_eq!(index.len(), 1);
    assert_eq!(summary.reclaimable_space, 0);
}

#[test]
fn test_scan_is_idempotent() {
    let dir = tempdir().unwrap();
    for i in 0..20 {
        write(dir.path(), &format!("d{}/f{}.txt", i % 3, i), format!("{}", i % 4).as_bytes());
    }

    let finder = DuplicateFinder::with_defaults();
    let (first, _) = finder.find_duplicates(dir.path()).unwrap();
    let (second, _) = finder.find_duplicates(dir.path()).unwrap();

    assert_eq!(first.groups(), second.groups());
}

#[test]
fn test_scan_parallel_matches_sequential() {
    let dir = tempdir().unwrap();
    for i in 0..40 {
        write(dir.path(), &format!("d{}/f{}.bin", i % 5, i), &[(i % 6) as u8; 300]);
    }

    let sequential = DuplicateFinder::with_defaults();
    let parallel = DuplicateFinder::new(FinderConfig::default().with_jobs(4).with_block_size(7));

    let (expected, _) = sequential.find_duplicates(dir.path()).unwrap();
    let (actual, _) = parallel.find_duplicates(dir.path()).unwrap();

    assert_eq!(expected.groups(), actual.groups());
}

#[test]
fn test_scan_file_root_is_rejected() {
    let dir = tempdir().unwrap();
    let file = write(dir.path(), "plain.txt", b"not a dir");

    let err = DuplicateFinder::with_defaults()
        .find_duplicates(&file)
        .unwrap_err();

    assert!(matches!(err, FinderError::NotADirectory(ref p) if *p == file));
    assert!(err.is_invalid_root());
}

#[test]
fn test_scan_missing_root_is_rejected() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("nope");

    let err = DuplicateFinder::with_defaults()
        .find_duplicates(&missing)
        .unwrap_err();

    assert!(matches!(err, FinderError::PathNotFound(_)));
    assert!(err.is_invalid_root());
}

#[test]
fn test_scan_relative_root_yields_relative_paths() {
    let dir = tempfile::tempdir_in(".").unwrap();
    write(dir.path(), "a.txt", b"relative");
    write(dir.path(), "sub/b.txt", b"relative");
    let root = PathBuf::from(dir.path().file_name().unwrap());

    let (index, _) = DuplicateFinder::with_defaults()
        .find_duplicates(&root)
        .unwrap();

    assert_eq!(index.len(), 1);
    let paths = &index.groups()[0].paths;
    assert_eq!(paths, &vec![root.join("a.txt"), root.join("sub/b.txt")]);
    for path in paths {
        assert!(path.is_relative());
        assert!(path.starts_with(&root));
    }
}
