use std::thread;

use assert_matches::assert_matches;
use tempfile::TempDir;

use super::*;
use crate::{Error, RecordStore, StorageConfig, Update};

fn open_temp() -> (TempDir, RocksDbStorage) {
    let dir = TempDir::new().expect("cannot create tempdir");
    let config = StorageConfig {
        max_commit_retries: 1_000,
        ..StorageConfig::with_path(dir.path())
    };
    let storage = RocksDbStorage::open(&config).expect("cannot open storage");
    (dir, storage)
}

#[test]
fn test_get_after_write() {
    let (_dir, storage) = open_temp();
    assert_eq!(storage.get(b"root").unwrap().expect("get"), None);

    let ctx = storage.read_modify_write(b"root", |current| {
        assert!(current.is_none());
        (Update::Put(b"nodes".to_vec()), 7)
    });
    assert_eq!(ctx.cost.seek_count, 2);
    assert_eq!(ctx.cost.storage_written_bytes, 9);
    assert_eq!(ctx.unwrap().expect("write"), 7);

    assert_eq!(
        storage.get(b"root").unwrap().expect("get"),
        Some(b"nodes".to_vec())
    );
}

#[test]
fn test_keep_does_not_write() {
    let (_dir, storage) = open_temp();
    storage
        .read_modify_write(b"root", |_| (Update::Put(b"first".to_vec()), ()))
        .unwrap()
        .expect("write");

    let ctx = storage.read_modify_write(b"root", |current| {
        assert_eq!(current, Some(&b"first"[..]));
        (Update::Keep, ())
    });
    assert_eq!(ctx.cost.storage_written_bytes, 0);
    ctx.unwrap().expect("keep");

    assert_eq!(
        storage.get(b"root").unwrap().expect("get"),
        Some(b"first".to_vec())
    );
}

#[test]
fn test_records_survive_reopen() {
    let dir = TempDir::new().expect("cannot create tempdir");
    let config = StorageConfig::with_path(dir.path());
    {
        let storage = RocksDbStorage::open(&config).expect("open");
        storage
            .read_modify_write(b"root", |_| (Update::Put(b"persisted".to_vec()), ()))
            .unwrap()
            .expect("write");
        storage.flush().expect("flush");
    }
    let storage = RocksDbStorage::open(&config).expect("reopen");
    assert_eq!(
        storage.get(b"root").unwrap().expect("get"),
        Some(b"persisted".to_vec())
    );
}

#[test]
fn test_open_missing_database_without_create() {
    let dir = TempDir::new().expect("cannot create tempdir");
    let config = StorageConfig {
        create_if_missing: false,
        ..StorageConfig::with_path(dir.path().join("absent"))
    };
    assert_matches!(RocksDbStorage::open(&config), Err(Error::RocksDBError(_)));
}

#[test]
fn test_concurrent_read_modify_write_is_atomic() {
    let (_dir, storage) = open_temp();
    thread::scope(|s| {
        for _ in 0..4 {
            s.spawn(|| {
                for _ in 0..25 {
                    storage
                        .read_modify_write(b"counter", |current| {
                            let n = current.map_or(0, <[u8]>::len);
                            (Update::Put(vec![1; n + 1]), ())
                        })
                        .unwrap()
                        .expect("increment");
                }
            });
        }
    });
    let stored = storage.get(b"counter").unwrap().expect("get");
    assert_eq!(stored.map(|v| v.len()), Some(100));
}

#[test]
fn test_commit_retries_exhausted() {
    let dir = TempDir::new().expect("cannot create tempdir");
    let config = StorageConfig {
        max_commit_retries: 3,
        ..StorageConfig::with_path(dir.path())
    };
    let storage = RocksDbStorage::open(&config).expect("open");

    // every attempt is overtaken by a write that commits first
    let mut attempts: u8 = 0;
    let ctx = storage.read_modify_write(b"root", |_| {
        attempts += 1;
        let competing = vec![attempts];
        storage
            .read_modify_write(b"root", |_| (Update::Put(competing.clone()), ()))
            .unwrap()
            .expect("competing write");
        (Update::Put(b"outer".to_vec()), ())
    });
    assert_matches!(
        ctx.unwrap(),
        Err(Error::CommitRetriesExhausted { attempts: 3 })
    );
    assert_eq!(attempts, 3);
    assert_eq!(storage.get(b"root").unwrap().expect("get"), Some(vec![3]));
}
