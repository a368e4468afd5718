// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Backend initialization tests.
//!
//! Every other test module goes through `Persistence::new_in_memory()`, so
//! migrations and foreign key enforcement are exercised throughout; these
//! tests pin the behavior down explicitly.

use super::{create_test_persistence, seed_client};
use crate::{Page, Persistence, PersistenceError};

#[test]
fn test_persistence_initialization() {
    let result: Result<Persistence, PersistenceError> = Persistence::new_in_memory();
    assert!(result.is_ok());
}

#[test]
fn test_foreign_keys_are_enforced() {
    let mut persistence: Persistence = create_test_persistence();
    assert!(persistence.verify_foreign_key_enforcement().is_ok());
}

#[test]
fn test_multiple_in_memory_instances_are_isolated() {
    let mut db1: Persistence = create_test_persistence();
    let mut db2: Persistence = create_test_persistence();

    seed_client(&mut db1, "Acme");

    assert_eq!(db1.list_clients(None, Page::default()).unwrap().total, 1);
    assert_eq!(db2.list_clients(None, Page::default()).unwrap().total, 0);
}

#[test]
fn test_page_clamps_limit() {
    assert_eq!(Page::new(None, None), Page { page: 1, limit: 50 });
    assert_eq!(
        Page::new(Some(0), Some(1000)),
        Page {
            page: 1,
            limit: 200
        }
    );
    assert_eq!(Page::new(Some(3), Some(10)).offset(), 20);
}

#[test]
fn test_file_database_survives_reopen() {
    let path = std::env::temp_dir().join(format!("sitecrew_reopen_{}.db", std::process::id()));
    let _ = std::fs::remove_file(&path);

    {
        let mut persistence: Persistence = Persistence::new_with_file(&path).unwrap();
        persistence.verify_foreign_key_enforcement().unwrap();
        seed_client(&mut persistence, "Acme");
    }

    let mut reopened: Persistence = Persistence::new_with_file(&path).unwrap();
    assert_eq!(reopened.list_clients(None, Page::default()).unwrap().total, 1);

    drop(reopened);
    for suffix in ["", "-wal", "-shm"] {
        let _ = std::fs::remove_file(format!("{}{suffix}", path.display()));
    }
}

#[test]
fn test_diesel_not_found_maps_to_not_found() {
    let err: PersistenceError = diesel::result::Error::NotFound.into();
    assert!(matches!(err, PersistenceError::NotFound(_)));
    assert_eq!(err.to_string(), "Not found: Record not found");
}
