use consent_core::db::{ConnectionProvider, DbError, SharedConnectionProvider};
use consent_core::{
    ConsentError, DataAccessError, DataAccessResult, DataSourceConfig, ErrorKind,
    FileConnectionProvider, Purpose, PurposeDao, SqlitePurposeDao,
};
use rusqlite::Connection;
use std::collections::HashSet;
use std::error::Error;

struct UnreachableDatabase;

impl ConnectionProvider for UnreachableDatabase {
    fn with_connection<T, F>(&self, _f: F) -> DataAccessResult<T>
    where
        F: FnOnce(&Connection) -> DataAccessResult<T>,
    {
        Err(DataAccessError::Connection(DbError::Sqlite(
            rusqlite::Error::InvalidPath("/unreachable/consent.db".into()),
        )))
    }
}

fn in_memory_dao() -> SqlitePurposeDao<SharedConnectionProvider> {
    SqlitePurposeDao::new(SharedConnectionProvider::in_memory().unwrap())
}

fn add(dao: &impl PurposeDao, name: &str, description: Option<&str>) -> Purpose {
    dao.add_purpose(&Purpose::new(name, description.map(str::to_string)))
        .unwrap()
}

#[test]
fn marketing_purpose_lifecycle() {
    let dao = in_memory_dao();

    let submitted = Purpose::new("marketing", Some("send promotional emails".to_string()));
    let created = dao.add_purpose(&submitted).unwrap();
    let id = created.id().unwrap();
    assert!(id > 0);
    assert_eq!(created.name(), "marketing");
    assert_eq!(created.description(), Some("send promotional emails"));
    assert_eq!(submitted.id(), None);

    let listed = dao.list_purposes(10, 0).unwrap();
    assert_eq!(listed.iter().filter(|item| **item == created).count(), 1);

    assert_eq!(dao.delete_purpose(id).unwrap(), id);
    let err = dao.get_purpose_by_id(id).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[test]
fn add_then_get_roundtrips_name_and_description() {
    let dao = in_memory_dao();

    let with_description = add(&dao, "analytics", Some("usage statistics"));
    let without_description = add(&dao, "billing", None);

    let loaded = dao
        .get_purpose_by_id(with_description.id().unwrap())
        .unwrap();
    assert_eq!(loaded, with_description);

    let loaded = dao
        .get_purpose_by_id(without_description.id().unwrap())
        .unwrap();
    assert_eq!(loaded.name(), "billing");
    assert_eq!(loaded.description(), None);
}

#[test]
fn delete_is_idempotent() {
    let dao = in_memory_dao();
    let id = add(&dao, "support", None).id().unwrap();

    assert_eq!(dao.delete_purpose(id).unwrap(), id);
    assert_eq!(dao.delete_purpose(id).unwrap(), id);
    assert_eq!(dao.delete_purpose(9_999).unwrap(), 9_999);
}

#[test]
fn list_pages_are_ordered_bounded_and_disjoint() {
    let dao = in_memory_dao();
    for index in 0..7 {
        add(&dao, &format!("purpose-{index}"), None);
    }

    let mut seen = Vec::new();
    let mut offset = 0;
    loop {
        let page = dao.list_purposes(3, offset).unwrap();
        assert!(page.len() <= 3);
        if page.is_empty() {
            break;
        }
        seen.extend(page.iter().map(|purpose| purpose.id().unwrap()));
        offset += 3;
    }

    assert_eq!(seen.len(), 7);
    assert!(seen.windows(2).all(|pair| pair[0] < pair[1]));
    let unique: HashSet<_> = seen.iter().collect();
    assert_eq!(unique.len(), 7);
}

#[test]
fn list_on_empty_table_returns_empty_vec() {
    let dao = in_memory_dao();
    assert!(dao.list_purposes(10, 0).unwrap().is_empty());
}

#[test]
fn list_passes_negative_limit_through_to_store() {
    let dao = in_memory_dao();
    for name in ["a", "b", "c"] {
        add(&dao, name, None);
    }

    // SQLite treats a negative LIMIT as "no limit".
    let all = dao.list_purposes(-1, 1).unwrap();
    let names: Vec<_> = all.iter().map(Purpose::name).collect();
    assert_eq!(names, vec!["b", "c"]);
}

#[test]
fn get_missing_id_is_not_found_not_a_fault() {
    let dao = in_memory_dao();

    let err = dao.get_purpose_by_id(404).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert_eq!(err.code(), "CM_00008");
    assert_eq!(err.message(), "No purpose found for the id: 404");
    assert!(err.cause().is_none());
}

#[test]
fn duplicate_name_surfaces_add_error_with_cause() {
    let dao = in_memory_dao();
    add(&dao, "marketing", None);

    let err = dao
        .add_purpose(&Purpose::new("marketing", Some("again".to_string())))
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::AddFailed);
    assert_eq!(err.code(), "CM_00004");
    assert_eq!(
        err.message(),
        "Error occurred while adding the purpose, name: marketing, description: again"
    );
    assert_constraint_violation(&err);
}

#[test]
fn add_failure_prints_missing_description_as_null() {
    let dao = in_memory_dao();
    add(&dao, "marketing", None);

    let err = dao.add_purpose(&Purpose::new("marketing", None)).unwrap_err();
    assert_eq!(
        err.message(),
        "Error occurred while adding the purpose, name: marketing, description: null"
    );
}

#[test]
fn connectivity_failure_maps_to_operation_errors_with_cause() {
    let dao = SqlitePurposeDao::new(UnreachableDatabase);

    let err = dao.get_purpose_by_id(1).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::GetFailed);
    assert_ne!(err.kind(), ErrorKind::NotFound);
    assert_eq!(err.code(), "CM_00005");
    assert!(matches!(err.cause(), Some(DataAccessError::Connection(_))));

    let err = dao
        .add_purpose(&Purpose::new("marketing", None))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::AddFailed);
    assert_eq!(err.code(), "CM_00004");
    assert!(matches!(err.cause(), Some(DataAccessError::Connection(_))));

    let err = dao.list_purposes(10, 0).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ListFailed);
    assert_eq!(err.code(), "CM_00006");
    assert!(matches!(err.cause(), Some(DataAccessError::Connection(_))));

    let err = dao.delete_purpose(7).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::DeleteFailed);
    assert_eq!(err.code(), "CM_00007");
    assert!(matches!(err.cause(), Some(DataAccessError::Connection(_))));
    assert!(err.source().and_then(|cause| cause.source()).is_some());
}

#[test]
fn missing_table_surfaces_get_failed_instead_of_not_found() {
    let dao = SqlitePurposeDao::new(SharedConnectionProvider::new(
        Connection::open_in_memory().unwrap(),
    ));

    let err = dao.get_purpose_by_id(1).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::GetFailed);
    assert!(matches!(err.cause(), Some(DataAccessError::Sqlite(_))));

    let err = dao.list_purposes(10, 0).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ListFailed);
    assert_eq!(
        err.message(),
        "Error occurred while listing purposes with limit: 10, offset: 0"
    );

    let err = dao.delete_purpose(3).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::DeleteFailed);
    assert!(err.source().is_some());
}

#[test]
fn file_backed_dao_persists_across_connections() {
    let dir = tempfile::tempdir().unwrap();
    let config = DataSourceConfig::file(dir.path().join("consent.db"));

    let created = {
        let dao = SqlitePurposeDao::new(FileConnectionProvider::new(config.clone()).unwrap());
        add(&dao, "research", Some("anonymised studies"))
    };

    let dao = SqlitePurposeDao::new(FileConnectionProvider::new(config).unwrap());
    let loaded = dao.get_purpose_by_id(created.id().unwrap()).unwrap();
    assert_eq!(loaded, created);
}

#[test]
fn concurrent_callers_receive_distinct_ids() {
    let dao = in_memory_dao();

    std::thread::scope(|scope| {
        for worker in 0..4 {
            let dao = &dao;
            scope.spawn(move || {
                for index in 0..5 {
                    add(dao, &format!("worker-{worker}-{index}"), None);
                }
            });
        }
    });

    let all = dao.list_purposes(100, 0).unwrap();
    assert_eq!(all.len(), 20);
    let ids: HashSet<_> = all.iter().map(|purpose| purpose.id()).collect();
    assert_eq!(ids.len(), 20);
}

fn assert_constraint_violation(err: &ConsentError) {
    match err.cause() {
        Some(DataAccessError::Sqlite(rusqlite::Error::SqliteFailure(failure, _))) => {
            assert_eq!(failure.code, rusqlite::ErrorCode::ConstraintViolation);
        }
        other => panic!("expected constraint violation cause, got {other:?}"),
    }
}
