use async_trait::async_trait;
use rosterdb_core::{
    DaoError, Item, KeyValueStore, LikeTest, MemoryStore, MutateOutcome, PutCondition, StoreError,
    StoreResult, Student, StudentDao, TestDao, TestRecord, WriteAck,
};
use serde_json::json;
use std::sync::Arc;

const TABLE: &str = "students-test-db";
const TEST_DOMAIN: &str = "@gmail.com";

const SEED_STUDENT_ID: &str = "stu-4711";
const SEED_TEST_ID: &str = "tst-2300";

/// Creates the table and seeds one student and one test record, the state
/// every mutation scenario starts from.
async fn seeded_store() -> Arc<MemoryStore> {
    let store = Arc::new(MemoryStore::new());
    store.create_table(TABLE).await;
    store
        .seed(
            TABLE,
            [
                (
                    format!("student#{SEED_STUDENT_ID}"),
                    json!({
                        "student_id": SEED_STUDENT_ID,
                        "first_name": "Geddy",
                        "last_name": "Lee",
                        "email": "geddylee@gmail.com",
                        "registered_at": "2021-06-01T09:00:00Z",
                        "username": "geddylee",
                    }),
                ),
                (
                    format!("test#{SEED_TEST_ID}"),
                    json!({
                        "test_id": SEED_TEST_ID,
                        "name": "Intro Quiz",
                        "passmark": 65,
                    }),
                ),
            ],
        )
        .await
        .unwrap();
    store
}

#[tokio::test]
async fn dao_validate_fails_for_missing_table() {
    let store = Arc::new(MemoryStore::new());
    let dao = StudentDao::new(store, "non-existing-table");

    let err = dao.validate().await.unwrap_err();
    assert!(matches!(err, DaoError::Setup(_)));
}

#[tokio::test]
async fn dao_validate_passes_for_existing_table() {
    let store = seeded_store().await;
    let student_dao = StudentDao::new(Arc::clone(&store), TABLE);
    let test_dao = TestDao::new(store, TABLE);

    student_dao.validate().await.unwrap();
    test_dao.validate().await.unwrap();
}

#[tokio::test]
async fn create_student_persists_and_acknowledges() {
    let store = seeded_store().await;
    let dao = StudentDao::new(store, TABLE);

    let email = format!("joeboxer{TEST_DOMAIN}");
    let student = Student::create("Joe", "Boxer", email, "jboxer").await.unwrap();
    let ack = dao.create_student(&student).await.unwrap();

    assert!(!ack.key().is_empty());
}

#[tokio::test]
async fn created_student_round_trips_unchanged() {
    let store = seeded_store().await;
    let dao = StudentDao::new(store, TABLE);

    let student = Student::create("Alex", "Lifeson", "alexlifeson@gmail.com", "alexlifeson")
        .await
        .unwrap();
    dao.create_student(&student).await.unwrap();

    let loaded = dao.get_student(&student.student_id).await.unwrap().unwrap();
    assert_eq!(loaded, student);
}

#[tokio::test]
async fn create_student_revalidates_before_any_write() {
    let store = seeded_store().await;
    let before = store.item_count(TABLE).await.unwrap();
    let dao = StudentDao::new(Arc::clone(&store), TABLE);

    // Bypasses the factory to exercise the DAO's defensive re-validation.
    let invalid = Student {
        student_id: "stu-9999".to_string(),
        first_name: "Joe".to_string(),
        last_name: String::new(),
        email: "joeboxer".to_string(),
        registered_at: "2021-06-01T09:00:00Z".to_string(),
        username: "jboxer".to_string(),
    };

    let err = dao.create_student(&invalid).await.unwrap_err();
    match err {
        DaoError::Validation(validation) => {
            assert_eq!(validation.fields(), vec!["last_name", "email"]);
        }
        other => panic!("expected validation error, got {other}"),
    }
    assert_eq!(store.item_count(TABLE).await.unwrap(), before);
}

#[tokio::test]
async fn txn_create_student_succeeds_for_valid_entity() {
    let store = seeded_store().await;
    let dao = StudentDao::new(store, TABLE);

    let email = format!("tomquayle{TEST_DOMAIN}");
    let student = Student::create("Tom", "Quayle", email, "tomquayle").await.unwrap();
    let ack = dao.txn_create_student(&student).await.unwrap();

    assert!(!ack.key().is_empty());
    let loaded = dao.get_student(&student.student_id).await.unwrap().unwrap();
    assert_eq!(loaded, student);
}

#[tokio::test]
async fn txn_create_student_rejects_existing_identity() {
    let store = seeded_store().await;
    let dao = StudentDao::new(store, TABLE);

    let student = Student::create("Tom", "Quayle", "tomquayle@gmail.com", "tomquayle")
        .await
        .unwrap();
    dao.txn_create_student(&student).await.unwrap();

    let err = dao.txn_create_student(&student).await.unwrap_err();
    assert!(matches!(
        err,
        DaoError::Store(StoreError::ConditionFailed { .. })
    ));
}

#[tokio::test]
async fn update_test_details_applies_new_values() {
    let store = seeded_store().await;
    let dao = TestDao::new(store, TABLE);

    let response = dao
        .update_test_details(SEED_TEST_ID, "Me is Updated", 99)
        .await
        .unwrap();
    assert_eq!(response.status_code(), 200);

    let stored = dao.get_test(SEED_TEST_ID).await.unwrap().unwrap();
    assert_eq!(stored, TestRecord::new(SEED_TEST_ID, "Me is Updated", 99));
}

#[tokio::test]
async fn update_test_details_returns_404_for_missing_test() {
    let store = seeded_store().await;
    let dao = TestDao::new(store, TABLE);

    let response = dao
        .update_test_details("missingid", "Renamed", 50)
        .await
        .unwrap();
    assert_eq!(response.status_code(), 404);
    assert!(response.error().is_some());
}

#[tokio::test]
async fn update_test_details_rejects_bad_input_before_write() {
    let store = seeded_store().await;
    let dao = TestDao::new(store, TABLE);

    let err = dao.update_test_details("", "Renamed", 101).await.unwrap_err();
    match err {
        DaoError::Validation(validation) => {
            assert_eq!(validation.fields(), vec!["test_id", "passmark"]);
        }
        other => panic!("expected validation error, got {other}"),
    }

    // The seeded record is untouched.
    let stored = dao.get_test(SEED_TEST_ID).await.unwrap().unwrap();
    assert_eq!(stored.name, "Intro Quiz");
}

#[tokio::test]
async fn delete_test_removes_record_then_reports_404() {
    let store = seeded_store().await;
    let dao = TestDao::new(store, TABLE);

    let first = dao.delete_test(SEED_TEST_ID).await.unwrap();
    assert_eq!(first.status_code(), 200);
    assert!(dao.get_test(SEED_TEST_ID).await.unwrap().is_none());

    let second = dao.delete_test(SEED_TEST_ID).await.unwrap();
    assert_eq!(second.status_code(), 404);
}

#[tokio::test]
async fn delete_test_returns_404_for_unknown_id() {
    let store = seeded_store().await;
    let dao = TestDao::new(store, TABLE);

    let response = dao.delete_test("missingid").await.unwrap();
    assert_eq!(response.status_code(), 404);
}

#[tokio::test]
async fn like_test_records_the_relation() {
    let store = seeded_store().await;
    let dao = TestDao::new(store, TABLE);

    let like = LikeTest::create(SEED_STUDENT_ID, SEED_TEST_ID).await.unwrap();
    let response = dao.like_test(&like).await.unwrap();

    assert_eq!(response.status_code(), 200);
    assert_eq!(response.body().unwrap()["liked"], true);
}

#[tokio::test]
async fn like_test_is_idempotent() {
    let store = seeded_store().await;
    let dao = TestDao::new(Arc::clone(&store), TABLE);

    let like = LikeTest::create(SEED_STUDENT_ID, SEED_TEST_ID).await.unwrap();
    dao.like_test(&like).await.unwrap();
    let count_after_first = store.item_count(TABLE).await.unwrap();

    let repeat = dao.like_test(&like).await.unwrap();
    assert_eq!(repeat.status_code(), 200);
    assert_eq!(store.item_count(TABLE).await.unwrap(), count_after_first);
}

/// Backend stub whose calls all exceed their deadline.
struct TimingOutStore;

#[async_trait]
impl KeyValueStore for TimingOutStore {
    async fn table_exists(&self, _table: &str) -> StoreResult<bool> {
        Ok(true)
    }

    async fn get_item(&self, _table: &str, _key: &str) -> StoreResult<Option<Item>> {
        Err(StoreError::Timeout("deadline exceeded".to_string()))
    }

    async fn put_item(&self, _table: &str, _key: &str, _item: Item) -> StoreResult<WriteAck> {
        Err(StoreError::Timeout("deadline exceeded".to_string()))
    }

    async fn put_item_conditional(
        &self,
        _table: &str,
        _key: &str,
        _item: Item,
        _condition: PutCondition,
    ) -> StoreResult<WriteAck> {
        Err(StoreError::Timeout("deadline exceeded".to_string()))
    }

    async fn update_item(
        &self,
        _table: &str,
        _key: &str,
        _patch: Item,
    ) -> StoreResult<MutateOutcome> {
        Err(StoreError::Timeout("deadline exceeded".to_string()))
    }

    async fn delete_item(&self, _table: &str, _key: &str) -> StoreResult<MutateOutcome> {
        Err(StoreError::Timeout("deadline exceeded".to_string()))
    }
}

#[tokio::test]
async fn backend_timeout_surfaces_as_store_error_not_404() {
    let dao = TestDao::new(Arc::new(TimingOutStore), TABLE);

    let err = dao
        .update_test_details(SEED_TEST_ID, "Renamed", 50)
        .await
        .unwrap_err();
    assert!(matches!(err, DaoError::Store(StoreError::Timeout(_))));

    let err = dao.delete_test(SEED_TEST_ID).await.unwrap_err();
    assert!(matches!(err, DaoError::Store(StoreError::Timeout(_))));
}

#[tokio::test]
async fn like_test_returns_404_when_either_side_is_missing() {
    let store = seeded_store().await;
    let dao = TestDao::new(store, TABLE);

    let missing_student = LikeTest::create("missingid", SEED_TEST_ID).await.unwrap();
    let response = dao.like_test(&missing_student).await.unwrap();
    assert_eq!(response.status_code(), 404);

    let missing_test = LikeTest::create(SEED_STUDENT_ID, "missingid").await.unwrap();
    let response = dao.like_test(&missing_test).await.unwrap();
    assert_eq!(response.status_code(), 404);
}
