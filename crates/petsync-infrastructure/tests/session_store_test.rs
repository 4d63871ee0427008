use chrono::NaiveDate;
use petsync_core::session::{SessionRecord, SessionRepository};
use petsync_core::types::UserId;
use petsync_core::user::User;
use petsync_infrastructure::{
    EncryptedSessionStore, JsonFileStore, KeyValueStore, MemoryStore, SessionCipher, USER_SLOT,
};
use secrecy::SecretString;
use std::sync::Arc;
use tempfile::TempDir;

fn cipher(secret: &str) -> Arc<SessionCipher> {
    Arc::new(SessionCipher::new(&SecretString::from(secret.to_string())))
}

fn sample_record() -> SessionRecord {
    SessionRecord::new(
        User {
            id: UserId(12),
            name: "Ana".to_string(),
            surname: "García".to_string(),
            email: "ana@example.com".to_string(),
            phone: "600000000".to_string(),
            birthday: NaiveDate::from_ymd_opt(1990, 5, 17).unwrap(),
        },
        Some("tok-123".to_string()),
    )
}

#[tokio::test]
async fn save_then_load_returns_the_same_record() {
    let dir = TempDir::new().unwrap();
    let kv: Arc<dyn KeyValueStore> = Arc::new(JsonFileStore::new(dir.path().join("storage.json")));
    let store = EncryptedSessionStore::new(kv.clone(), cipher("secret"));
    let record = sample_record();

    store.save(&record).await.unwrap();

    assert_eq!(store.load().await, Some(record));
    let raw = kv.get(USER_SLOT).unwrap().unwrap();
    assert!(!raw.contains("ana@example.com"));
}

#[tokio::test]
async fn record_survives_a_new_store_instance() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("storage.json");
    let record = sample_record();

    EncryptedSessionStore::new(Arc::new(JsonFileStore::new(path.clone())), cipher("secret"))
        .save(&record)
        .await
        .unwrap();

    let reopened = EncryptedSessionStore::new(Arc::new(JsonFileStore::new(path)), cipher("secret"));
    assert_eq!(reopened.load().await, Some(record));
}

#[tokio::test]
async fn missing_slot_loads_none() {
    let store = EncryptedSessionStore::new(Arc::new(MemoryStore::new()), cipher("secret"));
    assert_eq!(store.load().await, None);
}

#[tokio::test]
async fn malformed_slot_loads_none() {
    let kv: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
    let store = EncryptedSessionStore::new(kv.clone(), cipher("secret"));

    kv.set(USER_SLOT, "definitely not ciphertext").unwrap();
    assert_eq!(store.load().await, None);

    let sealed_garbage = cipher("secret").encrypt(b"{\"not\": \"a session\"}").unwrap();
    kv.set(USER_SLOT, &sealed_garbage).unwrap();
    assert_eq!(store.load().await, None);
}

#[tokio::test]
async fn record_sealed_with_another_key_loads_none() {
    let kv: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
    EncryptedSessionStore::new(kv.clone(), cipher("old"))
        .save(&sample_record())
        .await
        .unwrap();

    let store = EncryptedSessionStore::new(kv, cipher("new"));
    assert_eq!(store.load().await, None);
}

#[tokio::test]
async fn clear_removes_the_session() {
    let store = EncryptedSessionStore::new(Arc::new(MemoryStore::new()), cipher("secret"));
    store.save(&sample_record()).await.unwrap();

    store.clear().await.unwrap();
    store.clear().await.unwrap();

    assert_eq!(store.load().await, None);
}
