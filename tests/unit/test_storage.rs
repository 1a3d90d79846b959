use dale_client::prelude::*;
use tempfile::tempdir;

#[tokio::test]
async fn test_file_store_survives_reopen() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nested").join("session.json");

    let store = FileStore::new(&path);
    store.set("dale:auth_token", "abc").await.unwrap();
    store.set("dale:refresh_token", "def").await.unwrap();
    drop(store);

    let reopened = FileStore::new(&path);
    assert_eq!(
        reopened.get("dale:auth_token").await.unwrap().as_deref(),
        Some("abc")
    );
    reopened.remove("dale:auth_token").await.unwrap();
    assert_eq!(reopened.get("dale:auth_token").await.unwrap(), None);
    assert_eq!(
        reopened.get("dale:refresh_token").await.unwrap().as_deref(),
        Some("def")
    );
}

#[tokio::test]
async fn test_file_store_missing_file_reads_empty() {
    let dir = tempdir().unwrap();
    let store = FileStore::new(dir.path().join("absent.json"));

    assert_eq!(store.get("anything").await.unwrap(), None);
    store.remove("anything").await.unwrap();
}

#[tokio::test]
async fn test_corrupt_file_is_replaced_by_next_login() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("session.json");
    std::fs::write(&path, "{truncated").unwrap();
    let keys = StorageKeys::new("dale");

    let store = FileStore::new(&path);
    assert!(store.get("dale:auth_token").await.is_err());

    let buffer = LogBuffer::default();
    let session = Session::new(Arc::new(store), keys.clone(), LogSink::Buffer(buffer.clone()));
    session.set_tokens(Some("abc"), Some("def"), None).await;
    assert!(buffer.is_empty());

    let restarted = Session::new(Arc::new(FileStore::new(&path)), keys, LogSink::default());
    let state = restarted.load_tokens().await;
    assert_eq!(state.access_token.as_deref(), Some("abc"));
    assert_eq!(state.refresh_token.as_deref(), Some("def"));
}

#[tokio::test]
async fn test_corrupt_file_is_cleared_by_logout() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("session.json");
    std::fs::write(&path, "not json").unwrap();

    let session = Session::new(
        Arc::new(FileStore::new(&path)),
        StorageKeys::new("dale"),
        LogSink::default(),
    );
    session.set_tokens(None, None, None).await;

    let reopened = FileStore::new(&path);
    assert_eq!(reopened.get("dale:auth_token").await.unwrap(), None);
}

#[tokio::test]
async fn test_session_over_file_store_restores_tokens() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("session.json");
    let keys = StorageKeys::new("dale:demo");

    let first = Session::new(
        Arc::new(FileStore::new(&path)),
        keys.clone(),
        LogSink::default(),
    );
    first.set_tokens(Some("abc"), Some("def"), None).await;

    let second = Session::new(Arc::new(FileStore::new(&path)), keys, LogSink::default());
    let state = second.load_tokens().await;
    assert_eq!(state.access_token.as_deref(), Some("abc"));
    assert_eq!(state.refresh_token.as_deref(), Some("def"));
}

#[tokio::test]
async fn test_memory_store_basics() {
    let store = MemoryStore::new();
    assert!(store.is_empty().await);
    store.set("k", "v1").await.unwrap();
    store.set("k", "v2").await.unwrap();
    assert_eq!(store.get("k").await.unwrap().as_deref(), Some("v2"));
    assert_eq!(store.len().await, 1);
    store.remove("k").await.unwrap();
    store.remove("k").await.unwrap();
    assert!(!store.contains("k").await);
}
