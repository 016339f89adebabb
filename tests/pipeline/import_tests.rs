#[cfg(test)]
mod import_tests {
    use crate::common::{data_path, strings, write_data};
    use redis_porter::pipeline::{import_database, ImportOptions, Outcome, PipelineError};
    use redis_porter::store::{MemoryStore, MemoryValue, Store};
    use std::collections::{BTreeMap, BTreeSet};
    use tempfile::TempDir;

    fn seeded_store() -> MemoryStore {
        let mut store = MemoryStore::new();
        store.insert("existing", MemoryValue::String("keep".to_string()));
        store
    }

    fn flush_options() -> ImportOptions {
        ImportOptions {
            flush: true,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_import_invalid_json_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let path = write_data(&dir, "{ this is not json");
        let mut store = seeded_store();

        let result = import_database(&mut store, &path, &flush_options()).await;

        assert!(matches!(result, Err(PipelineError::Parse(_))));
        assert_eq!(store.writes_issued(), 0);
        assert_eq!(
            store.value("existing"),
            Some(&MemoryValue::String("keep".to_string()))
        );
    }

    #[tokio::test]
    async fn test_import_non_object_document_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let path = write_data(&dir, r#"[{"type": "string", "ttl": -1, "data": ["v"]}]"#);
        let mut store = seeded_store();

        let result = import_database(&mut store, &path, &flush_options()).await;

        assert!(matches!(result, Err(PipelineError::MalformedDocument(_))));
        assert_eq!(store.writes_issued(), 0);
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_import_missing_file() {
        let dir = TempDir::new().unwrap();
        let path = data_path(&dir);
        let mut store = seeded_store();

        let result = import_database(&mut store, &path, &ImportOptions::default()).await;

        assert!(matches!(result, Err(PipelineError::FileIo { .. })));
        assert_eq!(store.writes_issued(), 0);
    }

    #[tokio::test]
    async fn test_import_isolates_bad_entries() {
        let dir = TempDir::new().unwrap();
        let path = write_data(
            &dir,
            r#"{
                "greeting": {"type": "string", "ttl": -1, "data": ["hello"]},
                "events": {"type": "stream", "ttl": -1, "data": []},
                "no_ttl": {"type": "string", "data": ["x"]},
                "bad_hash": {"type": "hash", "ttl": -1, "data": {"f": 1}},
                "tags": {"type": "set", "ttl": -1, "data": ["a", "b"]}
            }"#,
        );
        let mut store = MemoryStore::new();

        let report = import_database(&mut store, &path, &ImportOptions::default())
            .await
            .unwrap();

        assert_eq!(report.run.total(), 5);
        assert_eq!(report.run.succeeded(), 2);
        assert_eq!(report.run.failed(), 3);
        assert_eq!(report.run.skipped(), 1);
        assert!(matches!(
            report.run.outcome("events"),
            Some(Outcome::Skipped(_))
        ));
        assert!(matches!(
            report.run.outcome("no_ttl"),
            Some(Outcome::Failed(_))
        ));
        assert!(matches!(
            report.run.outcome("bad_hash"),
            Some(Outcome::Failed(_))
        ));

        assert_eq!(report.flushed, None);
        assert_eq!(store.len(), 2);
        assert_eq!(
            store.value("greeting"),
            Some(&MemoryValue::String("hello".to_string()))
        );
        assert_eq!(
            store.value("tags"),
            Some(&MemoryValue::Set(BTreeSet::from([
                "a".to_string(),
                "b".to_string()
            ])))
        );
    }

    #[tokio::test]
    async fn test_import_with_flush() {
        let dir = TempDir::new().unwrap();
        let path = write_data(
            &dir,
            r#"{"queue": {"type": "list", "ttl": -1, "data": ["x", "y"]}}"#,
        );
        let mut store = seeded_store();

        let report = import_database(&mut store, &path, &flush_options())
            .await
            .unwrap();

        assert_eq!(report.flushed, Some(1));
        assert_eq!(store.value("existing"), None);
        assert_eq!(
            store.value("queue"),
            Some(&MemoryValue::List(strings(&["x", "y"])))
        );
    }

    #[tokio::test]
    async fn test_import_without_flush_keeps_other_keys() {
        let dir = TempDir::new().unwrap();
        let path = write_data(
            &dir,
            r#"{"profile": {"type": "hash", "ttl": -1, "data": {"name": "ann", "age": "7"}}}"#,
        );
        let mut store = seeded_store();

        let report = import_database(&mut store, &path, &ImportOptions::default())
            .await
            .unwrap();

        assert_eq!(report.run.succeeded(), 1);
        // DEL + HSET
        assert_eq!(report.commands, 2);
        assert_eq!(store.len(), 2);
        assert_eq!(
            store.value("profile"),
            Some(&MemoryValue::Hash(BTreeMap::from([
                ("age".to_string(), "7".to_string()),
                ("name".to_string(), "ann".to_string()),
            ])))
        );
    }

    #[tokio::test]
    async fn test_import_replace_existing() {
        let content = r#"{"tags": {"type": "set", "ttl": -1, "data": ["b"]}}"#;

        let dir = TempDir::new().unwrap();
        let path = write_data(&dir, content);
        let mut store = MemoryStore::new();
        store.insert("tags", MemoryValue::Set(BTreeSet::from(["a".to_string()])));
        import_database(&mut store, &path, &ImportOptions::default())
            .await
            .unwrap();
        assert_eq!(
            store.value("tags"),
            Some(&MemoryValue::Set(BTreeSet::from(["b".to_string()])))
        );

        let mut store = MemoryStore::new();
        store.insert("tags", MemoryValue::Set(BTreeSet::from(["a".to_string()])));
        let options = ImportOptions {
            replace_existing: false,
            ..Default::default()
        };
        import_database(&mut store, &path, &options).await.unwrap();
        assert_eq!(
            store.value("tags"),
            Some(&MemoryValue::Set(BTreeSet::from([
                "a".to_string(),
                "b".to_string()
            ])))
        );
    }

    #[tokio::test]
    async fn test_import_batch_failure_is_fatal() {
        let dir = TempDir::new().unwrap();
        let path = write_data(
            &dir,
            r#"{
                "first": {"type": "string", "ttl": -1, "data": ["1"]},
                "existing": {"type": "list", "ttl": -1, "data": ["x"]},
                "last": {"type": "string", "ttl": -1, "data": ["2"]}
            }"#,
        );
        let mut store = seeded_store();
        let options = ImportOptions {
            replace_existing: false,
            ..Default::default()
        };

        // RPUSH 写入字符串键会失败，之前的写入保留
        let result = import_database(&mut store, &path, &options).await;

        assert!(matches!(result, Err(PipelineError::Connection(_))));
        assert_eq!(
            store.value("first"),
            Some(&MemoryValue::String("1".to_string()))
        );
        assert_eq!(store.value("last"), None);
    }

    #[tokio::test]
    async fn test_import_connection_lost() {
        let dir = TempDir::new().unwrap();
        let path = write_data(
            &dir,
            r#"{"greeting": {"type": "string", "ttl": -1, "data": ["hello"]}}"#,
        );
        let mut store = MemoryStore::new();
        store.set_unavailable(true);

        let result = import_database(&mut store, &path, &flush_options()).await;

        assert!(matches!(result, Err(PipelineError::Connection(_))));
    }

    #[tokio::test]
    async fn test_import_empty_collections() {
        let dir = TempDir::new().unwrap();
        let path = write_data(
            &dir,
            r#"{
                "empty_list": {"type": "list", "ttl": 60, "data": []},
                "empty_hash": {"type": "hash", "ttl": -1, "data": {}}
            }"#,
        );
        let mut store = MemoryStore::new();

        let report = import_database(&mut store, &path, &ImportOptions::default())
            .await
            .unwrap();

        assert_eq!(report.run.succeeded(), 2);
        // 每个空容器只有一条 DEL
        assert_eq!(report.commands, 2);
        assert!(store.is_empty());
        assert_eq!(store.ttl("empty_list").await.unwrap(), -2);
    }

    #[tokio::test]
    async fn test_import_empty_collection_replaces_existing() {
        let dir = TempDir::new().unwrap();
        let path = write_data(
            &dir,
            r#"{
                "tags": {"type": "set", "ttl": -1, "data": []},
                "queue": {"type": "list", "ttl": 30, "data": []}
            }"#,
        );
        let mut store = MemoryStore::new();
        store.insert("tags", MemoryValue::Set(BTreeSet::from(["stale".to_string()])));
        store.insert("queue", MemoryValue::List(strings(&["old"])));

        let report = import_database(&mut store, &path, &ImportOptions::default())
            .await
            .unwrap();

        assert_eq!(report.run.succeeded(), 2);
        assert_eq!(store.value("tags"), None);
        assert_eq!(store.value("queue"), None);
    }

    #[tokio::test]
    async fn test_import_empty_collection_merge_keeps_existing() {
        let dir = TempDir::new().unwrap();
        let path = write_data(&dir, r#"{"tags": {"type": "set", "ttl": -1, "data": []}}"#);
        let mut store = MemoryStore::new();
        store.insert("tags", MemoryValue::Set(BTreeSet::from(["kept".to_string()])));
        let options = ImportOptions {
            replace_existing: false,
            ..Default::default()
        };

        import_database(&mut store, &path, &options).await.unwrap();

        assert_eq!(
            store.value("tags"),
            Some(&MemoryValue::Set(BTreeSet::from(["kept".to_string()])))
        );
    }

    #[tokio::test]
    async fn test_import_non_positive_ttl_means_no_expiry() {
        let dir = TempDir::new().unwrap();
        let path = write_data(
            &dir,
            r#"{
                "zero": {"type": "string", "ttl": 0, "data": ["a"]},
                "missing": {"type": "list", "ttl": -2, "data": ["x"]},
                "persistent": {"type": "hash", "ttl": -1, "data": {"f": "v"}}
            }"#,
        );
        let mut store = MemoryStore::new();

        let report = import_database(&mut store, &path, &ImportOptions::default())
            .await
            .unwrap();

        assert_eq!(report.run.succeeded(), 3);
        for key in ["zero", "missing", "persistent"] {
            assert!(store.value(key).is_some(), "key {} was not imported", key);
            assert_eq!(store.ttl(key).await.unwrap(), -1, "key {}", key);
        }
    }
}
