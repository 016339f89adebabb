#[cfg(test)]
mod export_tests {
    use crate::common::{data_path, read_json, strings};
    use redis_porter::pipeline::{export_database, ExportOptions, Outcome, PipelineError};
    use redis_porter::store::{MemoryStore, MemoryValue};
    use serde_json::json;
    use std::collections::BTreeMap;
    use std::time::Duration;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_export_empty_store_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let path = data_path(&dir);
        let mut store = MemoryStore::new();

        let report = export_database(&mut store, &path, &ExportOptions::default())
            .await
            .unwrap();

        assert_eq!(report.written, None);
        assert_eq!(report.run.total(), 0);
        assert_eq!(report.run.failed(), 0);
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_export_isolates_unsupported_type() {
        let dir = TempDir::new().unwrap();
        let path = data_path(&dir);
        let mut store = MemoryStore::new();
        store.insert("events", MemoryValue::Other("stream".to_string()));
        store.insert("greeting", MemoryValue::String("hello".to_string()));
        store.insert(
            "profile",
            MemoryValue::Hash(BTreeMap::from([("name".to_string(), "ann".to_string())])),
        );

        let report = export_database(&mut store, &path, &ExportOptions::default())
            .await
            .unwrap();

        assert_eq!(report.run.total(), 3);
        assert_eq!(report.run.succeeded(), 2);
        assert_eq!(report.run.failed(), 1);
        assert!(matches!(
            report.run.outcome("events"),
            Some(Outcome::Skipped(_))
        ));
        assert_eq!(report.written.as_ref(), Some(&path));

        let document = read_json(&path);
        let object = document.as_object().unwrap();
        assert_eq!(object.len(), 2);
        assert!(!object.contains_key("events"));
        assert_eq!(
            document["greeting"],
            json!({"type": "string", "ttl": -1, "data": ["hello"]})
        );
        assert_eq!(
            document["profile"],
            json!({"type": "hash", "ttl": -1, "data": {"name": "ann"}})
        );
    }

    #[tokio::test]
    async fn test_export_document_shape() {
        let dir = TempDir::new().unwrap();
        let path = data_path(&dir);
        let mut store = MemoryStore::new();
        store.insert("queue", MemoryValue::List(strings(&["x", "y", "z"])));
        store.insert(
            "scores",
            MemoryValue::ZSet(BTreeMap::from([
                ("low".to_string(), -2.5),
                ("high".to_string(), 10.0),
            ])),
        );
        store.insert("token", MemoryValue::String("abc".to_string()));
        store.set_expiry("token", Duration::from_secs(300));

        export_database(&mut store, &path, &ExportOptions::default())
            .await
            .unwrap();

        let document = read_json(&path);
        assert_eq!(document["queue"]["type"], "list");
        assert_eq!(document["queue"]["data"], json!(["x", "y", "z"]));
        assert_eq!(document["scores"]["data"], json!({"low": -2.5, "high": 10.0}));

        let ttl = document["token"]["ttl"].as_i64().unwrap();
        assert!(ttl > 0 && ttl <= 300);
    }

    #[tokio::test]
    async fn test_export_compact_output() {
        let dir = TempDir::new().unwrap();
        let path = data_path(&dir);
        let mut store = MemoryStore::new();
        store.insert("a", MemoryValue::String("1".to_string()));
        store.insert("b", MemoryValue::String("2".to_string()));

        let options = ExportOptions {
            pretty: false,
            ..Default::default()
        };
        export_database(&mut store, &path, &options).await.unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(!content.contains('\n'));
        assert_eq!(read_json(&path).as_object().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_export_pattern_filters_keys() {
        let dir = TempDir::new().unwrap();
        let path = data_path(&dir);
        let mut store = MemoryStore::new();
        store.insert("user:1", MemoryValue::String("a".to_string()));
        store.insert("user:2", MemoryValue::String("b".to_string()));
        store.insert("job:1", MemoryValue::String("c".to_string()));

        let options = ExportOptions {
            pattern: "user:*".to_string(),
            ..Default::default()
        };
        let report = export_database(&mut store, &path, &options).await.unwrap();

        assert_eq!(report.run.total(), 2);
        let document = read_json(&path);
        assert!(document.get("job:1").is_none());
    }

    #[tokio::test]
    async fn test_export_enumeration_failure_is_fatal() {
        let dir = TempDir::new().unwrap();
        let path = data_path(&dir);
        let mut store = MemoryStore::new();
        store.insert("a", MemoryValue::String("1".to_string()));
        store.set_unavailable(true);

        let result = export_database(&mut store, &path, &ExportOptions::default()).await;

        assert!(matches!(result, Err(PipelineError::Enumeration(_))));
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_export_unwritable_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing").join("data.json");
        let mut store = MemoryStore::new();
        store.insert("a", MemoryValue::String("1".to_string()));

        let result = export_database(&mut store, &path, &ExportOptions::default()).await;

        assert!(matches!(result, Err(PipelineError::FileIo { .. })));
    }
}
