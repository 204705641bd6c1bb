#[cfg(test)]
mod tests {
    use std::fs;

    use crate::cache::{IncrementalCache, JsFileCache};

    fn record(names: &[&str]) -> JsFileCache {
        JsFileCache {
            globals: names.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_hit_only_for_same_source() {
        let dir = tempfile::tempdir().unwrap();
        let cache = IncrementalCache::new(dir.path().join("cache")).unwrap();

        cache
            .set("src/a.js", "global.a = 1;", record(&["a"]))
            .unwrap();

        assert_eq!(cache.get("src/a.js", "global.a = 1;"), Some(record(&["a"])));
        assert_eq!(cache.get("src/a.js", "global.a = 2;"), None);
        assert_eq!(cache.get("src/b.js", "global.a = 1;"), None);
    }

    #[test]
    fn test_corrupt_entry_is_removed() {
        let dir = tempfile::tempdir().unwrap();
        let cache = IncrementalCache::new(dir.path()).unwrap();

        cache.set("a.js", "x", record(&[])).unwrap();
        let entry_path = cache.cache_dir().join("a.js.json");
        assert!(entry_path.exists());

        fs::write(&entry_path, "{ not json").unwrap();
        assert_eq!(cache.get("a.js", "x"), None);
        assert!(!entry_path.exists());
    }

    #[test]
    fn test_paths_map_to_flat_names() {
        let dir = tempfile::tempdir().unwrap();
        let cache = IncrementalCache::new(dir.path()).unwrap();

        cache.set("lib/deep/c.js", "", record(&["c"])).unwrap();
        assert!(cache.cache_dir().join("lib_deep_c.js.json").exists());
    }

    #[test]
    fn test_hash_is_stable_hex() {
        let hash = IncrementalCache::compute_hash("abc");
        assert_eq!(
            hash,
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_record_json_shape() {
        let json = record(&["b", "a"]).to_json().unwrap();
        assert_eq!(json, r#"{"globals":["b","a"]}"#);
        assert_eq!(JsFileCache::from_json(&json).unwrap(), record(&["b", "a"]));
    }
}
