    use serde_json::json;

    use super::*;
    use crate::model::Requester;

    fn task(id: &str, version: &str, order: i64) -> Task {
        Task {
            id: id.to_string(),
            display_name: "compile".to_string(),
            project: "proj".to_string(),
            build_id: format!("build-{}", version),
            build_variant: "linux".to_string(),
            version: version.to_string(),
            create_time: "2024-01-01T00:00:00Z".to_string(),
            revision: format!("rev{}", order),
            order,
            requester: Requester::Mainline,
            secret: None,
        }
    }

    fn record(task: &Task, name: &str, n: i64) -> TaskJson {
        let data = json!({ "n": n }).as_object().cloned().unwrap_or_default();
        TaskJson::from_task(task, name, data)
    }

    #[test]
    fn upsert_replaces_record_with_same_task_and_name() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let mut store = RecordStore::open(dir.path())?;
        let t = task("t1", "v1", 1);

        store.upsert(record(&t, "perf", 1))?;
        store.upsert(record(&t, "perf", 2))?;
        store.upsert(record(&t, "size", 3))?;

        let perf = store.find_all(&RecordQuery::new().task_id("t1").name("perf"));
        assert_eq!(perf.len(), 1);
        assert_eq!(perf[0].data["n"], json!(2));
        assert_eq!(store.find_all(&RecordQuery::new().task_id("t1")).len(), 2);
        Ok(())
    }

    #[test]
    fn reopen_loads_persisted_documents() -> Result<()> {
        let dir = tempfile::tempdir()?;
        {
            let mut store = RecordStore::open(dir.path())?;
            let t = task("t1", "v1", 1);
            store.upsert_task(t.clone())?;
            store.upsert(record(&t, "perf", 7))?;
            store.close()?;
        }

        let store = RecordStore::open(dir.path())?;
        assert!(store.find_task("t1").is_some());
        let found = store.find_one(&RecordQuery::new().task_id("t1").name("perf"));
        assert_eq!(found.map(|r| r.data["n"].clone()), Some(json!(7)));
        Ok(())
    }

    #[test]
    fn closed_store_rejects_writes() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let mut store = RecordStore::open(dir.path())?;
        store.close()?;
        store.close()?;

        let t = task("t1", "v1", 1);
        let err = store.upsert(record(&t, "perf", 1)).unwrap_err();
        assert!(format!("{:#}", err).contains("closed"));
        Ok(())
    }

    #[test]
    fn tags_apply_to_every_record_in_version() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let mut store = RecordStore::open(dir.path())?;
        let a = task("a", "v1", 1);
        let mut b = task("b", "v1", 1);
        b.build_variant = "windows".to_string();
        let c = task("c", "v2", 2);
        for t in [&a, &b, &c] {
            store.upsert(record(t, "perf", 0))?;
        }

        assert_eq!(store.set_tag("v1", "perf", "release")?, 2);
        assert_eq!(store.distinct_tags("proj"), vec!["release".to_string()]);
        let mut tagged: Vec<String> = store
            .find_all(&RecordQuery::new().tag("release"))
            .into_iter()
            .map(|r| r.task_id)
            .collect();
        tagged.sort();
        assert_eq!(tagged, vec!["a".to_string(), "b".to_string()]);

        assert_eq!(store.clear_tag("v1", "perf")?, 2);
        assert!(store.distinct_tags("proj").is_empty());
        Ok(())
    }

    #[test]
    fn empty_tag_does_not_count_as_tagged() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let mut store = RecordStore::open(dir.path())?;
        let t = task("t1", "v1", 1);
        let mut r = record(&t, "perf", 0);
        r.tag = Some(String::new());
        store.upsert(r)?;

        assert!(store.find_all(&RecordQuery::new().tagged()).is_empty());
        assert!(store.distinct_tags("proj").is_empty());
        Ok(())
    }

    #[test]
    fn revision_prefix_ignores_ascii_case() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let mut store = RecordStore::open(dir.path())?;
        let mut t = task("t1", "v1", 1);
        t.revision = "abc123def".to_string();
        store.upsert(record(&t, "perf", 0))?;

        let q = RecordQuery::new().revision_prefix("ABC1");
        assert!(store.find_one(&q).is_some());
        assert!(store.find_one(&RecordQuery::new().revision_prefix("abd")).is_none());
        Ok(())
    }

    #[test]
    fn sort_and_limit_apply_after_filtering() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let mut store = RecordStore::open(dir.path())?;
        for order in 1..=5 {
            let t = task(&format!("t{}", order), &format!("v{}", order), order);
            store.upsert(record(&t, "perf", order))?;
        }

        let top: Vec<i64> = store
            .find_all(
                &RecordQuery::new()
                    .order(OrderBound::AtMost(4))
                    .sort(Sort::OrderDescending)
                    .limit(2),
            )
            .into_iter()
            .map(|r| r.order)
            .collect();
        assert_eq!(top, vec![4, 3]);

        let after: Vec<i64> = store
            .find_all(&RecordQuery::new().order(OrderBound::After(4)))
            .into_iter()
            .map(|r| r.order)
            .collect();
        assert_eq!(after, vec![5]);
        Ok(())
    }

    #[test]
    fn latest_task_on_variant_wins_by_create_time() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let mut store = RecordStore::open(dir.path())?;
        let mut old = task("old", "v1", 1);
        old.create_time = "2024-01-01T00:00:00Z".to_string();
        let mut new = task("new", "v1", 1);
        new.create_time = "2024-01-01T01:00:00+00:00".to_string();
        store.upsert_task(old)?;
        store.upsert_task(new)?;

        let found = store.find_variant_task("v1", "linux", "compile");
        assert_eq!(found.map(|t| t.id), Some("new".to_string()));
        assert!(store.find_variant_task("v1", "windows", "compile").is_none());
        Ok(())
    }

    #[test]
    fn base_commit_task_matches_patch_revision() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let mut store = RecordStore::open(dir.path())?;
        let base = task("base", "v5", 5);
        let mut patch = task("patch", "p1", 9);
        patch.requester = Requester::Patch;
        patch.revision = base.revision.clone();
        store.upsert_task(base)?;
        store.upsert_task(patch.clone())?;

        let found = store.find_task_on_base_commit(&patch);
        assert_eq!(found.map(|t| t.id), Some("base".to_string()));
        Ok(())
    }
