use fides_taxonomy::{normalize, CategoryRecord, Hierarchy, IndexedHierarchy, IngestOptions};
use proptest::prelude::*;

/// Well-formed taxonomies: every non-root record names an earlier record as
/// parent and its key extends that parent's key by one segment.
fn taxonomy() -> impl Strategy<Value = Vec<CategoryRecord>> {
    proptest::collection::vec(proptest::option::of(any::<prop::sample::Index>()), 1..40).prop_map(
        |picks| {
            let mut records: Vec<CategoryRecord> = Vec::with_capacity(picks.len());
            for (i, pick) in picks.into_iter().enumerate() {
                let record = match pick {
                    Some(idx) if !records.is_empty() => {
                        let parent = records[idx.index(records.len())].key.clone();
                        CategoryRecord::child(format!("{parent}.n{i}"), parent)
                    }
                    _ => CategoryRecord::root(format!("r{i}")),
                };
                records.push(record);
            }
            records
        },
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn forest_roots_match_root_records(records in taxonomy()) {
        let forest = normalize(&records);
        let roots = records.iter().filter(|r| r.is_root()).count();
        prop_assert_eq!(forest.len(), roots);
        prop_assert_eq!(forest.node_count(), records.len());
    }

    #[test]
    fn edge_count_matches_child_records(records in taxonomy()) {
        let children = records.iter().filter(|r| r.parent().is_some()).count();
        let indexed = IndexedHierarchy::build(records).expect("well-formed input");
        prop_assert_eq!(indexed.edges.source.len(), children);
        prop_assert_eq!(indexed.edges.target.len(), children);
    }

    #[test]
    fn index_equals_input_position(records in taxonomy()) {
        let indexed = IndexedHierarchy::build(records.clone()).expect("well-formed input");
        for (i, record) in records.iter().enumerate() {
            prop_assert_eq!(indexed.index_of(&record.key), Some(i));
        }
        for (source, target) in indexed.edges.iter() {
            prop_assert!(source < target);
            prop_assert_eq!(records[target].parent(), Some(records[source].key.as_str()));
        }
    }

    #[test]
    fn projections_are_repeatable(records in taxonomy()) {
        let first = Hierarchy::ingest(records.clone(), &IngestOptions::default()).expect("ingest");
        let second = Hierarchy::ingest(records, &IngestOptions::default()).expect("ingest");
        prop_assert_eq!(first.indexed(), second.indexed());
        prop_assert_eq!(
            serde_json::to_string(&first.forest()).unwrap(),
            serde_json::to_string(&second.forest()).unwrap()
        );
        prop_assert!(first.divergent_parents().is_empty());
    }
}
