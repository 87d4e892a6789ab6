//! End-to-end pipelines across the taxonomy, viz and SQL crates.

use std::fs;

use fides_ingest_sql::{datasets_to_records, introspect, DdlCatalog};
use fides_taxonomy::{
    normalize, render_list, Hierarchy, IndexedHierarchy, IngestOptions, ListOptions, ListStyle,
    ResourceType, TaxonomyError, TaxonomyManifest,
};
use fides_viz::{render, FigureKind, PlotlyScript, RenderMode, Rendered, View};
use serde_json::{json, Value};

fn manifest() -> Value {
    json!({
        "data_category": [
            { "fides_key": "user", "name": "User Data" },
            { "fides_key": "user.provided", "parent_key": "user" },
            { "fides_key": "user.provided.identifiable", "parent_key": "user.provided" },
            { "fides_key": "user.derived", "parent_key": "user" },
            { "fides_key": "system", "name": "System Data" },
            { "fides_key": "system.operations", "parent_key": "system" }
        ],
        "data_use": [
            { "fides_key": "provide", "name": "Provide" },
            { "fides_key": "provide.service", "parent_key": "provide" }
        ]
    })
}

#[test]
fn manifest_file_to_combined_document() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("taxonomy.json");
    fs::write(&path, serde_json::to_string_pretty(&manifest()).unwrap()).unwrap();

    let value: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    let records = TaxonomyManifest::records_for(&value, ResourceType::DataCategory).unwrap();
    let indexed = IndexedHierarchy::build(records).unwrap();
    assert_eq!(indexed.len(), 6);
    assert_eq!(indexed.edges.len(), 4);

    let rendered = render(
        &indexed,
        "data_category",
        FigureKind::Combined,
        &RenderMode::Document(PlotlyScript::Cdn),
    )
    .unwrap();
    let Rendered::Html(html) = rendered else {
        panic!("expected an html document");
    };
    assert!(html.contains("<title>Fides Data Category Hierarchy</title>"));
    assert!(html.contains("cdn.plot.ly"));
    assert!(html.contains(r#""type":"sankey""#));
}

#[test]
fn json_figure_views_share_the_same_nodes() {
    let value = manifest();
    let records = TaxonomyManifest::records_for(&value, ResourceType::DataUse).unwrap();
    let indexed = IndexedHierarchy::build(records).unwrap();
    let json = render(&indexed, "data_use", FigureKind::Combined, &RenderMode::Json)
        .unwrap()
        .into_string();
    let figure: Value = serde_json::from_str(&json).unwrap();

    let data = figure["data"].as_array().unwrap();
    assert_eq!(data.len(), 3);
    assert_eq!(data[0]["labels"], json!(["provide", "provide.service"]));
    assert_eq!(data[0]["parents"], json!(["", "provide"]));
    assert_eq!(data[2]["labels"], data[0]["labels"]);
    assert_eq!(data[1]["link"]["source"], json!([0]));
    assert_eq!(data[1]["link"]["target"], json!([1]));
    assert_eq!(figure["layout"]["title"]["text"], "Fides Data Use Hierarchy");

    let visible: Vec<bool> = data.iter().map(|t| t["visible"].as_bool().unwrap()).collect();
    assert_eq!(visible, vec![true, false, false]);
}

#[test]
fn forest_and_graph_disagree_on_divergent_parent() {
    let value = json!([
        { "fides_key": "a" },
        { "fides_key": "b" },
        { "fides_key": "a.x", "parent_key": "b" }
    ]);
    let records = fides_taxonomy::parse_records(&value).unwrap();
    let hierarchy = Hierarchy::ingest(records.clone(), &IngestOptions::default()).unwrap();

    // The forest nests by dot-segments, the graph follows parent_key.
    let forest = normalize(hierarchy.records());
    assert_eq!(
        serde_json::to_value(&forest).unwrap(),
        json!({ "a": { "x": {} }, "b": {} })
    );
    let indexed = hierarchy.indexed();
    assert_eq!(indexed.parents, vec!["", "", "b"]);
    assert_eq!(hierarchy.divergent_parents().len(), 1);

    let strict = IngestOptions {
        require_prefix_parent: true,
        ..IngestOptions::default()
    };
    assert!(matches!(
        Hierarchy::ingest(records, &strict),
        Err(TaxonomyError::ParentKeyMismatch { .. })
    ));
}

#[test]
fn list_rendering_follows_the_forest() {
    let value = manifest();
    let records = TaxonomyManifest::records_for(&value, ResourceType::DataCategory).unwrap();
    let hierarchy = Hierarchy::ingest(records, &IngestOptions::default()).unwrap();
    let forest = hierarchy.forest();

    let plain = render_list(
        &forest,
        "data_category",
        &ListOptions {
            style: ListStyle::Plain,
            ..ListOptions::default()
        },
    );
    assert_eq!(
        plain,
        "Fides Data Category Hierarchy\n\
         - user\n\
         \x20 - provided\n\
         \x20   - identifiable\n\
         \x20 - derived\n\
         - system\n\
         \x20 - operations\n"
    );

    let html = render_list(&forest, "data_category", &ListOptions::default());
    assert!(html.starts_with("<h2>Fides Data Category Hierarchy</h2>\n"));
    assert_eq!(html.matches("<li>").count(), forest.node_count());
}

#[test]
fn ddl_datasets_render_as_a_single_sankey() {
    let ddl = r#"
        CREATE TABLE users (id INT, email TEXT);
        CREATE TABLE billing.invoices (id INT, user_id INT);
    "#;
    let datasets = introspect(&DdlCatalog::parse(ddl, "public").unwrap()).unwrap();
    let indexed = IndexedHierarchy::build(datasets_to_records(&datasets)).unwrap();
    assert_eq!(indexed.labels.len(), 8);

    let json = render(
        &indexed,
        "dataset",
        FigureKind::Single(View::Sankey),
        &RenderMode::Json,
    )
    .unwrap()
    .into_string();
    let figure: Value = serde_json::from_str(&json).unwrap();
    assert_eq!(figure["data"].as_array().unwrap().len(), 1);
    assert_eq!(figure["data"][0]["type"], "sankey");
    assert_eq!(
        figure["data"][0]["link"]["source"].as_array().unwrap().len(),
        6
    );
    assert!(figure["layout"].get("updatemenus").is_none());
}

#[test]
fn invalid_taxonomies_fail_at_ingestion() {
    let unresolved = fides_taxonomy::parse_records(&json!([
        { "fides_key": "a.b", "parent_key": "a" }
    ]))
    .unwrap();
    assert!(matches!(
        IndexedHierarchy::build(unresolved),
        Err(TaxonomyError::ParentNotFound { .. })
    ));

    let duplicated = fides_taxonomy::parse_records(&json!([
        { "fides_key": "a" },
        { "fides_key": "a" }
    ]))
    .unwrap();
    assert!(matches!(
        IndexedHierarchy::build(duplicated),
        Err(TaxonomyError::DuplicateKey { .. })
    ));
}
