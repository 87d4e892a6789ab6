use fides_taxonomy::{CategoryRecord, IndexedHierarchy};
use fides_viz::figure::Trace;
use fides_viz::{build_figure, render, Figure, FigureKind, RenderMode, View};

fn taxonomy() -> IndexedHierarchy {
    IndexedHierarchy::build(vec![
        CategoryRecord::root("account"),
        CategoryRecord::child("account.contact", "account"),
        CategoryRecord::child("account.contact.city", "account.contact"),
        CategoryRecord::child("account.payment", "account"),
        CategoryRecord::root("user"),
        CategoryRecord::child("user.derived", "user"),
    ])
    .expect("valid taxonomy")
}

#[test]
fn combined_figure_survives_json_roundtrip() {
    let hierarchy = taxonomy();
    let rendered = render(&hierarchy, "data_category", FigureKind::Combined, &RenderMode::Json)
        .expect("render json");
    let parsed: Figure = serde_json::from_str(rendered.as_str()).expect("parse figure");
    assert_eq!(parsed, build_figure(&hierarchy, "data_category", FigureKind::Combined));

    // Every encoding carries the same nodes and edges.
    for trace in &parsed.data {
        match trace {
            Trace::Sunburst(t) | Trace::Icicle(t) => {
                assert_eq!(t.labels, hierarchy.labels);
                assert_eq!(t.parents, hierarchy.parents);
            }
            Trace::Sankey(t) => {
                assert_eq!(t.node.label, hierarchy.labels);
                assert_eq!(t.link.source, hierarchy.edges.source);
                assert_eq!(t.link.target, hierarchy.edges.target);
            }
        }
    }
}

#[test]
fn serialized_shape_matches_front_end_contract() {
    let hierarchy = taxonomy();
    let fig = build_figure(&hierarchy, "data_category", FigureKind::Combined);
    let value = serde_json::to_value(&fig).expect("to value");

    let types: Vec<&str> = value["data"]
        .as_array()
        .expect("data array")
        .iter()
        .map(|t| t["type"].as_str().expect("type"))
        .collect();
    assert_eq!(types, vec!["sunburst", "sankey", "icicle"]);

    let visible: Vec<bool> = value["data"]
        .as_array()
        .expect("data array")
        .iter()
        .map(|t| t["visible"].as_bool().expect("visible"))
        .collect();
    assert_eq!(visible.iter().filter(|v| **v).count(), 1);

    assert_eq!(value["layout"]["showlegend"], serde_json::json!(false));
    assert_eq!(value["layout"]["updatemenus"][0]["buttons"][2]["method"], "update");
}

#[test]
fn rendering_is_repeatable() {
    let hierarchy = taxonomy();
    for kind in [
        FigureKind::Combined,
        FigureKind::Single(View::Sunburst),
        FigureKind::Single(View::Sankey),
        FigureKind::Single(View::Icicle),
    ] {
        let a = render(&hierarchy, "data_use", kind, &RenderMode::Json).expect("render");
        let b = render(&hierarchy, "data_use", kind, &RenderMode::Json).expect("render");
        assert_eq!(a, b);
    }
}
