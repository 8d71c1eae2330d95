use std::thread;

use crate::dataset::{Cell, Dataset, Row, PROPERTY_LABEL_COLUMN};
use crate::output::{render, FormRenderer, RenderError};

/// Pulls the JSON literal assigned to `const <name> = ...;` out of a document.
fn embedded_literal<'a>(html: &'a str, name: &str) -> &'a str {
    let marker = format!("const {name} = ");
    let start = html.find(&marker).unwrap() + marker.len();
    let rest = &html[start..];
    let end = rest.find(";\n").unwrap();
    &rest[..end]
}

fn embedded_labels(html: &str) -> Vec<String> {
    serde_json::from_str(embedded_literal(html, "uniqueProperties")).unwrap()
}

fn embedded_data(html: &str) -> Dataset {
    serde_json::from_str(embedded_literal(html, "data")).unwrap()
}

fn scenario_rows() -> Dataset {
    serde_json::from_str(
        r#"[{"propertyaltlabel":"Temperature","value":5},{"propertyaltlabel":"Salinity","value":3},{"propertyaltlabel":null,"value":9}]"#,
    )
    .unwrap()
}

#[test]
fn mixed_labels_sorted_and_null_row_kept() {
    let doc = render(&scenario_rows()).unwrap();
    assert_eq!(embedded_labels(doc.as_str()), vec!["Salinity", "Temperature"]);
    let data = embedded_data(doc.as_str());
    assert_eq!(data.len(), 3);
    assert_eq!(data.rows()[2].get(PROPERTY_LABEL_COLUMN), Some(&Cell::Null));
    assert_eq!(data.rows()[2].get("value"), Some(&Cell::Int(9)));
}

#[test]
fn empty_dataset_embeds_empty_arrays() {
    let doc = render(&Dataset::default()).unwrap();
    assert_eq!(embedded_literal(doc.as_str(), "data"), "[]");
    assert_eq!(embedded_literal(doc.as_str(), "uniqueProperties"), "[]");
}

#[test]
fn duplicate_labels_collapse_but_rows_survive() {
    let ds = Dataset::from(vec![
        Row::new()
            .with(PROPERTY_LABEL_COLUMN, "Temperature")
            .with("depth", 1),
        Row::new()
            .with(PROPERTY_LABEL_COLUMN, "Temperature")
            .with("station", "B"),
    ]);
    let doc = render(&ds).unwrap();
    assert_eq!(embedded_labels(doc.as_str()), vec!["Temperature"]);
    assert_eq!(embedded_data(doc.as_str()).len(), 2);
}

#[test]
fn missing_label_column_fails() {
    let ds: Dataset = serde_json::from_str(r#"[{"value":1}]"#).unwrap();
    assert!(matches!(
        render(&ds),
        Err(RenderError::MissingColumn { .. })
    ));
}

#[test]
fn embedded_data_round_trips() {
    let ds = Dataset::from(vec![
        Row::new()
            .with("unit", "degC")
            .with(PROPERTY_LABEL_COLUMN, "Temperature")
            .with("value", 12.75)
            .with("count", 0)
            .with("flagged", false),
        Row::new()
            .with(PROPERTY_LABEL_COLUMN, "Salinity")
            .with("value", f64::NAN)
            .with("note", "quoted \"text\" & <b>markup</b>")
            .with("count", u64::MAX),
    ]);
    let doc = render(&ds).unwrap();
    let parsed = embedded_data(doc.as_str());

    assert_eq!(parsed.rows()[0], ds.rows()[0]);
    let cols: Vec<_> = parsed.rows()[0].columns().collect();
    assert_eq!(cols, vec!["unit", PROPERTY_LABEL_COLUMN, "value", "count", "flagged"]);

    // NaN is projected to null
    assert_eq!(parsed.rows()[1].get("value"), Some(&Cell::Null));
    assert_eq!(parsed.rows()[1].get("note"), ds.rows()[1].get("note"));
    assert_eq!(parsed.rows()[1].get("count"), Some(&Cell::UInt(u64::MAX)));
    assert!(embedded_literal(doc.as_str(), "data").contains(r#""count":18446744073709551615"#));
}

#[test]
fn render_is_deterministic() {
    let ds = scenario_rows();
    let first = render(&ds).unwrap();
    for _ in 0..5 {
        assert_eq!(render(&ds).unwrap(), first);
    }
}

#[test]
fn concurrent_renders_agree() {
    let ds = scenario_rows();
    let renderer = FormRenderer::default();
    let expected = renderer.render(&ds).unwrap();
    thread::scope(|s| {
        let handles: Vec<_> = (0..4)
            .map(|_| s.spawn(|| renderer.render(&ds).unwrap()))
            .collect();
        for h in handles {
            assert_eq!(h.join().unwrap(), expected);
        }
    });
}

#[test]
fn labels_never_contain_nulls_or_duplicates() {
    let labels = ["b", "a", "c", "a", "b"];
    let mut rows: Vec<Row> = labels
        .iter()
        .map(|l| Row::new().with(PROPERTY_LABEL_COLUMN, *l))
        .collect();
    rows.push(Row::new().with(PROPERTY_LABEL_COLUMN, Option::<String>::None));
    rows.push(Row::new().with("value", 1));
    let doc = render(&Dataset::from(rows)).unwrap();
    assert_eq!(embedded_labels(doc.as_str()), vec!["a", "b", "c"]);
}

#[test]
fn document_wires_dropdown_table_and_storage() {
    let doc = render(&scenario_rows()).unwrap();
    let html = doc.as_str();
    assert!(html.contains(r#"<div class="form-container">"#));
    assert!(html.contains(r#"<select class="property-select" id="property-select""#));
    assert!(html.contains(r#"<table id="observations_table""#));
    assert!(html.contains("localStorage.setItem('selectedProperty', selectedProperty);"));
    assert!(html.contains("localStorage.setItem('filteredData', JSON.stringify(filteredData));"));
    assert!(html.contains("window.dispatchEvent(new Event('filteredDataUpdated'));"));
    assert!(html.contains("row.propertyaltlabel === selectedProperty"));
    assert!(html.contains("https://cdn.datatables.net/1.11.5/js/jquery.dataTables.min.js"));
    assert!(html.contains("buttons: ['csv', 'excel']"));
}
