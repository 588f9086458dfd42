use reportgen_definition::{parse_definition_file, DefinitionError, UnitKind};
use reportgen_generator::{generate, GeneratorError};
use std::path::PathBuf;

fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

#[test]
fn test_parse_orders() {
    let report = parse_definition_file(fixture_path("orders.json")).expect("should parse orders.json");
    assert_eq!(report.name, "Orders");
    assert_eq!(report.main_dataset.expressions.len(), 4);
    assert_eq!(report.sub_datasets.len(), 1);
    assert_eq!(report.crosstabs.len(), 1);
}

#[test]
fn test_orders_units() {
    let report = parse_definition_file(fixture_path("orders.json")).unwrap();
    let units = report.units().expect("orders should split into units");

    let names: Vec<&str> = units.iter().map(|u| u.name()).collect();
    assert_eq!(names, vec!["Orders", "Orders_TopCustomers", "Orders_CROSSTAB0"]);
    assert_eq!(units[0].kind, UnitKind::MainDataset);
    assert_eq!(units[1].kind, UnitKind::SubDataset);
    assert_eq!(units[2].kind, UnitKind::Crosstab);

    assert!(!units[0].context.single_phase);
    assert!(units[2].context.single_phase);
    assert!(units[2].context.fields.is_empty());

    let ids: Vec<u32> = units[0].context.expressions.iter().map(|e| e.id).collect();
    assert_eq!(ids, vec![0, 1, 2, 3]);
}

#[test]
fn test_orders_main_unit_generates() {
    let report = parse_definition_file(fixture_path("orders.json")).unwrap();
    let unit = report.unit("Orders").unwrap();
    let script = generate(&unit.context).expect("main dataset should generate");

    assert!(script.contains("import com.acme.reports.Formatters;\n"));
    assert!(script.contains("    JRFillField field_order$20$date = null;\n"));
    assert!(script.contains(
        "value = (java.lang.String)(msg(super.evaluator.str(\"page.footer\"), ((java.lang.Integer)super.variable_PAGE_NUMBER.getValue())));"
    ));
    assert!(script.contains("super.variable_total.getEstimatedValue()"));
    assert!(script.contains("value = (java.lang.Object)(null);"));
}

#[test]
fn test_orders_crosstab_generates_single_phase() {
    let report = parse_definition_file(fixture_path("orders.json")).unwrap();
    let unit = report.unit("Orders_CROSSTAB0").unwrap();
    let script = generate(&unit.context).unwrap();

    let old = &script[script.find("Object evaluateOld(int id)").unwrap()..];
    let old = &old[..old.find("return value;").unwrap()];
    assert!(!old.contains("case "));
    assert!(script.contains("            case 1 :\n"));
}

#[test]
fn test_bad_chunk_kind() {
    let report = parse_definition_file(fixture_path("bad_chunk.json")).unwrap();
    match report.units() {
        Err(DefinitionError::Generator { unit, source }) => {
            assert_eq!(unit, "Broken");
            assert_eq!(
                source,
                GeneratorError::UnrecognizedChunkKind {
                    kind: "macro".to_string()
                }
            );
        }
        other => panic!("expected unrecognized chunk kind, got {:?}", other),
    }
}

#[test]
fn test_definition_from_temp_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tiny.json");
    std::fs::write(
        &path,
        r#"{ "name": "Tiny", "mainDataset": { "expressions": [ { "chunks": [ { "type": "text", "text": "1" } ] } ] } }"#,
    )
    .unwrap();

    let report = parse_definition_file(&path).unwrap();
    let units = report.units().unwrap();
    assert_eq!(units.len(), 1);
    assert_eq!(units[0].context.expressions[0].result_type, "java.lang.Object");
}
