use reportgen_generator::{
    generate, Expression, ExpressionChunk, GenerationContext, GeneratorError, SymbolKind,
    SymbolTable,
};
use std::collections::HashSet;

fn dataset_context() -> GenerationContext {
    let parameters = SymbolTable::from_pairs(
        SymbolKind::Parameter,
        [
            ("REPORT_LOCALE", "java.util.Locale"),
            ("title", "java.lang.String"),
            ("total", "java.math.BigDecimal"),
        ],
    )
    .unwrap();
    let fields = SymbolTable::from_pairs(
        SymbolKind::Field,
        [
            ("total", "java.math.BigDecimal"),
            ("order date", "java.util.Date"),
        ],
    )
    .unwrap();
    let variables = SymbolTable::from_pairs(
        SymbolKind::Variable,
        [
            ("PAGE_NUMBER", "java.lang.Integer"),
            ("total", "java.math.BigDecimal"),
        ],
    )
    .unwrap();

    let expressions = vec![
        Expression::new(
            3,
            "java.lang.String",
            vec![
                ExpressionChunk::ParameterRef("title".to_string()),
                ExpressionChunk::Text(" + \" - \" + ".to_string()),
                ExpressionChunk::ResourceRef("page".to_string()),
            ],
        ),
        Expression::new(
            0,
            "java.math.BigDecimal",
            vec![
                ExpressionChunk::FieldRef("total".to_string()),
                ExpressionChunk::Text(".add(".to_string()),
                ExpressionChunk::VariableRef("total".to_string()),
                ExpressionChunk::Text(")".to_string()),
            ],
        ),
        Expression::new(7, "java.lang.Object", vec![]),
    ];

    GenerationContext::for_dataset("Orders", parameters, fields, variables, expressions)
        .with_imports(vec!["java.util.regex.*".to_string()])
}

fn method<'s>(script: &'s str, name: &str) -> &'s str {
    let start = script.find(&format!("Object {}(int id)", name)).unwrap();
    let rest = &script[start..];
    &rest[..rest.find("return value;").unwrap()]
}

fn case_labels(body: &str) -> Vec<u32> {
    body.lines()
        .filter_map(|line| line.trim().strip_prefix("case "))
        .map(|rest| rest.trim_end_matches(" :").parse().unwrap())
        .collect()
}

#[test]
fn test_one_declaration_per_symbol() {
    let script = generate(&dataset_context()).unwrap();

    let count = |holder_type: &str| {
        script
            .lines()
            .filter(|l| l.starts_with(&format!("    {} ", holder_type)) && l.ends_with(" = null;"))
            .count()
    };
    assert_eq!(count("JRFillParameter"), 3);
    assert_eq!(count("JRFillField"), 2);
    assert_eq!(count("JRFillVariable"), 2);
}

#[test]
fn test_holder_names_distinct_across_tables() {
    let script = generate(&dataset_context()).unwrap();

    let holders: Vec<&str> = script
        .lines()
        .filter(|l| l.ends_with(" = null;") && l.trim_start().starts_with("JRFill"))
        .filter_map(|l| l.split_whitespace().nth(1))
        .collect();
    let distinct: HashSet<_> = holders.iter().collect();

    assert_eq!(holders.len(), 7);
    assert_eq!(distinct.len(), holders.len());
    assert!(holders.contains(&"parameter_total"));
    assert!(holders.contains(&"field_total"));
    assert!(holders.contains(&"variable_total"));
    assert!(holders.contains(&"field_order$20$date"));
}

#[test]
fn test_case_labels_follow_expression_order() {
    let script = generate(&dataset_context()).unwrap();

    for name in ["evaluate", "evaluateOld", "evaluateEstimated"] {
        assert_eq!(case_labels(method(&script, name)), vec![3, 0, 7], "{}", name);
    }
}

#[test]
fn test_phase_accessors_in_dispatch() {
    let script = generate(&dataset_context()).unwrap();

    let current = method(&script, "evaluate");
    assert!(current.contains(
        "value = (java.math.BigDecimal)(((java.math.BigDecimal)super.field_total.getValue()).add(((java.math.BigDecimal)super.variable_total.getValue())));"
    ));

    let old = method(&script, "evaluateOld");
    assert!(old.contains("super.field_total.getOldValue()"));
    assert!(old.contains("super.variable_total.getOldValue()"));

    let estimated = method(&script, "evaluateEstimated");
    assert!(estimated.contains("super.field_total.getValue()"));
    assert!(estimated.contains("super.variable_total.getEstimatedValue()"));
}

#[test]
fn test_empty_expression_is_null_in_every_phase() {
    let script = generate(&dataset_context()).unwrap();

    for name in ["evaluate", "evaluateOld", "evaluateEstimated"] {
        assert!(method(&script, name).contains("value = (java.lang.Object)(null);"));
    }
}

#[test]
fn test_crosstab_unit_is_single_phase() {
    let parameters =
        SymbolTable::from_pairs(SymbolKind::Parameter, [("REPORT_SCRIPTLET", "Object")]).unwrap();
    let variables = SymbolTable::from_pairs(
        SymbolKind::Variable,
        [("ROW_COUNT", "java.lang.Integer")],
    )
    .unwrap();
    let expressions = (0..5)
        .map(|id| {
            Expression::new(
                id,
                "java.lang.Integer",
                vec![ExpressionChunk::VariableRef("ROW_COUNT".to_string())],
            )
        })
        .collect();
    let context = GenerationContext::for_crosstab("Orders_CROSSTAB0", parameters, variables, expressions);

    let script = generate(&context).unwrap();
    assert_eq!(case_labels(method(&script, "evaluate")), vec![0, 1, 2, 3, 4]);
    assert!(case_labels(method(&script, "evaluateOld")).is_empty());
    assert!(case_labels(method(&script, "evaluateEstimated")).is_empty());
    assert!(!script.contains("JRFillField"));
}

#[test]
fn test_missing_symbol_aborts_generation() {
    let context = dataset_context().with_expressions(vec![Expression::new(
        12,
        "java.lang.Integer",
        vec![ExpressionChunk::VariableRef("PAGE_NUM".to_string())],
    )]);

    match generate(&context) {
        Err(GeneratorError::MissingSymbol {
            kind,
            name,
            expression_id,
            suggestion,
        }) => {
            assert_eq!(kind, SymbolKind::Variable);
            assert_eq!(name, "PAGE_NUM");
            assert_eq!(expression_id, Some(12));
            assert_eq!(suggestion.as_deref(), Some("PAGE_NUMBER"));
        }
        other => panic!("expected MissingSymbol, got {:?}", other),
    }
}

#[test]
fn test_output_is_byte_identical_across_calls() {
    let context = dataset_context();
    let first = generate(&context).unwrap();
    let second = generate(&context.clone()).unwrap();
    assert_eq!(first, second);
}
