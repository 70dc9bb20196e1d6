//! Tests for EXECUTE JAR parsing together with the text helpers around it
//!
//! Tests cover:
//! - Full option lists populating every field
//! - Multi-line statements after comment stripping
//! - Argument strings feeding the tokenizer
//! - Variable substitution before parsing

use sqlgate_sql::ddl::execute_jar::DEFAULT_ALLOW_NON_RESTORED_STATE;
use sqlgate_sql::{extract_args, remove_comments, JarSubmitParam, VariableManager};

#[test]
fn test_all_fields_populated() {
    let sql = "EXECUTE JAR WITH (\
        'uri'='rs:/jobs/wordcount.jar', \
        'main-class'='org.example.WordCount', \
        'args'='--input /data/in --name ''my job''', \
        'parallelism'='4', \
        'savepoint-path'='s3://bucket/savepoints/sp-1', \
        'allow-nonrestored-state'='true')";

    let param = JarSubmitParam::parse(sql).unwrap();
    assert_eq!(param.uri, "rs:/jobs/wordcount.jar");
    assert_eq!(param.main_class.as_deref(), Some("org.example.WordCount"));
    assert_eq!(param.args.as_deref(), Some("--input /data/in --name 'my job'"));
    assert_eq!(param.parallelism.as_deref(), Some("4"));
    assert_eq!(
        param.savepoint_path.as_deref(),
        Some("s3://bucket/savepoints/sp-1")
    );
    assert!(param.allow_non_restored_state);
}

#[test]
fn test_restore_flag_defaults() {
    let param = JarSubmitParam::parse(
        "EXECUTE JAR WITH ('uri'='a.jar', 'savepoint-path'='/sp/1')",
    )
    .unwrap();
    assert_eq!(param.allow_non_restored_state, DEFAULT_ALLOW_NON_RESTORED_STATE);
    assert!(!param.allow_non_restored_state);
}

#[test]
fn test_multiline_statement_with_comments() {
    let raw = r#"
        -- nightly batch
        execute jar with (
            'uri' = 'file:///opt/jobs/etl.jar', /* local build */
            'main-class' = 'org.example.Etl'
        );
    "#;

    let sql = remove_comments(raw);
    assert!(JarSubmitParam::matches(&sql));

    let param = JarSubmitParam::parse(&sql).unwrap();
    assert_eq!(param.uri, "file:///opt/jobs/etl.jar");
    assert_eq!(param.main_class.as_deref(), Some("org.example.Etl"));
    assert_eq!(param.args, None);
}

#[test]
fn test_args_tokenized_after_parsing() {
    let param = JarSubmitParam::parse(
        r#"EXECUTE JAR WITH ('uri'='a.jar', 'args'='--sql "select 1" --name ''x y'' -v')"#,
    )
    .unwrap();

    assert_eq!(
        extract_args(param.args_or_empty()),
        vec!["--sql", "select 1", "--name", "x y", "-v"]
    );
}

#[test]
fn test_variables_substituted_before_parsing() {
    let variables = VariableManager::new();
    variables.register("jar_dir", "rs:/jobs").unwrap();
    variables.register("p", "8").unwrap();

    let sql = variables
        .parse_variable("EXECUTE JAR WITH ('uri'='${jar_dir}/app.jar', 'parallelism'='${p}')")
        .unwrap();
    let param = JarSubmitParam::parse(&sql).unwrap();

    assert_eq!(param.uri, "rs:/jobs/app.jar");
    assert_eq!(param.parallelism.as_deref(), Some("8"));
}

#[test]
fn test_malformed_statements_rejected() {
    let cases = [
        "EXECUTE JAR WITH 'uri'='a.jar'",
        "EXECUTE JAR WITH ('uri'='a.jar'",
        "EXECUTE JAR WITH ('uri'='a.jar') AND MORE",
        "EXECUTE JAR WITH ('uri' 'a.jar')",
        "EXECUTE JAR WITH ()",
    ];
    for sql in cases {
        assert!(JarSubmitParam::parse(sql).is_err(), "should reject: {}", sql);
    }
}

#[test]
fn test_values_may_contain_separators() {
    let param = JarSubmitParam::parse(
        "EXECUTE JAR WITH ('uri'='a.jar', 'args'='--expr f(a, b)=c')",
    )
    .unwrap();
    assert_eq!(param.args.as_deref(), Some("--expr f(a, b)=c"));
}
