use serde_json::json;
use sql_bridge::codec::{Decoder, Encoder};
use sql_bridge::driver::{DriverValue, StatementKind};
use sql_bridge::executor::execute_blocking;
use sql_bridge::statement::ExecOptions;
use sql_bridge::test_utils::FakeConnection;
use sql_bridge::types::{OutType, ParamValue, SqlType, SqlValue};
use sql_bridge::SqlBridgeError;

#[test]
fn index_list_scopes_the_statement() -> Result<(), Box<dyn std::error::Error>> {
    let mut conn = FakeConnection::new();
    conn.script_rows_affected(1);
    conn.script_generated_keys(vec!["id".into()], vec![vec![DriverValue::Int(17)]]);
    let journal = conn.journal();

    let options = ExecOptions::with_key_identifiers(vec![json!(1), json!(2)]);
    let response = execute_blocking(
        &mut conn,
        "insert into t (a) values (?)",
        &[ParamValue::In(SqlValue::Int(5))],
        &options,
        &Encoder::default(),
        &Decoder,
    )?;

    assert_eq!(
        journal.lock().unwrap().prepared[0].1,
        StatementKind::GeneratedKeyIndexes(vec![1, 2])
    );
    let keys = response.generated_keys.unwrap();
    assert_eq!(keys.results[0].get("id"), Some(&SqlValue::Int(17)));
    Ok(())
}

#[test]
fn name_list_scopes_the_statement() -> Result<(), Box<dyn std::error::Error>> {
    let mut conn = FakeConnection::new();
    conn.script_rows_affected(1);
    let journal = conn.journal();

    let options = ExecOptions::with_key_identifiers(vec![json!("id")]);
    execute_blocking(
        &mut conn,
        "insert into t (a) values (?)",
        &[ParamValue::In(SqlValue::Int(5))],
        &options,
        &Encoder::default(),
        &Decoder,
    )?;

    assert_eq!(
        journal.lock().unwrap().prepared[0].1,
        StatementKind::GeneratedKeyNames(vec!["id".into()])
    );
    Ok(())
}

#[test]
fn mixed_identifier_types_fail_before_any_statement_exists() {
    let mut conn = FakeConnection::new();
    let journal = conn.journal();

    let options = ExecOptions::with_key_identifiers(vec![json!(1), json!("id")]);
    let err = execute_blocking(
        &mut conn,
        "insert into t (a) values (?)",
        &[ParamValue::In(SqlValue::Int(5))],
        &options,
        &Encoder::default(),
        &Decoder,
    )
    .unwrap_err();

    assert!(matches!(err, SqlBridgeError::GeneratedKeysError(_)));
    let journal = journal.lock().unwrap();
    assert!(journal.prepared.is_empty());
    assert_eq!(journal.executes, 0);
}

#[test]
fn out_parameters_suppress_key_extraction() -> Result<(), Box<dyn std::error::Error>> {
    let mut conn = FakeConnection::new();
    let journal = conn.journal();

    let options = ExecOptions::with_generated_keys();
    let params = vec![ParamValue::Out(OutType::Named(SqlType::Integer))];
    let response = execute_blocking(
        &mut conn,
        "call p(?)",
        &params,
        &options,
        &Encoder::default(),
        &Decoder,
    )?;

    // callable wins; no key request reaches the driver
    assert_eq!(
        journal.lock().unwrap().prepared[0].1,
        StatementKind::Callable
    );
    assert!(response.generated_keys.is_none());
    Ok(())
}

#[test]
fn generic_flag_requests_keys_without_scoping() -> Result<(), Box<dyn std::error::Error>> {
    let mut conn = FakeConnection::new();
    conn.script_rows_affected(1);
    conn.script_generated_keys(vec!["id".into()], vec![vec![DriverValue::Int(99)]]);
    let journal = conn.journal();

    let response = execute_blocking(
        &mut conn,
        "insert into t (a) values (?)",
        &[ParamValue::In(SqlValue::Int(5))],
        &ExecOptions::with_generated_keys(),
        &Encoder::default(),
        &Decoder,
    )?;

    assert_eq!(
        journal.lock().unwrap().prepared[0].1,
        StatementKind::ReturnGeneratedKeys
    );
    let keys = response.generated_keys.unwrap();
    assert_eq!(keys.results[0].get_index(0), Some(&SqlValue::Int(99)));
    Ok(())
}
