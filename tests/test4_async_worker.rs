use sql_bridge::config::BridgeConfig;
use sql_bridge::driver::DriverValue;
use sql_bridge::statement::ExecOptions;
use sql_bridge::test_utils::FakeConnection;
use sql_bridge::types::{OutType, ParamValue, QueryAndParams, SqlType, SqlValue};
use sql_bridge::worker::{AsyncQueryExecutor, BridgeConnection};
use tokio::runtime::Runtime;

#[test]
fn select_round_trip_through_worker() -> Result<(), Box<dyn std::error::Error>> {
    let rt = Runtime::new()?;
    rt.block_on(async {
        let mut fake = FakeConnection::new();
        fake.script_rows(
            vec!["id".into(), "name".into()],
            vec![
                vec![DriverValue::Int(1), DriverValue::Text("alice".into())],
                vec![DriverValue::Int(2), DriverValue::Text("bob".into())],
            ],
        );
        let journal = fake.journal();

        let conn = BridgeConnection::new(fake, &BridgeConfig::default())?;
        let response = conn
            .execute_inputs("select id, name from users where id > ?", vec![SqlValue::Int(0)])
            .await?;

        let rows = response.rows.expect("result set");
        assert_eq!(rows.len(), 2);
        assert_eq!(rows.results[1].get("name"), Some(&SqlValue::Text("bob".into())));
        assert_eq!(journal.lock().unwrap().binds.len(), 1);
        Ok(())
    })
}

#[test]
fn callable_round_trip_returns_out_values() -> Result<(), Box<dyn std::error::Error>> {
    let rt = Runtime::new()?;
    rt.block_on(async {
        let mut fake = FakeConnection::new();
        fake.script_out_value(2, DriverValue::Int(7));

        let conn = BridgeConnection::new(fake, &BridgeConfig::default())?;
        let query = QueryAndParams::new(
            "call count_rows(?, ?)",
            vec![
                ParamValue::In(SqlValue::Text("users".into())),
                ParamValue::Out(OutType::Named(SqlType::Integer)),
            ],
        );
        let response = conn.execute(query, ExecOptions::default()).await?;

        assert_eq!(response.out_values, vec![(2, SqlValue::Int(7))]);
        Ok(())
    })
}

#[test]
fn clones_share_one_worker() -> Result<(), Box<dyn std::error::Error>> {
    let rt = Runtime::new()?;
    rt.block_on(async {
        let fake = FakeConnection::new();
        let journal = fake.journal();
        let conn = BridgeConnection::new(fake, &BridgeConfig::default())?;
        let other = conn.clone();
        assert_eq!(conn.worker_id(), other.worker_id());

        conn.execute_inputs("select 1", vec![]).await.ok();
        other.execute_inputs("select 2", vec![]).await.ok();
        assert_eq!(journal.lock().unwrap().prepared.len(), 2);
        Ok(())
    })
}

#[test]
fn with_connection_runs_on_the_worker() -> Result<(), Box<dyn std::error::Error>> {
    let rt = Runtime::new()?;
    rt.block_on(async {
        let fake = FakeConnection::new();
        let conn = BridgeConnection::new(fake, &BridgeConfig::default())?;
        let blob = conn
            .with_connection(|driver| {
                use sql_bridge::driver::DriverConnection;
                Ok(driver.create_blob(&[1, 2, 3])?)
            })
            .await?;
        assert_eq!(blob.0, 1);
        Ok(())
    })
}

#[test]
fn uuid_cast_config_applies_through_the_worker() -> Result<(), Box<dyn std::error::Error>> {
    let rt = Runtime::new()?;
    rt.block_on(async {
        let fake = FakeConnection::new();
        let journal = fake.journal();
        let config = BridgeConfig {
            cast_uuid: true,
            ..BridgeConfig::default()
        };
        let conn = BridgeConnection::new(fake, &config)?;
        conn.execute_inputs(
            "select * from t where id = ?",
            vec![SqlValue::Text("550e8400-e29b-41d4-a716-446655440000".into())],
        )
        .await
        .ok();

        let journal = journal.lock().unwrap();
        assert!(matches!(journal.binds[0].1, DriverValue::Uuid(_)));
        Ok(())
    })
}
