use serde_json::Value as JsonValue;

use crate::codec::Encoder;
use crate::driver::{DriverConnection, DriverStatement, DriverValue};
use crate::error::SqlBridgeError;
use crate::statement::out_params::OutParams;
use crate::types::{OutType, ParamValue, SqlType, SqlValue};

/// One normalized parameter position: what (if anything) is bound as input
/// and what (if anything) is registered as output.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParamSlot {
    pub input: Option<SqlValue>,
    pub out: Option<OutType>,
}

/// Split tagged parameters into per-position slots plus the out registry.
///
/// Positions are 0-indexed here and 1-indexed toward the driver.
#[must_use]
pub fn normalize(params: &[ParamValue]) -> (Vec<ParamSlot>, OutParams) {
    let mut slots = Vec::with_capacity(params.len());
    let mut out_params = OutParams::new();
    for (idx, param) in params.iter().enumerate() {
        let slot = ParamSlot {
            input: param.input().cloned(),
            out: param.out_type(),
        };
        if let Some(ty) = slot.out {
            out_params.put(idx + 1, ty);
        }
        slots.push(slot);
    }
    (slots, out_params)
}

/// Build slots from the loose two-sequence callable form.
///
/// This preserves the legacy boundary semantics: a NULL input value means "no
/// input at this position", so a position can still become an output or an
/// untyped NULL. Callers that need a genuine NULL input should use the tagged
/// [`ParamValue`] form instead.
#[must_use]
pub fn slots_from_sequences(
    inputs: Option<&[SqlValue]>,
    outs: Option<&[Option<OutType>]>,
) -> (Vec<ParamSlot>, OutParams) {
    let inputs = inputs.unwrap_or(&[]);
    let outs = outs.unwrap_or(&[]);
    let max = inputs.len().max(outs.len());

    let mut slots = Vec::with_capacity(max);
    let mut out_params = OutParams::new();
    for idx in 0..max {
        let input = inputs
            .get(idx)
            .filter(|value| !value.is_null())
            .cloned();
        let out = outs.get(idx).copied().flatten();
        if let Some(ty) = out {
            out_params.put(idx + 1, ty);
        }
        slots.push(ParamSlot { input, out });
    }
    (slots, out_params)
}

/// Parse a dynamic out-marker sequence (type names or raw vendor codes, with
/// nulls for non-output positions) into typed markers.
///
/// # Errors
///
/// Returns `SqlBridgeError::ParameterError` for markers that are neither
/// null, a known type name, nor an integer code.
pub fn out_types_from_markers(
    markers: &[JsonValue],
) -> Result<Vec<Option<OutType>>, SqlBridgeError> {
    markers.iter().map(OutType::from_name_or_code).collect()
}

/// Fill a plain prepared statement.
///
/// A missing sequence is treated as the canonical empty sequence. For each
/// position the declared type is fetched from statement metadata, the value is
/// encoded against it, and the result is bound by position.
///
/// # Errors
///
/// Propagates encoder coercion failures and driver bind/metadata failures;
/// the fill aborts on the first error with nothing retried.
pub fn fill_prepared<C: DriverConnection>(
    conn: &mut C,
    stmt: &mut C::Statement,
    encoder: &Encoder,
    params: Option<&[SqlValue]>,
) -> Result<(), SqlBridgeError> {
    let params = params.unwrap_or(&[]);
    for (idx, value) in params.iter().enumerate() {
        let pos = idx + 1;
        let descriptor = stmt.parameter_descriptor(pos)?;
        let encoded = encoder.encode(&descriptor, value)?;
        let adapted = adapt_value(conn, encoded)?;
        stmt.bind(pos, adapted)?;
    }
    Ok(())
}

/// Fill a callable statement with mixed IN/OUT parameters.
///
/// Output positions are registered before any parameter metadata is queried;
/// some drivers (PostgreSQL among them) refuse metadata on callable
/// statements with unregistered outputs. Input binding then proceeds using
/// that metadata. Positions with neither an input nor an output are bound as
/// untyped SQL NULL.
///
/// # Errors
///
/// Propagates encoder coercion failures and driver register/bind failures.
pub fn fill_callable<C: DriverConnection>(
    conn: &mut C,
    stmt: &mut C::Statement,
    encoder: &Encoder,
    slots: &[ParamSlot],
    out_params: &OutParams,
) -> Result<(), SqlBridgeError> {
    for (pos, ty) in out_params.iter() {
        stmt.register_out_parameter(pos, ty.vendor_code())?;
    }

    let max = slots.len().max(out_params.max_position());
    for idx in 0..max {
        let pos = idx + 1;
        let slot = slots.get(idx);
        let mut set = false;

        if let Some(value) = slot.and_then(|slot| slot.input.as_ref()) {
            let descriptor = stmt.parameter_descriptor(pos)?;
            let encoded = encoder.encode(&descriptor, value)?;
            let adapted = adapt_value(conn, encoded)?;
            stmt.bind(pos, adapted)?;
            set = true;
        }

        if out_params.contains(pos) {
            set = true;
        }

        if !set {
            // assume untyped null input
            stmt.bind_null(pos, SqlType::Null)?;
        }
    }
    Ok(())
}

/// Turn encoder output into its final driver shape: binary payloads become a
/// connection-created large object populated with the bytes.
fn adapt_value<C: DriverConnection>(
    conn: &mut C,
    value: DriverValue,
) -> Result<DriverValue, SqlBridgeError> {
    match value {
        DriverValue::Bytes(bytes) => {
            let handle = conn.create_blob(&bytes)?;
            Ok(DriverValue::Blob(handle))
        }
        other => Ok(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::FakeConnection;
    use crate::types::SqlType;

    #[test]
    fn normalize_splits_roles() {
        let params = vec![
            ParamValue::In(SqlValue::Int(1)),
            ParamValue::Out(OutType::Named(SqlType::Varchar)),
            ParamValue::InOut(SqlValue::Text("x".into()), OutType::Vendor(-10)),
        ];
        let (slots, out) = normalize(&params);
        assert_eq!(slots.len(), 3);
        assert_eq!(slots[0].input, Some(SqlValue::Int(1)));
        assert_eq!(slots[1].input, None);
        assert_eq!(slots[2].input, Some(SqlValue::Text("x".into())));
        assert!(!out.contains(1));
        assert_eq!(out.get(2), Some(OutType::Named(SqlType::Varchar)));
        assert_eq!(out.get(3), Some(OutType::Vendor(-10)));
    }

    #[test]
    fn tagged_null_input_still_binds() {
        let params = vec![ParamValue::In(SqlValue::Null)];
        let (slots, out) = normalize(&params);
        assert_eq!(slots[0].input, Some(SqlValue::Null));
        assert!(out.is_empty());
    }

    #[test]
    fn loose_form_treats_null_input_as_absent() {
        let inputs = vec![SqlValue::Null, SqlValue::Int(42)];
        let outs = vec![Some(OutType::Named(SqlType::Varchar)), None];
        let (slots, out) = slots_from_sequences(Some(&inputs), Some(&outs));
        assert_eq!(slots[0].input, None);
        assert_eq!(slots[1].input, Some(SqlValue::Int(42)));
        assert!(out.contains(1));
        assert!(!out.contains(2));
    }

    #[test]
    fn plain_fill_binds_each_position_with_declared_type() {
        let mut conn = FakeConnection::new();
        conn.script_metadata(vec![SqlType::Integer, SqlType::Varchar]);
        let journal = conn.journal();
        let mut stmt = conn
            .prepare_for_test("insert into t values (?, ?)", &crate::driver::StatementKind::Plain);

        let params = vec![SqlValue::Int(7), SqlValue::Text("a".into())];
        fill_prepared(&mut conn, &mut stmt, &Encoder::default(), Some(&params)).unwrap();

        let journal = journal.lock().unwrap();
        assert_eq!(journal.binds.len(), 2);
        assert_eq!(journal.descriptor_queries, vec![1, 2]);
        assert_eq!(journal.binds[0], (1, DriverValue::Int(7)));
        assert_eq!(journal.binds[1], (2, DriverValue::Text("a".into())));
    }

    #[test]
    fn null_sequence_behaves_like_empty() {
        let mut conn = FakeConnection::new();
        let journal = conn.journal();
        let mut stmt =
            conn.prepare_for_test("select 1", &crate::driver::StatementKind::Plain);
        fill_prepared(&mut conn, &mut stmt, &Encoder::default(), None).unwrap();
        assert!(journal.lock().unwrap().binds.is_empty());
    }

    #[test]
    fn blob_inputs_become_connection_blobs() {
        let mut conn = FakeConnection::new();
        let journal = conn.journal();
        let mut stmt =
            conn.prepare_for_test("insert into t values (?)", &crate::driver::StatementKind::Plain);
        let params = vec![SqlValue::Blob(vec![0xde, 0xad])];
        fill_prepared(&mut conn, &mut stmt, &Encoder::default(), Some(&params)).unwrap();

        let journal = journal.lock().unwrap();
        assert_eq!(journal.blobs, vec![vec![0xde, 0xad]]);
        assert!(matches!(journal.binds[0].1, DriverValue::Blob(_)));
    }

    #[test]
    fn callable_fill_registers_before_metadata() {
        let mut conn = FakeConnection::new();
        let journal = conn.journal();
        let mut stmt =
            conn.prepare_for_test("call p(?, ?)", &crate::driver::StatementKind::Callable);

        let inputs = vec![SqlValue::Null, SqlValue::Int(42)];
        let outs = vec![Some(OutType::Named(SqlType::Varchar)), None];
        let (slots, out_params) = slots_from_sequences(Some(&inputs), Some(&outs));
        fill_callable(&mut conn, &mut stmt, &Encoder::default(), &slots, &out_params).unwrap();

        let journal = journal.lock().unwrap();
        assert_eq!(
            journal.registrations,
            vec![(1, SqlType::Varchar.vendor_code())]
        );
        assert!(journal.register_order_ok);
        assert_eq!(journal.binds, vec![(2, DriverValue::Int(42))]);
        assert!(journal.null_binds.is_empty());
    }

    #[test]
    fn unset_positions_bind_untyped_null() {
        let mut conn = FakeConnection::new();
        let journal = conn.journal();
        let mut stmt =
            conn.prepare_for_test("call p(?, ?, ?)", &crate::driver::StatementKind::Callable);

        // position 2 has neither input nor output
        let inputs = vec![SqlValue::Int(1), SqlValue::Null, SqlValue::Null];
        let outs = vec![None, None, Some(OutType::Named(SqlType::Integer))];
        let (slots, out_params) = slots_from_sequences(Some(&inputs), Some(&outs));
        fill_callable(&mut conn, &mut stmt, &Encoder::default(), &slots, &out_params).unwrap();

        let journal = journal.lock().unwrap();
        assert_eq!(journal.binds, vec![(1, DriverValue::Int(1))]);
        assert_eq!(journal.null_binds, vec![(2, SqlType::Null)]);
    }

    #[test]
    fn tagged_null_input_binds_explicit_null() {
        let mut conn = FakeConnection::new();
        let journal = conn.journal();
        let mut stmt =
            conn.prepare_for_test("call p(?, ?)", &crate::driver::StatementKind::Callable);

        let params = vec![
            ParamValue::In(SqlValue::Null),
            ParamValue::Out(OutType::Named(SqlType::Integer)),
        ];
        let (slots, out_params) = normalize(&params);
        fill_callable(&mut conn, &mut stmt, &Encoder::default(), &slots, &out_params).unwrap();

        let journal = journal.lock().unwrap();
        assert_eq!(journal.binds, vec![(1, DriverValue::Null)]);
        assert!(journal.null_binds.is_empty());
    }

    #[test]
    fn inout_position_binds_and_registers() {
        let mut conn = FakeConnection::new();
        let journal = conn.journal();
        let mut stmt =
            conn.prepare_for_test("call p(?)", &crate::driver::StatementKind::Callable);

        let params = vec![ParamValue::InOut(
            SqlValue::Int(5),
            OutType::Named(SqlType::Integer),
        )];
        let (slots, out_params) = normalize(&params);
        fill_callable(&mut conn, &mut stmt, &Encoder::default(), &slots, &out_params).unwrap();

        let journal = journal.lock().unwrap();
        assert_eq!(journal.binds, vec![(1, DriverValue::Int(5))]);
        assert_eq!(
            journal.registrations,
            vec![(1, SqlType::Integer.vendor_code())]
        );
    }
}
