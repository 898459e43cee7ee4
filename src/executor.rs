use std::sync::Arc;

use crate::codec::{Decoder, Encoder};
use crate::driver::{DriverConnection, DriverRows, DriverStatement, StatementKind};
use crate::error::SqlBridgeError;
use crate::results::ResultSet;
use crate::statement::{
    ExecOptions, choose_kind, fill_callable, fill_prepared, normalize, wants_generated_keys,
};
use crate::types::{ParamValue, SqlValue};

/// Everything one execution can produce, normalized into the application
/// representation.
#[derive(Debug, Clone, Default)]
pub struct BridgeResponse {
    /// Rows affected by a DML statement (0 for pure queries).
    pub rows_affected: u64,
    /// Result rows, when the statement produced a result set.
    pub rows: Option<ResultSet>,
    /// Auto-generated keys, when requested and not suppressed.
    pub generated_keys: Option<ResultSet>,
    /// Output-parameter values by 1-based position, in position order.
    pub out_values: Vec<(usize, SqlValue)>,
}

/// Run one statement against the blocking driver connection.
///
/// This is the synchronous pipeline the worker thread executes: normalize
/// parameters, choose the statement kind, prepare, fill, execute, decode.
/// The statement handle is dropped on every exit path, so driver-side
/// cursors are released even when binding or execution fails.
///
/// # Errors
///
/// Propagates coercion, generated-key validation, and driver failures;
/// binding errors abort before execution, so nothing partially commits.
pub fn execute_blocking<C: DriverConnection>(
    conn: &mut C,
    sql: &str,
    params: &[ParamValue],
    options: &ExecOptions,
    encoder: &Encoder,
    decoder: &Decoder,
) -> Result<BridgeResponse, SqlBridgeError> {
    let (slots, out_params) = normalize(params);
    let return_keys = wants_generated_keys(&out_params, options);
    let kind = choose_kind(&out_params, options)?;
    tracing::debug!(?kind, params = params.len(), "executing statement");

    let mut stmt = conn.prepare(sql, &kind)?;

    if kind == StatementKind::Callable {
        fill_callable(conn, &mut stmt, encoder, &slots, &out_params)?;
    } else {
        let inputs: Vec<SqlValue> = slots
            .into_iter()
            .map(|slot| slot.input.unwrap_or(SqlValue::Null))
            .collect();
        fill_prepared(conn, &mut stmt, encoder, Some(&inputs))?;
    }

    let has_rows = stmt.execute()?;

    let rows = if has_rows {
        Some(decode_rows(stmt.result_rows()?, decoder)?)
    } else {
        None
    };

    let rows_affected = if has_rows { 0 } else { stmt.rows_affected()? };

    let generated_keys = if return_keys {
        Some(decode_rows(stmt.generated_keys()?, decoder)?)
    } else {
        None
    };

    let mut out_values = Vec::with_capacity(out_params.len());
    for (pos, _) in out_params.iter() {
        let value = decoder.decode(stmt.out_value(pos)?)?;
        out_values.push((pos, value));
    }

    Ok(BridgeResponse {
        rows_affected,
        rows,
        generated_keys,
        out_values,
    })
}

fn decode_rows(raw: DriverRows, decoder: &Decoder) -> Result<ResultSet, SqlBridgeError> {
    let mut result_set = ResultSet::with_capacity(raw.rows.len());
    result_set.set_column_names(Arc::new(raw.column_names));
    for row in raw.rows {
        result_set.add_row_values(decoder.decode_row(row)?);
    }
    Ok(result_set)
}
