use serde_json::Value as JsonValue;

use crate::driver::StatementKind;
use crate::error::SqlBridgeError;
use crate::statement::out_params::OutParams;

/// Per-execution options supplied by the client boundary.
#[derive(Debug, Clone, Default)]
pub struct ExecOptions {
    /// Generic "return generated keys" request.
    pub return_generated_keys: bool,
    /// Explicit generated-key column identifiers, all-string or all-integer.
    /// Arrives as dynamic values from the loosely-typed caller.
    pub generated_key_identifiers: Option<Vec<JsonValue>>,
}

impl ExecOptions {
    #[must_use]
    pub fn with_generated_keys() -> Self {
        Self {
            return_generated_keys: true,
            generated_key_identifiers: None,
        }
    }

    #[must_use]
    pub fn with_key_identifiers(identifiers: Vec<JsonValue>) -> Self {
        Self {
            return_generated_keys: false,
            generated_key_identifiers: Some(identifiers),
        }
    }

    fn has_key_identifiers(&self) -> bool {
        self.generated_key_identifiers
            .as_ref()
            .is_some_and(|ids| !ids.is_empty())
    }
}

/// Whether the execution should fetch generated keys afterwards.
///
/// Suppressed whenever output parameters exist: drivers that run callable
/// statements often cannot also report generated keys, so output parameters
/// win.
#[must_use]
pub fn wants_generated_keys(out_params: &OutParams, options: &ExecOptions) -> bool {
    out_params.is_empty() && (options.return_generated_keys || options.has_key_identifiers())
}

/// Select the statement kind for this execution.
///
/// Priority order: callable when any output parameter exists, then key-scoped
/// prepared statements, then the generic generated-keys request, then plain.
///
/// # Errors
///
/// Returns `SqlBridgeError::GeneratedKeysError` when explicit key identifiers
/// are neither uniformly strings nor uniformly integers. This fails before
/// any statement is created.
pub fn choose_kind(
    out_params: &OutParams,
    options: &ExecOptions,
) -> Result<StatementKind, SqlBridgeError> {
    if !out_params.is_empty() {
        return Ok(StatementKind::Callable);
    }

    if let Some(identifiers) = options.generated_key_identifiers.as_ref()
        && !identifiers.is_empty()
    {
        return key_scoped_kind(identifiers);
    }

    if options.return_generated_keys {
        return Ok(StatementKind::ReturnGeneratedKeys);
    }

    Ok(StatementKind::Plain)
}

fn key_scoped_kind(identifiers: &[JsonValue]) -> Result<StatementKind, SqlBridgeError> {
    match &identifiers[0] {
        JsonValue::Number(_) => {
            let mut indexes = Vec::with_capacity(identifiers.len());
            for id in identifiers {
                let index = id
                    .as_i64()
                    .and_then(|n| i32::try_from(n).ok())
                    .ok_or_else(invalid_identifier)?;
                indexes.push(index);
            }
            Ok(StatementKind::GeneratedKeyIndexes(indexes))
        }
        JsonValue::String(_) => {
            let mut names = Vec::with_capacity(identifiers.len());
            for id in identifiers {
                let name = id.as_str().ok_or_else(invalid_identifier)?;
                names.push(name.to_owned());
            }
            Ok(StatementKind::GeneratedKeyNames(names))
        }
        _ => Err(invalid_identifier()),
    }
}

fn invalid_identifier() -> SqlBridgeError {
    SqlBridgeError::GeneratedKeysError(
        "invalid generated-key identifier type, only [int, String] allowed".into(),
    )
}
