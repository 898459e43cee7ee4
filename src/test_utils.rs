//! In-memory fake driver for exercising the bridge without a vendor driver.
//!
//! The fake records every driver-contract call in a shared journal so tests
//! can assert on bind counts, registration ordering, and prepared statement
//! kinds. Scripted metadata, rows, generated keys, and out values shape what
//! executions report back.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::driver::{
    BlobHandle, ColumnDescriptor, DriverConnection, DriverRows, DriverStatement, DriverValue,
    StatementKind,
};
use crate::error::DriverError;
use crate::types::SqlType;

/// Everything the fake driver observed, in call order.
#[derive(Debug, Default)]
pub struct Journal {
    pub prepared: Vec<(String, StatementKind)>,
    pub descriptor_queries: Vec<usize>,
    pub binds: Vec<(usize, DriverValue)>,
    pub null_binds: Vec<(usize, SqlType)>,
    pub registrations: Vec<(usize, i32)>,
    pub blobs: Vec<Vec<u8>>,
    pub executes: usize,
    /// False if any out-parameter registration arrived after the first
    /// parameter-metadata query on the same statement.
    pub register_order_ok: bool,
    metadata_queried: bool,
}

impl Journal {
    fn new() -> Self {
        Self {
            register_order_ok: true,
            ..Self::default()
        }
    }
}

/// Scripted driver connection.
pub struct FakeConnection {
    metadata: Vec<ColumnDescriptor>,
    has_rows: bool,
    result: DriverRows,
    rows_affected: u64,
    generated_keys: DriverRows,
    out_values: HashMap<usize, DriverValue>,
    fail_execute: Option<DriverError>,
    journal: Arc<Mutex<Journal>>,
    next_blob: u64,
}

impl Default for FakeConnection {
    fn default() -> Self {
        Self::new()
    }
}

impl FakeConnection {
    #[must_use]
    pub fn new() -> Self {
        Self {
            metadata: Vec::new(),
            has_rows: false,
            result: DriverRows::default(),
            rows_affected: 0,
            generated_keys: DriverRows::default(),
            out_values: HashMap::new(),
            fail_execute: None,
            journal: Arc::new(Mutex::new(Journal::new())),
            next_blob: 1,
        }
    }

    /// Handle to the shared journal; keep a clone before moving the
    /// connection into a worker.
    #[must_use]
    pub fn journal(&self) -> Arc<Mutex<Journal>> {
        Arc::clone(&self.journal)
    }

    /// Declared parameter types reported by metadata, position 1 first.
    /// Positions beyond the scripted list report VARCHAR.
    pub fn script_metadata(&mut self, types: Vec<SqlType>) {
        self.metadata = types.into_iter().map(ColumnDescriptor::of).collect();
    }

    /// Result rows produced by the next executions.
    pub fn script_rows(&mut self, column_names: Vec<String>, rows: Vec<Vec<DriverValue>>) {
        self.has_rows = true;
        self.result = DriverRows { column_names, rows };
    }

    pub fn script_rows_affected(&mut self, count: u64) {
        self.rows_affected = count;
    }

    pub fn script_generated_keys(&mut self, column_names: Vec<String>, rows: Vec<Vec<DriverValue>>) {
        self.generated_keys = DriverRows { column_names, rows };
    }

    pub fn script_out_value(&mut self, pos: usize, value: DriverValue) {
        self.out_values.insert(pos, value);
    }

    pub fn fail_next_execute(&mut self, error: DriverError) {
        self.fail_execute = Some(error);
    }

    /// Prepare a statement outside the bridge pipeline, for unit tests that
    /// drive the filler directly.
    ///
    /// # Panics
    ///
    /// Panics if preparation fails, which the fake never does.
    pub fn prepare_for_test(&mut self, sql: &str, kind: &StatementKind) -> FakeStatement {
        self.prepare(sql, kind).expect("fake prepare cannot fail")
    }
}

impl DriverConnection for FakeConnection {
    type Statement = FakeStatement;

    fn prepare(
        &mut self,
        sql: &str,
        kind: &StatementKind,
    ) -> Result<Self::Statement, DriverError> {
        self.journal
            .lock()
            .expect("journal lock")
            .prepared
            .push((sql.to_owned(), kind.clone()));
        Ok(FakeStatement {
            callable: *kind == StatementKind::Callable,
            metadata: self.metadata.clone(),
            has_rows: self.has_rows,
            result: self.result.clone(),
            rows_affected: self.rows_affected,
            generated_keys: self.generated_keys.clone(),
            out_values: self.out_values.clone(),
            fail_execute: self.fail_execute.take(),
            registered: Vec::new(),
            journal: Arc::clone(&self.journal),
        })
    }

    fn create_blob(&mut self, bytes: &[u8]) -> Result<BlobHandle, DriverError> {
        self.journal
            .lock()
            .expect("journal lock")
            .blobs
            .push(bytes.to_vec());
        let handle = BlobHandle(self.next_blob);
        self.next_blob += 1;
        Ok(handle)
    }
}

/// Statement handle produced by [`FakeConnection`].
pub struct FakeStatement {
    callable: bool,
    metadata: Vec<ColumnDescriptor>,
    has_rows: bool,
    result: DriverRows,
    rows_affected: u64,
    generated_keys: DriverRows,
    out_values: HashMap<usize, DriverValue>,
    fail_execute: Option<DriverError>,
    registered: Vec<usize>,
    journal: Arc<Mutex<Journal>>,
}

impl DriverStatement for FakeStatement {
    fn parameter_descriptor(&mut self, pos: usize) -> Result<ColumnDescriptor, DriverError> {
        let mut journal = self.journal.lock().expect("journal lock");
        journal.descriptor_queries.push(pos);
        journal.metadata_queried = true;
        Ok(self
            .metadata
            .get(pos - 1)
            .copied()
            .unwrap_or_else(|| ColumnDescriptor::of(SqlType::Varchar)))
    }

    fn bind(&mut self, pos: usize, value: DriverValue) -> Result<(), DriverError> {
        self.journal
            .lock()
            .expect("journal lock")
            .binds
            .push((pos, value));
        Ok(())
    }

    fn bind_null(&mut self, pos: usize, sql_type: SqlType) -> Result<(), DriverError> {
        self.journal
            .lock()
            .expect("journal lock")
            .null_binds
            .push((pos, sql_type));
        Ok(())
    }

    fn register_out_parameter(&mut self, pos: usize, vendor_code: i32) -> Result<(), DriverError> {
        if !self.callable {
            return Err(DriverError::new(
                "register_out_parameter on a non-callable statement",
            ));
        }
        let mut journal = self.journal.lock().expect("journal lock");
        if journal.metadata_queried {
            journal.register_order_ok = false;
        }
        journal.registrations.push((pos, vendor_code));
        self.registered.push(pos);
        Ok(())
    }

    fn execute(&mut self) -> Result<bool, DriverError> {
        self.journal.lock().expect("journal lock").executes += 1;
        if let Some(error) = self.fail_execute.take() {
            return Err(error);
        }
        Ok(self.has_rows)
    }

    fn result_rows(&mut self) -> Result<DriverRows, DriverError> {
        if !self.has_rows {
            return Err(DriverError::new("no result set available"));
        }
        Ok(self.result.clone())
    }

    fn rows_affected(&mut self) -> Result<u64, DriverError> {
        Ok(self.rows_affected)
    }

    fn generated_keys(&mut self) -> Result<DriverRows, DriverError> {
        Ok(self.generated_keys.clone())
    }

    fn out_value(&mut self, pos: usize) -> Result<DriverValue, DriverError> {
        if !self.registered.contains(&pos) {
            return Err(DriverError::new(format!(
                "position {pos} was never registered as an output parameter"
            )));
        }
        Ok(self
            .out_values
            .get(&pos)
            .cloned()
            .unwrap_or(DriverValue::Null))
    }
}
