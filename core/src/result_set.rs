//! Materialized result sets.
//!
//! The query engine produces a fully materialized result; an edit session
//! overlays it and writes committed changes back through [`ResultSetCache`].

use crate::{CellValue, CoreError, CoreResult, Row, RowId, SqlType};

/// Descriptor of one result column as reported by the query engine.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultColumn {
    /// Column name.
    pub name: String,
    /// Zero-based position in the row.
    pub ordinal: usize,
    /// Declared type.
    pub sql_type: SqlType,
    /// Whether the column allows NULL.
    pub nullable: bool,
}

impl ResultColumn {
    pub fn new(name: impl Into<String>, ordinal: usize, declared_type: &str) -> Self {
        Self {
            name: name.into(),
            ordinal,
            sql_type: SqlType::parse(declared_type),
            nullable: false,
        }
    }

    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }
}

/// Storage for the rows of one materialized result set.
///
/// Removing a row leaves a tombstone: later rows keep their ids.
pub trait ResultSetCache: Send {
    /// Column descriptors in ordinal order.
    fn columns(&self) -> &[ResultColumn];

    /// Number of live (non-removed) rows.
    fn row_count(&self) -> u64;

    /// The id the next [`add_row`](Self::add_row) will return.
    fn next_row_id(&self) -> RowId;

    /// Get a live row by id.
    fn get_row(&self, row_id: RowId) -> Option<Row>;

    /// Ids of all live rows in ascending order.
    fn row_ids(&self) -> Vec<RowId>;

    /// Append a row and return its id.
    fn add_row(&mut self, cells: Vec<CellValue>) -> CoreResult<RowId>;

    /// Store a row under an id at or after [`next_row_id`](Self::next_row_id).
    /// Ids skipped over become tombstones.
    fn insert_row(&mut self, row_id: RowId, cells: Vec<CellValue>) -> CoreResult<()>;

    /// Replace the cells of a live row.
    fn update_row(&mut self, row_id: RowId, cells: Vec<CellValue>) -> CoreResult<()>;

    /// Tombstone a live row.
    fn remove_row(&mut self, row_id: RowId) -> CoreResult<()>;
}

/// In-memory result set for tests and simple hosts.
#[derive(Debug, Clone, Default)]
pub struct MemoryResultSet {
    columns: Vec<ResultColumn>,
    /// `None` marks a removed row.
    slots: Vec<Option<Vec<CellValue>>>,
    live: u64,
}

impl MemoryResultSet {
    /// Create an empty result set.
    pub fn new(columns: Vec<ResultColumn>) -> Self {
        Self {
            columns,
            slots: Vec::new(),
            live: 0,
        }
    }

    /// Create a result set pre-populated with rows.
    pub fn with_rows(columns: Vec<ResultColumn>, rows: Vec<Vec<CellValue>>) -> CoreResult<Self> {
        let mut set = Self::new(columns);
        for cells in rows {
            set.add_row(cells)?;
        }
        Ok(set)
    }

    fn check_width(&self, cells: &[CellValue]) -> CoreResult<()> {
        if cells.len() != self.columns.len() {
            return Err(CoreError::column_count_mismatch(self.columns.len(), cells.len()));
        }
        Ok(())
    }

    fn slot_mut(&mut self, row_id: RowId) -> CoreResult<&mut Option<Vec<CellValue>>> {
        usize::try_from(row_id.raw())
            .ok()
            .and_then(|index| self.slots.get_mut(index))
            .filter(|slot| slot.is_some())
            .ok_or(CoreError::RowNotFound(row_id))
    }
}

impl ResultSetCache for MemoryResultSet {
    fn columns(&self) -> &[ResultColumn] {
        &self.columns
    }

    fn row_count(&self) -> u64 {
        self.live
    }

    fn next_row_id(&self) -> RowId {
        RowId(self.slots.len() as u64)
    }

    fn get_row(&self, row_id: RowId) -> Option<Row> {
        let index = usize::try_from(row_id.raw()).ok()?;
        self.slots
            .get(index)?
            .as_ref()
            .map(|cells| Row::new(row_id, cells.clone()))
    }

    fn row_ids(&self) -> Vec<RowId> {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.is_some())
            .map(|(index, _)| RowId(index as u64))
            .collect()
    }

    fn add_row(&mut self, cells: Vec<CellValue>) -> CoreResult<RowId> {
        self.check_width(&cells)?;
        let id = self.next_row_id();
        self.slots.push(Some(cells));
        self.live += 1;
        Ok(id)
    }

    fn insert_row(&mut self, row_id: RowId, cells: Vec<CellValue>) -> CoreResult<()> {
        self.check_width(&cells)?;
        if row_id < self.next_row_id() {
            return Err(CoreError::RowIdInUse(row_id));
        }
        let index = usize::try_from(row_id.raw()).map_err(|_| CoreError::RowNotFound(row_id))?;
        self.slots.resize(index, None);
        self.slots.push(Some(cells));
        self.live += 1;
        Ok(())
    }

    fn update_row(&mut self, row_id: RowId, cells: Vec<CellValue>) -> CoreResult<()> {
        self.check_width(&cells)?;
        *self.slot_mut(row_id)? = Some(cells);
        Ok(())
    }

    fn remove_row(&mut self, row_id: RowId) -> CoreResult<()> {
        *self.slot_mut(row_id)? = None;
        self.live -= 1;
        Ok(())
    }
}
