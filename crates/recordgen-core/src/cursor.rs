use crate::{
    CoreError,
    bag::PropertyBag,
    value::Stored,
};

///
/// RowCursor
///
/// Positioned reader over one fetched row, addressed by column index.
/// Numeric getters read null as zero, matching the usual backend behaviour.
///

pub trait RowCursor {
    fn column_index(&self, name: &str) -> Option<usize>;

    fn stored(&self, index: usize) -> Option<&Stored>;

    fn column(&self, name: &str) -> Result<usize, CoreError> {
        self.column_index(name)
            .ok_or_else(|| CoreError::UnknownColumn(name.to_string()))
    }

    fn is_null(&self, index: usize) -> bool {
        matches!(self.stored(index), None | Some(Stored::Null))
    }

    fn get_long(&self, index: usize) -> Result<i64, CoreError> {
        match self.stored(index) {
            None | Some(Stored::Null) => Ok(0),
            Some(Stored::Integer(v)) => Ok(*v),
            Some(other) => Err(CoreError::mismatch(&index.to_string(), "integer", other.kind())),
        }
    }

    fn get_int(&self, index: usize) -> Result<i32, CoreError> {
        let value = self.get_long(index)?;

        i32::try_from(value).map_err(|_| CoreError::mismatch(&index.to_string(), "int", "long"))
    }

    fn get_double(&self, index: usize) -> Result<f64, CoreError> {
        match self.stored(index) {
            None | Some(Stored::Null) => Ok(0.0),
            Some(Stored::Real(v)) => Ok(*v),
            #[allow(clippy::cast_precision_loss)]
            Some(Stored::Integer(v)) => Ok(*v as f64),
            Some(other) => Err(CoreError::mismatch(&index.to_string(), "real", other.kind())),
        }
    }

    #[allow(clippy::cast_possible_truncation)]
    fn get_float(&self, index: usize) -> Result<f32, CoreError> {
        self.get_double(index).map(|v| v as f32)
    }

    fn get_string(&self, index: usize) -> Result<Option<String>, CoreError> {
        match self.stored(index) {
            None | Some(Stored::Null) => Ok(None),
            Some(Stored::Text(s)) => Ok(Some(s.clone())),
            Some(Stored::Integer(v)) => Ok(Some(v.to_string())),
            Some(Stored::Real(v)) => Ok(Some(v.to_string())),
            Some(Stored::Blob(_)) => Err(CoreError::mismatch(&index.to_string(), "text", "blob")),
        }
    }
}

///
/// MemoryCursor
///
/// Single-row cursor held in memory.
///

#[derive(Clone, Debug, Default, PartialEq)]
pub struct MemoryCursor {
    columns: Vec<String>,
    row: Vec<Stored>,
}

impl MemoryCursor {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            columns: Vec::new(),
            row: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_column(mut self, name: impl Into<String>, value: Stored) -> Self {
        self.columns.push(name.into());
        self.row.push(value);
        self
    }

    /// The row a backend would return after storing `bag`.
    #[must_use]
    pub fn from_bag(bag: &PropertyBag) -> Self {
        bag.iter().fold(Self::new(), |cursor, (key, value)| {
            cursor.with_column(key, Stored::from(value.clone()))
        })
    }

    #[must_use]
    pub const fn column_count(&self) -> usize {
        self.columns.len()
    }
}

impl RowCursor for MemoryCursor {
    fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    fn stored(&self, index: usize) -> Option<&Stored> {
        self.row.get(index)
    }
}
