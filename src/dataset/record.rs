use crate::error::DatasetError;
use rustc_hash::FxHashMap;

/// One source row: field values in header order, `None` where the cell is empty.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Record {
    values: Vec<Option<String>>,
}

impl Record {
    pub fn new(values: Vec<Option<String>>) -> Self {
        Self { values }
    }

    /// Value of the column at `column`, if present and non-empty
    #[inline]
    pub fn get(&self, column: usize) -> Option<&str> {
        self.values.get(column).and_then(|v| v.as_deref())
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// An ordered, immutable table of records sharing one header.
///
/// A record is identified by its 0-based position in the table.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    columns: Vec<String>,
    column_index: FxHashMap<String, usize>,
    records: Vec<Record>,
}

impl Dataset {
    /// Build a dataset from a header and rows.
    ///
    /// Rows shorter than the header are padded with absent values; longer rows
    /// are rejected.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<Option<String>>>) -> Result<Self, DatasetError> {
        let width = columns.len();
        let mut records = Vec::with_capacity(rows.len());

        for (row, mut values) in rows.into_iter().enumerate() {
            if values.len() > width {
                return Err(DatasetError::RaggedRow {
                    row: row + 1,
                    expected: width,
                    found: values.len(),
                });
            }
            values.resize(width, None);
            records.push(Record::new(values));
        }

        let column_index = columns
            .iter()
            .enumerate()
            .map(|(i, name)| (name.clone(), i))
            .collect();

        Ok(Self {
            columns,
            column_index,
            records,
        })
    }

    /// Convenience constructor from string cells; empty strings become absent values
    pub fn from_strings<S: AsRef<str>>(columns: &[S], rows: &[Vec<S>]) -> Result<Self, DatasetError> {
        let columns = columns.iter().map(|c| c.as_ref().to_string()).collect();
        let rows = rows
            .iter()
            .map(|row| {
                row.iter()
                    .map(|cell| {
                        let cell = cell.as_ref();
                        (!cell.is_empty()).then(|| cell.to_string())
                    })
                    .collect()
            })
            .collect();
        Self::new(columns, rows)
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn record(&self, position: usize) -> Option<&Record> {
        self.records.get(position)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Position of a column by name
    pub fn column(&self, name: &str) -> Option<usize> {
        self.column_index.get(name).copied()
    }

    /// Resolve column names to positions, failing on the first missing one
    pub fn resolve_columns(&self, names: &[String]) -> Result<Vec<usize>, DatasetError> {
        names
            .iter()
            .map(|name| {
                self.column(name)
                    .ok_or_else(|| DatasetError::MissingColumn(name.clone()))
            })
            .collect()
    }
}

/// Which columns are searched and how results are laid out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSchema {
    search_fields: Vec<String>,
    output_fields: Vec<String>,
    separator: char,
}

impl FieldSchema {
    /// `id_field` is printed first and followed by `separator`; the search
    /// fields follow in order.
    pub fn new(search_fields: Vec<String>, id_field: String, separator: char) -> Self {
        let mut output_fields = Vec::with_capacity(search_fields.len() + 1);
        output_fields.push(id_field);
        output_fields.extend(search_fields.iter().cloned());

        Self {
            search_fields,
            output_fields,
            separator,
        }
    }

    pub fn search_fields(&self) -> &[String] {
        &self.search_fields
    }

    pub fn output_fields(&self) -> &[String] {
        &self.output_fields
    }

    pub fn id_field(&self) -> &str {
        &self.output_fields[0]
    }

    pub fn separator(&self) -> char {
        self.separator
    }

    /// Bind the schema to a dataset's header
    pub fn resolve(&self, dataset: &Dataset) -> Result<ResolvedSchema, DatasetError> {
        let search_columns = dataset.resolve_columns(&self.search_fields)?;
        let output_columns = dataset.resolve_columns(&self.output_fields)?;

        Ok(ResolvedSchema {
            search_columns,
            separator_after: output_columns[0],
            output_columns,
            separator: self.separator,
        })
    }
}

/// A [`FieldSchema`] with names replaced by column positions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedSchema {
    pub search_columns: Vec<usize>,
    pub output_columns: Vec<usize>,
    pub separator_after: usize,
    pub separator: char,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Dataset {
        Dataset::from_strings(
            &["郵便番号", "都道府県", "市区町村"],
            &[
                vec!["1500000", "東京都", "渋谷区"],
                vec!["5300000", "大阪府", ""],
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_empty_cells_are_absent() {
        let dataset = sample();
        let record = dataset.record(1).unwrap();
        assert_eq!(record.get(1), Some("大阪府"));
        assert_eq!(record.get(2), None);
        assert_eq!(record.get(99), None);
    }

    #[test]
    fn test_short_rows_are_padded() {
        let dataset = Dataset::new(
            vec!["a".into(), "b".into()],
            vec![vec![Some("x".into())]],
        )
        .unwrap();
        assert_eq!(dataset.record(0).unwrap().len(), 2);
        assert_eq!(dataset.record(0).unwrap().get(1), None);
    }

    #[test]
    fn test_long_rows_are_rejected() {
        let err = Dataset::new(
            vec!["a".into()],
            vec![vec![Some("x".into()), Some("y".into())]],
        )
        .unwrap_err();
        assert!(matches!(
            err,
            DatasetError::RaggedRow {
                row: 1,
                expected: 1,
                found: 2
            }
        ));
    }

    #[test]
    fn test_resolve_schema() {
        let dataset = sample();
        let schema = FieldSchema::new(
            vec!["都道府県".into(), "市区町村".into()],
            "郵便番号".into(),
            '\u{3000}',
        );
        let resolved = schema.resolve(&dataset).unwrap();
        assert_eq!(resolved.search_columns, vec![1, 2]);
        assert_eq!(resolved.output_columns, vec![0, 1, 2]);
        assert_eq!(resolved.separator_after, 0);
    }

    #[test]
    fn test_resolve_missing_column() {
        let dataset = sample();
        let schema = FieldSchema::new(vec!["町域".into()], "郵便番号".into(), ' ');
        assert!(matches!(
            schema.resolve(&dataset),
            Err(DatasetError::MissingColumn(name)) if name == "町域"
        ));
    }
}
