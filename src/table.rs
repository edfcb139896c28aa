// src/table.rs

use arrow::{
    array::{Array, ArrayRef, StringArray},
    datatypes::{DataType, Field, Schema},
    error::ArrowError,
    record_batch::{RecordBatch, RecordBatchOptions},
    util::display::{ArrayFormatter, FormatOptions},
};
use csv::{ReaderBuilder, WriterBuilder};
use std::{
    collections::HashSet,
    fmt::Display,
    fs::File,
    io::{Read, Write},
    path::Path,
    sync::Arc,
};

use crate::error::{Result, SynthError};

/// Tabular data where every cell has been coerced to text.
///
/// Column names are unique and every row holds exactly one cell per column.
/// The number of columns is not restricted here; the schema guard decides
/// what shapes it accepts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalTable {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl CanonicalTable {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(headers.len());
        for h in &headers {
            if !seen.insert(h.as_str()) {
                return Err(SynthError::schema(format!("duplicate column name {:?}", h)));
            }
        }
        for (i, row) in rows.iter().enumerate() {
            if row.len() != headers.len() {
                return Err(SynthError::schema(format!(
                    "row {} has {} cells, expected {}",
                    i,
                    row.len(),
                    headers.len()
                )));
            }
        }
        Ok(Self { headers, rows })
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn num_columns(&self) -> usize {
        self.headers.len()
    }

    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    /// Cells of the column called `name`, top to bottom.
    pub fn column(&self, name: &str) -> Option<Vec<&str>> {
        let idx = self.headers.iter().position(|h| h == name)?;
        Some(self.rows.iter().map(|r| r[idx].as_str()).collect())
    }

    /// Build an all-Utf8 arrow batch with the same columns and rows.
    ///
    /// The row count is carried explicitly, so a table without columns
    /// still yields a batch of the right length.
    pub fn to_record_batch(&self) -> Result<RecordBatch> {
        let fields: Vec<Field> = self
            .headers
            .iter()
            .map(|h| Field::new(h, DataType::Utf8, false))
            .collect();
        let arrays: Vec<ArrayRef> = (0..self.headers.len())
            .map(|i| {
                let cells: Vec<&str> = self.rows.iter().map(|r| r[i].as_str()).collect();
                Arc::new(StringArray::from(cells)) as ArrayRef
            })
            .collect();
        let options = RecordBatchOptions::new().with_row_count(Some(self.num_rows()));
        RecordBatch::try_new_with_options(Arc::new(Schema::new(fields)), arrays, &options)
            .map_err(|e| SynthError::schema(format!("building record batch: {}", e)))
    }

    /// Write as comma-delimited text: a header row, then one line per row.
    pub fn write_csv<W: Write>(&self, w: W) -> Result<()> {
        let mut wtr = WriterBuilder::new().has_headers(false).from_writer(w);
        wtr.write_record(&self.headers)?;
        for row in &self.rows {
            wtr.write_record(row)?;
        }
        wtr.flush().map_err(csv::Error::from)?;
        Ok(())
    }

    /// Parse comma-delimited text whose first row holds the column names.
    pub fn read_csv<R: Read>(r: R) -> Result<Self> {
        let mut rdr = ReaderBuilder::new().has_headers(true).from_reader(r);
        let headers: Vec<String> = rdr.headers()?.iter().map(|s| s.to_string()).collect();
        let mut rows = Vec::new();
        for record in rdr.records() {
            let record = record?;
            rows.push(record.iter().map(|s| s.to_string()).collect());
        }
        Self::new(headers, rows)
    }
}

/// Read a table previously written by [`crate::Synthesizer::write_table`].
pub fn read_table<P: AsRef<Path>>(path: P) -> Result<CanonicalTable> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| SynthError::io(path, e))?;
    CanonicalTable::read_csv(file)
}

/// Anything with rows and columns that can be coerced into a [`CanonicalTable`].
pub trait TabularInput {
    fn into_table(self) -> Result<CanonicalTable>;
}

impl TabularInput for CanonicalTable {
    fn into_table(self) -> Result<CanonicalTable> {
        Ok(self)
    }
}

impl TabularInput for &CanonicalTable {
    fn into_table(self) -> Result<CanonicalTable> {
        Ok(self.clone())
    }
}

/// Row-major values without names: columns are named by position.
impl<T: Display> TabularInput for Vec<Vec<T>> {
    fn into_table(self) -> Result<CanonicalTable> {
        let width = self.first().map_or(0, Vec::len);
        let headers = (0..width).map(|i| i.to_string()).collect();
        CanonicalTable::new(headers, stringify_rows(self))
    }
}

/// `(column names, rows)`
impl<H: Display, T: Display> TabularInput for (Vec<H>, Vec<Vec<T>>) {
    fn into_table(self) -> Result<CanonicalTable> {
        let (names, rows) = self;
        let headers = names.iter().map(|h| h.to_string()).collect();
        CanonicalTable::new(headers, stringify_rows(rows))
    }
}

impl TabularInput for &RecordBatch {
    fn into_table(self) -> Result<CanonicalTable> {
        let headers: Vec<String> = self
            .schema()
            .fields()
            .iter()
            .map(|f| f.name().to_string())
            .collect();

        let options = FormatOptions::default().with_null("");
        let mut columns = Vec::with_capacity(self.num_columns());
        for (name, col) in headers.iter().zip(self.columns()) {
            let to_text =
                |e: ArrowError| SynthError::schema(format!("column {:?} to text: {}", name, e));
            let formatter = ArrayFormatter::try_new(col.as_ref(), &options).map_err(to_text)?;
            let cells = (0..col.len())
                .map(|i| formatter.value(i).try_to_string())
                .collect::<std::result::Result<Vec<String>, ArrowError>>()
                .map_err(to_text)?;
            columns.push(cells);
        }

        let rows = (0..self.num_rows())
            .map(|r| columns.iter().map(|c| c[r].clone()).collect())
            .collect();
        CanonicalTable::new(headers, rows)
    }
}

impl TabularInput for RecordBatch {
    fn into_table(self) -> Result<CanonicalTable> {
        (&self).into_table()
    }
}

fn stringify_rows<T: Display>(rows: Vec<Vec<T>>) -> Vec<Vec<String>> {
    rows.into_iter()
        .map(|r| r.iter().map(|v| v.to_string()).collect())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrow::array::{BinaryArray, Float64Array, Int32Array, Int64Array, StructArray};

    #[test]
    fn test_positional_names_for_unnamed_rows() {
        let t = vec![vec![1, 2, 3], vec![4, 5, 6]].into_table().unwrap();
        assert_eq!(t.headers(), &["0", "1", "2"]);
        assert_eq!(t.column("2").unwrap(), vec!["3", "6"]);
    }

    #[test]
    fn test_ragged_rows_rejected() {
        let err = vec![vec!["a", "b"], vec!["c"]].into_table().unwrap_err();
        assert!(matches!(err, SynthError::Schema(_)));
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let err = (vec!["x", "x"], vec![vec!["1", "2"]])
            .into_table()
            .unwrap_err();
        assert!(matches!(err, SynthError::Schema(_)));
    }

    #[test]
    fn test_record_batch_cells_become_text() {
        let schema = Schema::new(vec![
            Field::new("id", DataType::Int64, false),
            Field::new("score", DataType::Float64, true),
        ]);
        let batch = RecordBatch::try_new(
            Arc::new(schema),
            vec![
                Arc::new(Int64Array::from(vec![7, 8])),
                Arc::new(Float64Array::from(vec![Some(0.5), None])),
            ],
        )
        .unwrap();

        let t = batch.into_table().unwrap();
        assert_eq!(t.headers(), &["id", "score"]);
        assert_eq!(t.rows(), &[vec!["7", "0.5"], vec!["8", ""]]);
    }

    #[test]
    fn test_binary_cells_keep_their_bytes() {
        let schema = Schema::new(vec![
            Field::new("id", DataType::Int32, false),
            Field::new("l", DataType::Binary, true),
        ]);
        let batch = RecordBatch::try_new(
            Arc::new(schema),
            vec![
                Arc::new(Int32Array::from(vec![1, 2, 3])),
                Arc::new(BinaryArray::from(vec![
                    Some(&[0xff_u8, 0xfe][..]),
                    Some(&b"ok"[..]),
                    None,
                ])),
            ],
        )
        .unwrap();

        let t = batch.into_table().unwrap();
        assert_eq!(t.column("l").unwrap(), vec!["fffe", "6f6b", ""]);
    }

    #[test]
    fn test_struct_columns_rendered() {
        let inner = Field::new("a", DataType::Int32, false);
        let structs = StructArray::from(vec![(
            Arc::new(inner),
            Arc::new(Int32Array::from(vec![1, 2])) as ArrayRef,
        )]);
        let schema = Schema::new(vec![
            Field::new("id", DataType::Int32, false),
            Field::new("l", structs.data_type().clone(), false),
        ]);
        let batch = RecordBatch::try_new(
            Arc::new(schema),
            vec![Arc::new(Int32Array::from(vec![7, 8])), Arc::new(structs)],
        )
        .unwrap();

        let t = batch.into_table().unwrap();
        assert_eq!(t.column("l").unwrap(), vec!["{a: 1}", "{a: 2}"]);
    }

    #[test]
    fn test_zero_column_batch_keeps_row_count() {
        let t = CanonicalTable::new(Vec::new(), vec![Vec::new(), Vec::new()]).unwrap();
        let batch = t.to_record_batch().unwrap();
        assert_eq!(batch.num_columns(), 0);
        assert_eq!(batch.num_rows(), 2);
    }

    #[test]
    fn test_csv_text_layout() {
        let t = (vec!["x", "y"], vec![vec!["a", "1"], vec!["b, c", "2"]])
            .into_table()
            .unwrap();
        let mut buf = Vec::new();
        t.write_csv(&mut buf).unwrap();
        assert_eq!(String::from_utf8(buf.clone()).unwrap(), "x,y\na,1\n\"b, c\",2\n");
        assert_eq!(CanonicalTable::read_csv(buf.as_slice()).unwrap(), t);
    }

    #[test]
    fn test_record_batch_export() {
        let t = (vec!["x", "y"], vec![vec!["a", "1"]]).into_table().unwrap();
        let batch = t.to_record_batch().unwrap();
        assert_eq!(batch.num_columns(), 2);
        assert_eq!(batch.num_rows(), 1);
        assert_eq!(batch.into_table().unwrap(), t);
    }
}
