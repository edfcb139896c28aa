// src/schema.rs

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::debug;

use crate::error::{Result, SynthError};
use crate::table::{CanonicalTable, TabularInput};

/// Minimum number of columns an input must carry
pub const MIN_COLUMNS: usize = 2;

/// Column names remembered from the first validated input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header(Vec<String>);

impl Header {
    pub fn names(&self) -> &[String] {
        &self.0
    }

    /// Order-insensitive comparison of column-name sets.
    pub fn matches(&self, names: &[String]) -> bool {
        let ours: HashSet<&str> = self.0.iter().map(String::as_str).collect();
        let theirs: HashSet<&str> = names.iter().map(String::as_str).collect();
        ours == theirs
    }
}

/// Coerce `input` into a [`CanonicalTable`] and check it against `header`.
///
/// The first successful call stores the input's column names in `header`;
/// later calls must present the same set of names, in any order.
pub fn validate<I: TabularInput>(header: &mut Option<Header>, input: I) -> Result<CanonicalTable> {
    let table = input.into_table()?;

    if table.num_columns() < MIN_COLUMNS {
        return Err(SynthError::schema(format!(
            "input needs at least {} columns, got {}",
            MIN_COLUMNS,
            table.num_columns()
        )));
    }

    match header {
        Some(h) => {
            if !h.matches(table.headers()) {
                return Err(SynthError::schema(format!(
                    "input contains different columns than seen in fit: expected {:?}, got {:?}",
                    h.names(),
                    table.headers()
                )));
            }
        }
        None => {
            debug!(columns = ?table.headers(), "header established");
            *header = Some(Header(table.headers().to_vec()));
        }
    }

    Ok(table)
}
