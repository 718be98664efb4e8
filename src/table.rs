use std::{io::Read, sync::LazyLock};

use regex::Regex;
use tracing::{debug, warn};

use crate::{Config, Error, Sample};

#[derive(Debug, Clone, PartialEq)]
pub enum ColumnData {
    /// Missing cells are NaN.
    Numeric(Vec<f64>),
    Text(Vec<String>),
}

impl ColumnData {
    pub fn len(&self) -> usize {
        match self {
            ColumnData::Numeric(v) => v.len(),
            ColumnData::Text(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn as_numeric(&self) -> Option<&[f64]> {
        match self {
            ColumnData::Numeric(v) => Some(v.as_slice()),
            ColumnData::Text(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    name: String,
    data: ColumnData,
}

impl Column {
    pub fn new(name: impl ToString, data: ColumnData) -> Self {
        Self {
            name: name.to_string(),
            data,
        }
    }

    /// Classify raw cells: numeric when every non-missing cell parses as a float.
    fn from_cells(name: String, cells: Vec<String>, config: &Config) -> Self {
        let parsed = cells
            .iter()
            .map(|c| {
                if config.is_missing(c) {
                    Some(f64::NAN)
                } else {
                    parse_number(c)
                }
            })
            .collect::<Option<Vec<f64>>>();
        let data = match parsed {
            Some(values) => ColumnData::Numeric(values),
            None => {
                debug!("Column {} is not numeric", name);
                ColumnData::Text(cells)
            },
        };
        Self { name, data }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn data(&self) -> &ColumnData {
        &self.data
    }
}

type Rows = (Vec<String>, Vec<Vec<String>>);

fn split_delimited(text: &str, sep: u8) -> Result<Rows, Error> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(sep)
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());
    let header = reader
        .headers()?
        .iter()
        .map(|h| h.to_string())
        .collect::<Vec<_>>();
    let mut rows = Vec::new();
    for record in reader.records() {
        let record = match record {
            Ok(record) => record,
            Err(e) => {
                let line = match e.kind() {
                    csv::ErrorKind::UnequalLengths { pos: Some(pos), .. } => Some(pos.line()),
                    _ => None,
                };
                return Err(match line {
                    Some(line) => Error::IncompleteFile(line as usize),
                    None => Error::Csv(e),
                });
            },
        };
        rows.push(record.iter().map(|f| f.to_string()).collect());
    }
    Ok((header, rows))
}

fn split_whitespace(text: &str) -> Result<Rows, Error> {
    let split = |line: &str| {
        line.split_whitespace()
            .map(|f| f.to_string())
            .collect::<Vec<_>>()
    };
    let mut lines = text
        .lines()
        .enumerate()
        .filter(|(_, l)| !l.trim().is_empty());
    let (_, header) = lines.next().ok_or(Error::EmptyFile)?;
    let header = split(header);
    let mut rows = Vec::new();
    for (i, line) in lines {
        let fields = split(line);
        if fields.len() != header.len() {
            return Err(Error::IncompleteFile(i + 1));
        }
        rows.push(fields);
    }
    Ok((header, rows))
}

static THOUSANDS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?\d{1,3}(,\d{3})+(\.\d+)?$").expect("thousands pattern is valid")
});

/// Parse a cell as a float, accepting comma thousands separators such as `1,200.5`.
fn parse_number(cell: &str) -> Option<f64> {
    let cell = cell.trim();
    cell.parse().ok().or_else(|| {
        THOUSANDS
            .is_match(cell)
            .then(|| cell.replace(',', "").parse().ok())
            .flatten()
    })
}

/// Named columns read from a delimited file.
#[derive(Debug, Clone)]
pub struct Table {
    columns: Vec<Column>,
    nrows: usize,
    config: Config,
}

impl Table {
    pub fn new(columns: Vec<Column>, config: Config) -> Result<Self, Error> {
        let nrows = columns.first().map(|c| c.data.len()).unwrap_or(0);
        if columns.iter().any(|c| c.data.len() != nrows) {
            return Err(Error::UnequalColumnLengths);
        }
        Ok(Self {
            columns,
            nrows,
            config,
        })
    }

    /// Parse delimited text with a header row. Comma and tab separated input follows CSV
    /// quoting rules; a `b' '` separator splits on any run of whitespace.
    pub fn from_reader(mut reader: impl Read, sep: u8, config: Config) -> Result<Self, Error> {
        let mut text = String::new();
        reader.read_to_string(&mut text)?;
        let text = text.trim_start_matches('\u{feff}');
        if text.trim().is_empty() {
            return Err(Error::EmptyFile);
        }

        let (header, rows) = if sep == b' ' {
            split_whitespace(text)?
        } else {
            split_delimited(text, sep)?
        };

        let mut cells = vec![Vec::with_capacity(rows.len()); header.len()];
        for row in rows {
            for (col, field) in cells.iter_mut().zip(row) {
                col.push(field);
            }
        }

        let columns = header
            .into_iter()
            .zip(cells)
            .map(|(name, cells)| Column::from_cells(name, cells, &config))
            .collect::<Vec<_>>();
        let table = Self::new(columns, config)?;
        debug!(
            nrows = table.nrows(),
            ncols = table.ncols(),
            "Read table"
        );
        Ok(table)
    }

    #[inline]
    pub fn nrows(&self) -> usize {
        self.nrows
    }

    #[inline]
    pub fn ncols(&self) -> usize {
        self.columns.len()
    }

    pub fn colnames(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name()).collect()
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    #[inline]
    fn is_usable(&self, column: &Column) -> bool {
        column.data.as_numeric().is_some() && !self.config.is_excluded(&column.name)
    }

    /// Numeric columns whose names are not excluded, in table order.
    pub fn numeric_columns(&self) -> Result<Vec<&str>, Error> {
        let names = self
            .columns
            .iter()
            .filter(|c| self.is_usable(c))
            .map(|c| c.name())
            .collect::<Vec<_>>();
        if names.is_empty() {
            warn!("No numeric columns");
            return Err(Error::NoNumericColumns);
        }
        Ok(names)
    }

    /// Numeric columns that can explain `target`.
    pub fn explanatory_columns(&self, target: &str) -> Result<Vec<&str>, Error> {
        let names = self
            .numeric_columns()?
            .into_iter()
            .filter(|c| *c != target)
            .collect::<Vec<_>>();
        if names.is_empty() {
            warn!("No explanatory columns for {}", target);
            return Err(Error::NoExplanatoryColumns);
        }
        Ok(names)
    }

    fn numeric(&self, name: &str) -> Result<&[f64], Error> {
        let column = self
            .column(name)
            .ok_or_else(|| Error::ColumnNameNotFound(name.to_string()))?;
        if !self.is_usable(column) {
            return Err(Error::NonNumericColumn(name.to_string()));
        }
        column
            .data
            .as_numeric()
            .ok_or_else(|| Error::NonNumericColumn(name.to_string()))
    }

    /// Pair two columns, dropping rows where either value is missing.
    pub fn sample(&self, x: &str, y: &str) -> Result<Sample, Error> {
        let xs = self.numeric(x)?;
        let ys = self.numeric(y)?;
        Sample::from_columns_dropping_missing(xs, ys)
    }
}
