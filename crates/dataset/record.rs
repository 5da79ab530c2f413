use crate::error::{DatasetError, Result};
use csv::StringRecord;
use log::{debug, info};
use std::collections::HashMap;
use std::io::Read;
use std::path::Path;
use std::sync::Arc;

#[derive(Debug)]
struct Header {
    dataset: String,
    index: HashMap<String, usize>,
}

/// One data row of a dataset, addressed by header field name.
#[derive(Debug, Clone)]
pub struct Record {
    header: Arc<Header>,
    row: usize,
    values: StringRecord,
}

impl Record {
    /// Raw text of `name`.
    pub fn field(&self, name: &str) -> Result<&str> {
        self.header
            .index
            .get(name)
            .and_then(|&i| self.values.get(i))
            .ok_or_else(|| DatasetError::MissingField {
                dataset: self.header.dataset.clone(),
                field: name.to_string(),
                row: self.row,
            })
    }

    /// `name` parsed as an integer, surrounding whitespace ignored.
    pub fn int(&self, name: &str) -> Result<i64> {
        let value = self.field(name)?;
        value.trim().parse::<i64>().map_err(|_| DatasetError::Parse {
            dataset: self.header.dataset.clone(),
            field: name.to_string(),
            row: self.row,
            value: value.to_string(),
        })
    }

    pub fn dataset(&self) -> &str {
        &self.header.dataset
    }

    /// 1-based position among the data rows (header excluded).
    pub fn row(&self) -> usize {
        self.row
    }
}

/// A CSV dataset fully read into memory, rows kept in file order.
#[derive(Debug)]
pub struct Dataset {
    name: String,
    records: Vec<Record>,
}

impl Dataset {
    /// Read a csv file.
    ///
    /// # Arguments
    /// * `name` - dataset name used in error messages
    /// * `path` - csv file with a header row
    pub fn open<P: AsRef<Path>>(name: &str, path: P) -> Result<Dataset> {
        let path = path.as_ref();
        let reader = csv::Reader::from_path(path).map_err(|source| DatasetError::Unavailable {
            dataset: name.to_string(),
            path: path.display().to_string(),
            source,
        })?;
        let dataset = Self::from_csv(name, reader)?;
        info!(
            "dataset loaded: {} ({} rows) from {:?}",
            name,
            dataset.len(),
            path
        );
        Ok(dataset)
    }

    pub fn from_reader<R: Read>(name: &str, reader: R) -> Result<Dataset> {
        Self::from_csv(name, csv::Reader::from_reader(reader))
    }

    fn from_csv<R: Read>(name: &str, mut reader: csv::Reader<R>) -> Result<Dataset> {
        let csv_error = |source: csv::Error| DatasetError::Csv {
            dataset: name.to_string(),
            source,
        };

        let mut index = HashMap::new();
        for (i, field) in reader.headers().map_err(csv_error)?.iter().enumerate() {
            index.entry(field.to_string()).or_insert(i);
        }
        debug!("dataset {} header: {} fields", name, index.len());
        let header = Arc::new(Header {
            dataset: name.to_string(),
            index,
        });

        let mut records = Vec::new();
        for (i, values) in reader.into_records().enumerate() {
            records.push(Record {
                header: Arc::clone(&header),
                row: i + 1,
                values: values.map_err(csv_error)?,
            });
        }

        Ok(Dataset {
            name: name.to_string(),
            records,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
