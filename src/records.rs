use crate::error::DataSourceError;
use csv::{Reader, StringRecord, StringRecordsIntoIter};
use std::{fs::File, io, path::Path};

/// One row of the input, with its fields kept in header order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    position: usize,
    fields: Vec<(String, String)>,
}

impl Record {
    pub fn new(position: usize, fields: Vec<(String, String)>) -> Self {
        Record { position, fields }
    }

    /// 1-based position of this record in its source, header excluded.
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value.as_str())
    }

    /// Like `get`, but a missing field is a data source error.
    pub fn field(&self, name: &str) -> Result<&str, DataSourceError> {
        self.get(name).ok_or_else(|| DataSourceError::MissingField {
            field: name.to_string(),
            position: self.position,
        })
    }
}

/// Which columns hold the label and the free text of a document.
///
/// Defaults to `label` and `content`. Corpora that name the label column
/// `tag` need `label_field: "tag"` (`--label-field tag` on the command line).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordSchema {
    pub label_field: String,
    pub content_field: String,
}

impl Default for RecordSchema {
    fn default() -> Self {
        RecordSchema {
            label_field: "label".to_string(),
            content_field: "content".to_string(),
        }
    }
}

impl RecordSchema {
    pub fn label<'a>(&self, record: &'a Record) -> Result<&'a str, DataSourceError> {
        record.field(&self.label_field)
    }

    pub fn content<'a>(&self, record: &'a Record) -> Result<&'a str, DataSourceError> {
        record.field(&self.content_field)
    }
}

/// Streams `Record`s out of a CSV document with a header row.
pub struct CsvRecordSource<R> {
    headers: Vec<String>,
    rows: StringRecordsIntoIter<R>,
    position: usize,
}

impl CsvRecordSource<File> {
    /// Opens `path` and reads its header row. Failing at either step is an
    /// `Open` error naming the path.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, DataSourceError> {
        let path = path.as_ref();
        Reader::from_path(path)
            .and_then(Self::with_reader)
            .map_err(|source| DataSourceError::Open {
                path: path.to_path_buf(),
                source,
            })
    }
}

impl<R: io::Read> CsvRecordSource<R> {
    #[cfg(test)]
    pub fn from_reader(rdr: R) -> Result<Self, DataSourceError> {
        Self::with_reader(Reader::from_reader(rdr))
            .map_err(|source| DataSourceError::Read {
                position: 0,
                source,
            })
    }

    fn with_reader(mut reader: Reader<R>) -> Result<Self, csv::Error> {
        let headers = reader.headers()?.iter().map(str::to_string).collect();
        Ok(CsvRecordSource {
            headers,
            rows: reader.into_records(),
            position: 0,
        })
    }

    fn to_record(&self, row: &StringRecord) -> Record {
        let fields = self
            .headers
            .iter()
            .cloned()
            .zip(row.iter().map(str::to_string))
            .collect();
        Record::new(self.position, fields)
    }
}

impl<R: io::Read> Iterator for CsvRecordSource<R> {
    type Item = Result<Record, DataSourceError>;

    fn next(&mut self) -> Option<Self::Item> {
        let row = self.rows.next()?;
        self.position += 1;
        match row {
            Ok(row) => Some(Ok(self.to_record(&row))),
            Err(source) => Some(Err(DataSourceError::Read {
                position: self.position,
                source,
            })),
        }
    }
}
