use std::fs::File;
use std::io;
use std::path::Path;

use csv::{Reader, ReaderBuilder, StringRecord, Writer, WriterBuilder};

use super::record::PostRecord;
use super::CorpusError;

/// Column names the pipeline stages look up. Unknown columns pass through
/// untouched, in their original order.
pub const TITLE_COLUMN: &str = "title";
pub const TEXT_COLUMN: &str = "text";

/// Row counts for one filtering pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterSummary {
    pub rows_in: usize,
    pub rows_out: usize,
}

/// Position of a named column, if the table has one.
pub fn column_index(headers: &StringRecord, name: &str) -> Option<usize> {
    headers.iter().position(|header| header == name)
}

/// Field value for a row, coerced to "" when the column is absent or the
/// row is short.
pub fn field<'r>(record: &'r StringRecord, index: Option<usize>) -> &'r str {
    index.and_then(|i| record.get(i)).unwrap_or("")
}

/// Readers tolerate ragged rows; missing fields coerce to "" instead of
/// failing the whole table.
pub fn open_reader(path: &Path) -> Result<Reader<File>, CorpusError> {
    Ok(ReaderBuilder::new().flexible(true).from_path(path)?)
}

pub fn create_writer(path: &Path) -> Result<Writer<File>, CorpusError> {
    Ok(WriterBuilder::new().flexible(true).from_path(path)?)
}

/// Copy rows whose `column` value satisfies `keep`, preserving headers and
/// every other column. Rows missing the column are judged on "".
pub fn filter_rows<R, W, P>(
    reader: &mut Reader<R>,
    writer: &mut Writer<W>,
    column: &str,
    mut keep: P,
) -> Result<FilterSummary, CorpusError>
where
    R: io::Read,
    W: io::Write,
    P: FnMut(&str) -> bool,
{
    let headers = reader.headers()?.clone();
    if headers.is_empty() {
        return Ok(FilterSummary { rows_in: 0, rows_out: 0 });
    }
    writer.write_record(&headers)?;

    let index = column_index(&headers, column);
    let mut summary = FilterSummary { rows_in: 0, rows_out: 0 };
    for result in reader.records() {
        let record = result?;
        summary.rows_in += 1;
        if keep(field(&record, index)) {
            writer.write_record(&record)?;
            summary.rows_out += 1;
        }
    }
    writer.flush()?;
    Ok(summary)
}

/// Persist a crawl as a three-column table (`title,url,text`).
pub fn write_posts(path: &Path, posts: &[PostRecord]) -> Result<(), CorpusError> {
    let mut writer = Writer::from_path(path)?;
    for post in posts {
        writer.serialize(post)?;
    }
    writer.flush()?;
    Ok(())
}
