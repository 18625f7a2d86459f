use std::io;

use csv::{Reader, Writer};

use crate::corpus::table::{self, TEXT_COLUMN};
use crate::corpus::CorpusError;

use super::classify::{diagnosis_status, DiagnosisStatus};
use super::patterns::RuleLibrary;
use super::timeline::extract_timeline;

/// Columns appended by annotation, in this order.
pub const STATUS_COLUMN: &str = "diagnosis_status";
pub const TIMELINE_COLUMN: &str = "timeline";

/// Label distribution for one annotation pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AnnotateSummary {
    pub rows: usize,
    pub undiagnosed: usize,
    pub diagnosed: usize,
    pub congenital: usize,
    pub suspected: usize,
    pub unspecified: usize,
}

impl AnnotateSummary {
    fn record(&mut self, status: DiagnosisStatus) {
        self.rows += 1;
        match status {
            DiagnosisStatus::Undiagnosed => self.undiagnosed += 1,
            DiagnosisStatus::Diagnosed => self.diagnosed += 1,
            DiagnosisStatus::Congenital => self.congenital += 1,
            DiagnosisStatus::Suspected => self.suspected += 1,
            DiagnosisStatus::Unspecified => self.unspecified += 1,
        }
    }
}

/// Append [`STATUS_COLUMN`] and [`TIMELINE_COLUMN`] to every row, keeping
/// all existing columns in their original order. Rows without a text value
/// annotate as `unspecified` with an empty timeline; annotation never
/// rejects a row.
pub fn annotate_table<R, W>(
    library: &RuleLibrary,
    reader: &mut Reader<R>,
    writer: &mut Writer<W>,
) -> Result<AnnotateSummary, CorpusError>
where
    R: io::Read,
    W: io::Write,
{
    let headers = reader.headers()?.clone();
    if headers.is_empty() {
        return Ok(AnnotateSummary::default());
    }
    let mut annotated_headers = headers.clone();
    annotated_headers.push_field(STATUS_COLUMN);
    annotated_headers.push_field(TIMELINE_COLUMN);
    writer.write_record(&annotated_headers)?;

    let text_index = table::column_index(&headers, TEXT_COLUMN);
    let mut summary = AnnotateSummary::default();
    for result in reader.records() {
        let record = result?;
        let text = table::field(&record, text_index);
        let status = diagnosis_status(library, text);
        let timeline = extract_timeline(text);

        let mut annotated = record.clone();
        annotated.push_field(status.as_str());
        annotated.push_field(&timeline);
        writer.write_record(&annotated)?;
        summary.record(status);
    }
    writer.flush()?;
    Ok(summary)
}
