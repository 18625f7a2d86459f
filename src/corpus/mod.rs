pub mod clean;
pub mod narrative;
pub mod record;
pub mod table;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CorpusError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub use record::PostRecord;
pub use table::FilterSummary;
