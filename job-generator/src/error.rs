use std::io;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenError {
    #[error("CSV Error")]
    CsvError(#[from] csv::Error),
    #[error("I/O Error")]
    IoError(#[from] io::Error),
    #[error("Amount is out of range")]
    InvalidAmount,
    #[error("Subtracted amount is larger than the amount it is taken from")]
    InsufficientAmount,
    #[error("Ratio must be a finite number between 0 and 1")]
    InvalidRatio,
    #[error("Shoot window does not fit in the supported date range")]
    InvalidDateRange,
    #[error("Catalog table `{0}` is empty")]
    EmptyTable(&'static str),
}
