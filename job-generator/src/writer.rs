use std::fs::File;
use std::io;
use std::path::Path;

use csv::WriterBuilder;
use log::debug;

use crate::catalog::HEADERS;
use crate::error::GenError;
use crate::job::JobRecord;

/// Writes the header row followed by one row per job, in the given order.
///
/// # Errors
/// Errors when a row can not be serialized or the underlying writer fails
pub fn write_jobs<'a>(
    jobs: impl IntoIterator<Item = &'a JobRecord>,
    writer: impl io::Write,
) -> Result<(), GenError> {
    let mut writer = WriterBuilder::new().has_headers(false).from_writer(writer);
    writer.write_record(HEADERS)?;

    let mut rows = 0_usize;
    for job in jobs {
        writer.serialize(job)?;
        rows += 1;
    }
    writer.flush()?;
    debug!("Wrote {rows} job rows");

    Ok(())
}

/// Creates (or truncates) the file at `path` and writes the jobs to it.
///
/// # Errors
/// Errors when the file can not be created, e.g. its directory does not exist,
/// or when writing to it fails
pub fn write_jobs_to_path<'a>(
    jobs: impl IntoIterator<Item = &'a JobRecord>,
    path: impl AsRef<Path>,
) -> Result<(), GenError> {
    let file = File::create(path.as_ref())?;
    write_jobs(jobs, file)
}
