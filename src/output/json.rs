use crate::model::ThreadResult;
use crate::Result;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

/// File name used for a thread's artifact
pub fn thread_file_name(thread_id: &str) -> String {
    format!("thread_{}.json", thread_id)
}

/// Writes a thread as pretty-printed JSON into `output_dir`
///
/// The directory is created if needed. The file is named
/// `thread_<thread_id>.json` and overwritten if it already exists.
///
/// # Returns
///
/// The path of the written file
pub fn write_thread_json(result: &ThreadResult, output_dir: &Path) -> Result<PathBuf> {
    std::fs::create_dir_all(output_dir)?;
    let path = output_dir.join(thread_file_name(&result.thread_id));

    let mut writer = BufWriter::new(File::create(&path)?);
    serde_json::to_writer_pretty(&mut writer, result)?;
    writer.write_all(b"\n")?;
    writer.flush()?;

    tracing::debug!("Wrote {} posts to {}", result.posts.len(), path.display());
    Ok(path)
}

/// Reads a thread artifact written by [`write_thread_json`]
pub fn read_thread_json(path: &Path) -> Result<ThreadResult> {
    let reader = BufReader::new(File::open(path)?);
    Ok(serde_json::from_reader(reader)?)
}
