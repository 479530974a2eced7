use crate::error::{CoreError, CoreResult};
use crate::metadata::MetadataRecord;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

// try_wait poll interval while the external tool runs.
const POLL_INTERVAL: Duration = Duration::from_millis(20);

/// Narrow seam over metadata extraction so the scoring engine is testable
/// against in-memory records without an external process.
pub trait MetadataSource {
    fn extract(&self, image_path: &Path) -> CoreResult<MetadataRecord>;
}

/// Extracts metadata by invoking ExifTool (`exiftool -j <path>`) with a
/// fixed timeout. Nonzero exit, timeout, a missing file, or unparsable
/// output all surface as `CoreError::Extraction`.
pub struct ExifToolSource {
    exiftool_path: PathBuf,
    timeout: Duration,
    spool_dir: Option<PathBuf>,
}

impl ExifToolSource {
    pub fn new() -> Self {
        ExifToolSource {
            exiftool_path: PathBuf::from("exiftool"),
            timeout: DEFAULT_TIMEOUT,
            spool_dir: None,
        }
    }

    pub fn with_exiftool_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.exiftool_path = path.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Keeps the raw extracted JSON in a uniquely named file under `dir`.
    /// Unique per invocation so concurrent analyses never clobber each
    /// other's spool.
    pub fn with_spool_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.spool_dir = Some(dir.into());
        self
    }
}

impl Default for ExifToolSource {
    fn default() -> Self {
        Self::new()
    }
}

impl MetadataSource for ExifToolSource {
    fn extract(&self, image_path: &Path) -> CoreResult<MetadataRecord> {
        if !image_path.exists() {
            return Err(CoreError::Extraction(format!(
                "no such file: {}",
                image_path.display()
            )));
        }

        let mut cmd = Command::new(&self.exiftool_path);
        cmd.arg("-j").arg(image_path);

        let (status, stdout, stderr) = run_with_timeout(cmd, self.timeout)?;
        if !status.success() {
            let detail = String::from_utf8_lossy(&stderr).trim().to_string();
            log::error!("exiftool error for {}: {}", image_path.display(), detail);
            return Err(CoreError::Extraction(format!(
                "exiftool exited with {}: {}",
                status, detail
            )));
        }

        let value: serde_json::Value = serde_json::from_slice(&stdout)
            .map_err(|e| CoreError::Extraction(format!("unparsable exiftool output: {}", e)))?;
        let record = MetadataRecord::from_exiftool_json(&value)?;

        if let Some(dir) = &self.spool_dir {
            spool_record(dir, &record)?;
        }

        Ok(record)
    }
}

fn spool_record(dir: &Path, record: &MetadataRecord) -> CoreResult<()> {
    std::fs::create_dir_all(dir)?;
    let mut file = tempfile::Builder::new()
        .prefix("metadata-")
        .suffix(".json")
        .tempfile_in(dir)?;
    file.write_all(serde_json::to_string(record)?.as_bytes())?;
    let (_, path) = file.keep().map_err(|e| CoreError::Io(e.error))?;
    log::debug!("spooled metadata to {}", path.display());
    Ok(())
}

/// Runs the command, killing the child if it outlives the timeout. Stdout
/// and stderr are drained on reader threads so a chatty child cannot block
/// on a full pipe.
fn run_with_timeout(
    mut cmd: Command,
    timeout: Duration,
) -> CoreResult<(std::process::ExitStatus, Vec<u8>, Vec<u8>)> {
    cmd.stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    let mut child = cmd.spawn()?;

    let mut stdout_pipe = child.stdout.take().ok_or_else(|| {
        CoreError::Extraction("failed to capture external tool stdout".to_string())
    })?;
    let mut stderr_pipe = child.stderr.take().ok_or_else(|| {
        CoreError::Extraction("failed to capture external tool stderr".to_string())
    })?;

    let stdout_reader = std::thread::spawn(move || {
        let mut buf = Vec::new();
        let _ = stdout_pipe.read_to_end(&mut buf);
        buf
    });
    let stderr_reader = std::thread::spawn(move || {
        let mut buf = Vec::new();
        let _ = stderr_pipe.read_to_end(&mut buf);
        buf
    });

    let deadline = Instant::now() + timeout;
    let status = loop {
        if let Some(status) = child.try_wait()? {
            break status;
        }
        if Instant::now() >= deadline {
            let _ = child.kill();
            let _ = child.wait();
            return Err(CoreError::Extraction(format!(
                "external tool timed out after {}s",
                timeout.as_secs_f64()
            )));
        }
        std::thread::sleep(POLL_INTERVAL);
    };

    let stdout = stdout_reader.join().unwrap_or_default();
    let stderr = stderr_reader.join().unwrap_or_default();
    Ok((status, stdout, stderr))
}
