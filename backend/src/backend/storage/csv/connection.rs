use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs::{self, File, OpenOptions};
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::{Mutex, MutexGuard};
use tracing::{debug, info};

use super::{AttendanceRepository, JournalRepository, ParticipantRepository, ProgramRepository};
use crate::backend::storage::traits::Connection;

pub const PROGRAMS_FILE: &str = "programs.csv";
pub const PARTICIPANTS_FILE: &str = "participants.csv";
pub const ATTENDANCE_FILE: &str = "attendance.csv";
pub const JOURNALS_FILE: &str = "journals.csv";

/// CsvConnection owns the data directory and the lock that serializes
/// read-modify-write cycles on its files
#[derive(Clone)]
pub struct CsvConnection {
    base_directory: PathBuf,
    write_lock: Arc<Mutex<()>>,
}

impl CsvConnection {
    /// Create a connection rooted at `base_directory`, creating it if needed
    pub fn new<P: AsRef<Path>>(base_directory: P) -> Result<Self> {
        let base_path = base_directory.as_ref().to_path_buf();

        // Create the data directory on first use
        if !base_path.exists() {
            info!("Creating data directory {}", base_path.display());
            fs::create_dir_all(&base_path)
                .with_context(|| format!("Failed to create {}", base_path.display()))?;
        }

        Ok(Self {
            base_directory: base_path,
            write_lock: Arc::new(Mutex::new(())),
        })
    }

    pub fn base_directory(&self) -> &Path {
        &self.base_directory
    }

    pub fn file_path(&self, file_name: &str) -> PathBuf {
        self.base_directory.join(file_name)
    }

    /// Hold this guard for the duration of any read-modify-write cycle
    pub async fn lock(&self) -> MutexGuard<'_, ()> {
        self.write_lock.lock().await
    }

    /// Read every row of a file; a missing file has no rows
    pub fn read_rows<T: DeserializeOwned>(&self, file_name: &str) -> Result<Vec<T>> {
        // Files are created lazily by the first write
        let file_path = self.file_path(file_name);
        if !file_path.exists() {
            return Ok(Vec::new());
        }

        let file = File::open(&file_path)
            .with_context(|| format!("Failed to open {}", file_path.display()))?;
        let mut csv_reader = ::csv::Reader::from_reader(BufReader::new(file));

        let mut rows = Vec::new();
        for result in csv_reader.deserialize() {
            let row: T = result.with_context(|| format!("Malformed row in {}", file_path.display()))?;
            rows.push(row);
        }

        Ok(rows)
    }

    /// Replace the contents of a file with `rows`
    pub fn write_rows<T: Serialize>(&self, file_name: &str, rows: &[T]) -> Result<()> {
        let file_path = self.file_path(file_name);
        let temp_path = file_path.with_extension("tmp");

        // Write everything to a temp file first
        {
            let file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(&temp_path)
                .with_context(|| format!("Failed to open {}", temp_path.display()))?;

            let mut csv_writer = ::csv::Writer::from_writer(BufWriter::new(file));
            for row in rows {
                csv_writer.serialize(row)?;
            }
            csv_writer.flush()?;
        }

        // Swap it in over the old file
        fs::rename(&temp_path, &file_path)
            .with_context(|| format!("Failed to replace {}", file_path.display()))?;

        debug!("Wrote {} rows to {}", rows.len(), file_path.display());
        Ok(())
    }
}

impl Connection for CsvConnection {
    type ProgramRepository = ProgramRepository;
    type ParticipantRepository = ParticipantRepository;
    type AttendanceRepository = AttendanceRepository;
    type JournalRepository = JournalRepository;

    fn create_program_repository(&self) -> Self::ProgramRepository {
        ProgramRepository::new(self.clone())
    }

    fn create_participant_repository(&self) -> Self::ParticipantRepository {
        ParticipantRepository::new(self.clone())
    }

    fn create_attendance_repository(&self) -> Self::AttendanceRepository {
        AttendanceRepository::new(self.clone())
    }

    fn create_journal_repository(&self) -> Self::JournalRepository {
        JournalRepository::new(self.clone())
    }
}
