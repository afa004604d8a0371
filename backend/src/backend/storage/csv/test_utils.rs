//! Temporary CSV data directories for repository tests.
//!
//! The directory is removed when the environment is dropped, even if a test panics.

use anyhow::Result;
use tempfile::TempDir;

use super::connection::CsvConnection;
use super::{AttendanceRepository, JournalRepository, ParticipantRepository, ProgramRepository};

pub struct TestEnvironment {
    pub connection: CsvConnection,
    _temp_dir: TempDir,
}

impl TestEnvironment {
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let connection = CsvConnection::new(temp_dir.path())?;
        Ok(Self {
            connection,
            _temp_dir: temp_dir,
        })
    }
}

/// One repository of each kind over a fresh environment
pub struct TestHelper {
    pub env: TestEnvironment,
    pub program_repo: ProgramRepository,
    pub participant_repo: ParticipantRepository,
    pub attendance_repo: AttendanceRepository,
    pub journal_repo: JournalRepository,
}

impl TestHelper {
    pub fn new() -> Result<Self> {
        let env = TestEnvironment::new()?;
        Ok(Self {
            program_repo: ProgramRepository::new(env.connection.clone()),
            participant_repo: ParticipantRepository::new(env.connection.clone()),
            attendance_repo: AttendanceRepository::new(env.connection.clone()),
            journal_repo: JournalRepository::new(env.connection.clone()),
            env,
        })
    }
}
