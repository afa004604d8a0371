//! Program management.
use chrono::Utc;
use std::sync::Arc;
use tracing::{info, warn};

use super::errors::{DomainError, DomainResult};
use super::models::program::Program;
use crate::backend::storage::{Connection, ProgramStorage};

#[derive(Clone)]
pub struct ProgramService<C: Connection> {
    program_repository: C::ProgramRepository,
}

impl<C: Connection> ProgramService<C> {
    pub fn new(connection: Arc<C>) -> Self {
        Self {
            program_repository: connection.create_program_repository(),
        }
    }

    /// Create a program. A blank name is ignored and returns None
    pub async fn create_program(&self, name: &str) -> DomainResult<Option<Program>> {
        let name = name.trim();
        if name.is_empty() {
            info!("Ignoring program with blank name");
            return Ok(None);
        }

        let program = Program::new(name, Utc::now());
        self.program_repository.store_program(&program).await?;
        info!("Created program {} ({})", program.name, program.id);
        Ok(Some(program))
    }

    pub async fn get_program(&self, program_id: &str) -> DomainResult<Option<Program>> {
        Ok(self.program_repository.get_program(program_id).await?)
    }

    pub async fn list_programs(&self) -> DomainResult<Vec<Program>> {
        Ok(self.program_repository.list_programs().await?)
    }

    /// Delete a program with its participants, their records and its journals
    pub async fn delete_program(&self, program_id: &str) -> DomainResult<()> {
        if !self.program_repository.delete_program(program_id).await? {
            warn!("Program not found: {}", program_id);
            return Err(DomainError::NotFound(format!("program {}", program_id)));
        }
        Ok(())
    }
}
