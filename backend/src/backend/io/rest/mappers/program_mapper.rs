use crate::backend::domain::models::program::Program as DomainProgram;
use crate::backend::storage::fields::format_timestamp;
use shared::Program as SharedProgram;

pub struct ProgramMapper;

impl ProgramMapper {
    pub fn to_dto(domain: DomainProgram) -> SharedProgram {
        SharedProgram {
            id: domain.id,
            name: domain.name,
            created_at: format_timestamp(domain.created_at),
        }
    }
}
