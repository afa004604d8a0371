use crate::backend::domain::models::journal::Journal as DomainJournal;
use crate::backend::storage::fields::{format_date, format_timestamp};
use shared::Journal as SharedJournal;

pub struct JournalMapper;

impl JournalMapper {
    pub fn to_dto(domain: DomainJournal) -> SharedJournal {
        SharedJournal {
            id: domain.id,
            program_id: domain.program_id,
            date: format_date(domain.date),
            content: domain.content,
            created_at: format_timestamp(domain.created_at),
        }
    }
}
