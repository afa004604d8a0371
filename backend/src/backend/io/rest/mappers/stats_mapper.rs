use crate::backend::domain::statistics_service::{MonthlyStats, ProgramDashboard, WeeklyStats};
use crate::backend::storage::fields::format_date;
use chrono::NaiveDate;
use shared::{
    DashboardResponse, DateWindowResponse, MonthlyStats as SharedMonthlyStats,
    WeeklyStats as SharedWeeklyStats,
};

pub struct StatsMapper;

impl StatsMapper {
    pub fn weekly_to_dto(domain: WeeklyStats) -> SharedWeeklyStats {
        SharedWeeklyStats {
            week_label: domain.week_label,
            start_date: format_date(domain.start_date),
            end_date: format_date(domain.end_date),
            actual_count: domain.counts.actual_count,
            total_count: domain.counts.total_count,
        }
    }

    pub fn monthly_to_dto(domain: MonthlyStats) -> SharedMonthlyStats {
        SharedMonthlyStats {
            month_label: domain.month_label,
            year: domain.year,
            month: domain.month,
            actual_count: domain.counts.actual_count,
            total_count: domain.counts.total_count,
        }
    }

    pub fn dashboard_to_dto(domain: ProgramDashboard) -> DashboardResponse {
        DashboardResponse {
            program_id: domain.program_id,
            weekly: Self::weekly_to_dto(domain.weekly),
            monthly: Self::monthly_to_dto(domain.monthly),
        }
    }

    pub fn window_to_dto(dates: Vec<NaiveDate>) -> DateWindowResponse {
        DateWindowResponse {
            dates: dates.into_iter().map(format_date).collect(),
        }
    }
}
