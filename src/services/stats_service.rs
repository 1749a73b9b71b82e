// src/services/stats_service.rs

use chrono::{DateTime, Duration, Months, Utc};

use crate::{
    common::error::AppError,
    db::{ClientRepository, LicenceRepository, StatsRepository},
    models::stats::{GeneralStatistics, LastActivities, Period},
};

/// Janela [inicio, fim) ancorada na data pedida. Mês e ano somam de
/// calendário (31/01 + 1 mês = 28/02), não uma contagem fixa de dias.
pub fn window(period: Period, start: DateTime<Utc>) -> (DateTime<Utc>, DateTime<Utc>) {
    let end = match period {
        Period::Day => start + Duration::days(1),
        Period::Week => start + Duration::days(7),
        Period::Month => start.checked_add_months(Months::new(1)).unwrap_or(start),
        Period::Year => start.checked_add_months(Months::new(12)).unwrap_or(start),
    };
    (start, end)
}

#[derive(Clone)]
pub struct StatsService {
    stats_repo: StatsRepository,
    licence_repo: LicenceRepository,
    client_repo: ClientRepository,
}

impl StatsService {
    pub fn new(
        stats_repo: StatsRepository,
        licence_repo: LicenceRepository,
        client_repo: ClientRepository,
    ) -> Self {
        Self {
            stats_repo,
            licence_repo,
            client_repo,
        }
    }

    pub async fn general_statistics(
        &self,
        period: Period,
        date_start: DateTime<Utc>,
    ) -> Result<GeneralStatistics, AppError> {
        let (period_start, period_end) = window(period, date_start);

        let licences = self.stats_repo.licence_stats(period_start, period_end).await?;
        let clients = self.stats_repo.client_stats(period_start, period_end).await?;

        Ok(GeneralStatistics {
            period_start,
            period_end,
            licences,
            clients,
        })
    }

    pub async fn last_activities(&self, limit: i64) -> Result<LastActivities, AppError> {
        let licence_transitions = self.licence_repo.list_recent_history(limit).await?;
        let client_edits = self.client_repo.list_recent_editions(limit).await?;

        Ok(LastActivities {
            licence_transitions,
            client_edits,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
    }

    #[test]
    fn day_and_week_windows_are_fixed_spans() {
        let start = at(2026, 8, 30);
        assert_eq!(window(Period::Day, start), (start, at(2026, 8, 31)));
        assert_eq!(window(Period::Week, start), (start, at(2026, 9, 6)));
    }

    #[test]
    fn month_window_follows_the_calendar() {
        assert_eq!(window(Period::Month, at(2026, 8, 30)).1, at(2026, 9, 30));
        // Fim de mês curto satura no último dia válido.
        assert_eq!(window(Period::Month, at(2026, 1, 31)).1, at(2026, 2, 28));
    }

    #[test]
    fn year_window_handles_leap_day() {
        assert_eq!(window(Period::Year, at(2026, 3, 1)).1, at(2027, 3, 1));
        assert_eq!(window(Period::Year, at(2024, 2, 29)).1, at(2025, 2, 28));
    }
}
