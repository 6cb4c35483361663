// src/services/stats_service.rs

use chrono::{DateTime, Duration, NaiveTime, Utc};
use sqlx::SqlitePool;

use crate::{
    common::error::AppError,
    db::{StatsRepository, StatsWindows},
    models::stats::{GlobalStats, StoreStats},
};

#[derive(Clone)]
pub struct StatsService {
    repo: StatsRepository,
    pool: SqlitePool,
    plan_duration: Duration,
}

impl StatsService {
    pub fn new(repo: StatsRepository, pool: SqlitePool, plan_duration: Duration) -> Self {
        Self { repo, pool, plan_duration }
    }

    pub async fn get_global_stats(&self, now: DateTime<Utc>) -> Result<GlobalStats, AppError> {
        self.repo
            .get_global_stats(&self.pool, windows_ending_at(now), now - self.plan_duration)
            .await
    }

    pub async fn get_store_stats(&self, store_id: i64, now: DateTime<Utc>) -> Result<StoreStats, AppError> {
        self.repo
            .get_store_stats(&self.pool, store_id, windows_ending_at(now))
            .await
    }
}

// "Hoje" começa à meia-noite UTC; 7 e 30 dias são janelas deslizantes
pub fn windows_ending_at(now: DateTime<Utc>) -> StatsWindows {
    StatsWindows {
        today_start: now.date_naive().and_time(NaiveTime::MIN).and_utc(),
        last7_start: now - Duration::days(7),
        last30_start: now - Duration::days(30),
    }
}
