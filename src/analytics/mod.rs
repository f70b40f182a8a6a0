//! Analytics aggregator
//!
//! Read-only derived view fetched from the remote authority and cached
//! with a 5-minute TTL. A background task silently refetches every 10
//! minutes while data is present; a manual refresh clears the cache
//! timestamp so the next read fetches immediately. This subsystem never
//! mutates accounts and no account operation depends on it.

use crate::types::RemoteError;
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use log::{debug, warn};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// How long a fetched snapshot stays fresh
const CACHE_TTL_MINUTES: i64 = 5;

/// Background refetch period
pub const AUTO_REFRESH_MINUTES: u64 = 10;

/// One point in a balance trend series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    pub month: String,
    pub total: Decimal,
}

/// Share of total balance held in one currency
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrencySlice {
    pub currency: String,
    pub total: Decimal,
}

/// Aggregate payload as served by the remote authority
///
/// The nested fields are optional because the authority serves an empty
/// shell before any account history exists, and a demo payload for
/// unauthenticated sessions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsSnapshot {
    /// Month-by-month total balance series
    pub trend: Option<Vec<TrendPoint>>,

    /// Month-over-month variation in percent
    pub month_over_month: Option<Decimal>,

    /// Balance split by currency
    pub by_currency: Option<Vec<CurrencySlice>>,

    /// Marks server-generated demo data
    #[serde(default)]
    pub demo: bool,
}

impl AnalyticsSnapshot {
    /// Whether the payload carries a usable trend series
    pub fn has_data(&self) -> bool {
        self.trend.as_ref().is_some_and(|t| !t.is_empty())
    }

    /// Whether the payload is an empty shell
    pub fn is_empty(&self) -> bool {
        !self.has_data()
    }

    /// Whether the payload is server-generated demo data
    pub fn is_demo(&self) -> bool {
        self.demo
    }
}

/// Read-only source of aggregate analytics
#[async_trait]
pub trait AnalyticsSource: Send + Sync {
    async fn fetch(&self) -> Result<AnalyticsSnapshot, RemoteError>;
}

/// Caching front for an [`AnalyticsSource`]
pub struct AnalyticsAggregator<S> {
    source: S,
    cached: Option<AnalyticsSnapshot>,
    fetched_at: Option<DateTime<Utc>>,
}

impl<S: AnalyticsSource> AnalyticsAggregator<S> {
    pub fn new(source: S) -> Self {
        AnalyticsAggregator {
            source,
            cached: None,
            fetched_at: None,
        }
    }

    /// Whether the cached snapshot is still fresh
    fn is_fresh(&self) -> bool {
        self.fetched_at
            .is_some_and(|at| Utc::now() - at < Duration::minutes(CACHE_TTL_MINUTES))
    }

    /// Current snapshot, fetching when the cache is empty or stale
    pub async fn get(&mut self) -> Result<&AnalyticsSnapshot, RemoteError> {
        if self.cached.is_none() || !self.is_fresh() {
            let snapshot = self.source.fetch().await?;
            debug!("analytics refetched (has_data={})", snapshot.has_data());
            self.cached = Some(snapshot);
            self.fetched_at = Some(Utc::now());
        }
        // The branch above guarantees a cached value.
        Ok(self.cached.as_ref().unwrap())
    }

    /// Drop the cache timestamp so the next `get` fetches immediately
    pub fn refresh(&mut self) {
        self.fetched_at = None;
    }

    /// Background tick: silently refetch while data is present
    ///
    /// Fetch failures are logged and swallowed; the stale snapshot stays
    /// in place until the next tick or a manual refresh.
    pub async fn auto_refresh_tick(&mut self) {
        let has_data = self.cached.as_ref().is_some_and(|s| s.has_data());
        if !has_data {
            return;
        }
        match self.source.fetch().await {
            Ok(snapshot) => {
                self.cached = Some(snapshot);
                self.fetched_at = Some(Utc::now());
            }
            Err(e) => warn!("analytics auto-refresh failed: {}", e),
        }
    }
}

/// Drive the periodic background refresh on a shared aggregator handle
///
/// Ticks every [`AUTO_REFRESH_MINUTES`]; each tick refetches only while
/// the cached payload carries data. Runs until the task is dropped —
/// cancellation is the caller's concern, as everywhere in this crate.
pub async fn run_auto_refresh<S: AnalyticsSource>(
    aggregator: std::sync::Arc<tokio::sync::Mutex<AnalyticsAggregator<S>>>,
) {
    let period = std::time::Duration::from_secs(AUTO_REFRESH_MINUTES * 60);
    let mut interval = tokio::time::interval(period);
    // The first tick of a tokio interval fires immediately; skip it so
    // the initial fetch stays with the foreground `get`.
    interval.tick().await;
    loop {
        interval.tick().await;
        aggregator.lock().await.auto_refresh_tick().await;
    }
}
