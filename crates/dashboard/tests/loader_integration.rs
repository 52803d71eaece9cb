use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeDelta, TimeZone, Utc};
use halving_cache::mem::MemCache;
use halving_core::common::time::{FakeClockProvider, TimeProvider};
use halving_core::market::entity::{PricePoint, PriceSeries};
use halving_core::market::error::MarketError;
use halving_core::market::port::{PriceHistoryProvider, PriceLoader};
use halving_dashboard::loader::CachedPriceLoader;
use halving_dashboard::metrics::derive_metrics;
use halving_feed::json::JsonFileProvider;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 19, 12, 0, 0).unwrap()
}

fn loader_for(provider: Arc<dyn PriceHistoryProvider>) -> CachedPriceLoader {
    CachedPriceLoader::new(
        provider,
        Arc::new(MemCache::new()),
        Arc::new(FakeClockProvider::new(fixed_now())),
    )
}

fn assert_fallback(series: &PriceSeries) {
    assert_eq!(series.len(), 1);
    assert_eq!(series.current().price, Decimal::ZERO);
    assert_eq!(
        series.current().date,
        NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
    );
}

/// # Summary
/// 可控的模拟数据源：记录读取次数，指纹可在测试中修改。
struct CountingProvider {
    fingerprint: Mutex<Option<DateTime<Utc>>>,
    fetches: AtomicUsize,
}

impl CountingProvider {
    fn new(fingerprint: Option<DateTime<Utc>>) -> Self {
        Self {
            fingerprint: Mutex::new(fingerprint),
            fetches: AtomicUsize::new(0),
        }
    }

    fn touch(&self, fingerprint: DateTime<Utc>) {
        *self.fingerprint.lock().unwrap() = Some(fingerprint);
    }

    fn fetches(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PriceHistoryProvider for CountingProvider {
    fn source_key(&self) -> &str {
        "mock://btc"
    }

    async fn fingerprint(&self) -> Result<Option<DateTime<Utc>>, MarketError> {
        Ok(*self.fingerprint.lock().unwrap())
    }

    async fn fetch_history(&self) -> Result<Vec<PricePoint>, MarketError> {
        let n = self.fetches.fetch_add(1, Ordering::SeqCst);
        Ok(vec![PricePoint {
            date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            price: Decimal::from(40_000 + n),
        }])
    }
}

#[tokio::test]
async fn test_load_real_file() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("btc_data.json");
    tokio::fs::write(
        &path,
        r#"[
            {"date": "2024-01-01", "price": 40000},
            {"date": "2024-06-01", "price": 70000},
            {"date": "2025-01-01", "price": 60000}
        ]"#,
    )
    .await?;

    let loader = loader_for(Arc::new(JsonFileProvider::new(&path)));
    let series = loader.load().await;
    assert_eq!(series.len(), 3);

    let metrics = derive_metrics(&series);
    assert_eq!(metrics.current_price, dec!(60000));
    assert_eq!(metrics.all_time_high, dec!(70000));
    assert_eq!(metrics.ath_ratio_pct.round_dp(1), dec!(-14.3));
    Ok(())
}

#[tokio::test]
async fn test_missing_file_falls_back() {
    let dir = tempfile::tempdir().unwrap();
    let loader = loader_for(Arc::new(JsonFileProvider::new(
        dir.path().join("btc_data.json"),
    )));

    let series = loader.load().await;
    assert_fallback(&series);

    let metrics = derive_metrics(&series);
    assert_eq!(metrics.ath_ratio_pct, Decimal::ZERO);
}

#[tokio::test]
async fn test_corrupt_or_empty_file_falls_back() {
    let dir = tempfile::tempdir().unwrap();
    for (idx, content) in ["{oops", "[]", r#"[{"date": "2024-01-01", "price": -5}]"#]
        .into_iter()
        .enumerate()
    {
        let path = dir.path().join(format!("btc_{}.json", idx));
        tokio::fs::write(&path, content).await.unwrap();
        let loader = loader_for(Arc::new(JsonFileProvider::new(&path)));
        assert_fallback(&loader.load().await);
    }
}

#[tokio::test]
async fn test_file_appearing_later_is_picked_up() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("btc_data.json");
    let loader = loader_for(Arc::new(JsonFileProvider::new(&path)));

    // 降级序列不会被缓存
    assert_fallback(&loader.load().await);

    tokio::fs::write(&path, r#"[{"date": "2024-04-20", "price": 64000}]"#)
        .await
        .unwrap();
    let series = loader.load().await;
    assert_eq!(series.current().price, dec!(64000));
}

#[tokio::test]
async fn test_memoized_until_fingerprint_changes() {
    let t0 = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
    let provider = Arc::new(CountingProvider::new(Some(t0)));
    let loader = loader_for(provider.clone());

    let first = loader.load().await;
    let second = loader.load().await;
    assert_eq!(provider.fetches(), 1);
    assert_eq!(first, second);

    provider.touch(t0 + TimeDelta::seconds(1));
    let third = loader.load().await;
    assert_eq!(provider.fetches(), 2);
    assert_eq!(third.current().price, dec!(40001));
}

#[tokio::test]
async fn test_manual_invalidation_forces_reload() {
    let t0 = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
    let provider = Arc::new(CountingProvider::new(Some(t0)));
    let loader = loader_for(provider.clone());

    loader.load().await;
    loader.invalidate().await;
    loader.load().await;
    assert_eq!(provider.fetches(), 2);
}

#[tokio::test]
async fn test_missing_fingerprint_never_hits_cache() {
    let provider = Arc::new(CountingProvider::new(None));
    let loader = loader_for(provider.clone());

    loader.load().await;
    loader.load().await;
    assert_eq!(provider.fetches(), 2);
}

/// # Summary
/// 本地时区固定为 UTC-5 的时钟。
struct WesternClock(DateTime<Utc>);

impl TimeProvider for WesternClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }

    fn now_local(&self) -> NaiveDateTime {
        (self.0 - TimeDelta::hours(5)).naive_utc()
    }
}

#[tokio::test]
async fn test_fallback_uses_local_calendar_date() {
    let dir = tempfile::tempdir().unwrap();
    // UTC 已是 10-19，本地仍是 10-18 晚上
    let clock = WesternClock(Utc.with_ymd_and_hms(2026, 10, 19, 2, 0, 0).unwrap());
    let loader = CachedPriceLoader::new(
        Arc::new(JsonFileProvider::new(dir.path().join("btc_data.json"))),
        Arc::new(MemCache::new()),
        Arc::new(clock),
    );

    let series = loader.load().await;
    assert_eq!(
        series.current().date,
        NaiveDate::from_ymd_opt(2026, 10, 18).unwrap()
    );
    assert_eq!(series.current().price, Decimal::ZERO);
}

#[tokio::test]
async fn test_cache_hit_returns_identical_high_precision_series() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("btc_data.json");
    let prices = [
        "40.44115788575051",
        "42058.41761949108",
        "4383938.082796699",
        "0.1",
        "63512.123456789012",
    ];
    let body = prices
        .iter()
        .enumerate()
        .map(|(idx, price)| format!(r#"{{"date": "2024-01-{:02}", "price": {}}}"#, idx + 1, price))
        .collect::<Vec<_>>()
        .join(",");
    tokio::fs::write(&path, format!("[{}]", body)).await?;

    let cache = Arc::new(MemCache::new());
    let loader = CachedPriceLoader::new(
        Arc::new(JsonFileProvider::new(&path)),
        cache.clone(),
        Arc::new(FakeClockProvider::new(fixed_now())),
    );

    let first = loader.load().await;
    assert_eq!(cache.len(), 1);
    let second = loader.load().await;

    assert_eq!(first.len(), prices.len());
    assert_eq!(first, second);
    for (a, b) in first.points().iter().zip(second.points()) {
        assert_eq!(a.price.to_string(), b.price.to_string());
    }
    Ok(())
}
