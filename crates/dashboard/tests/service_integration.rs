use async_trait::async_trait;
use chrono::{NaiveDate, TimeZone, Utc};
use halving_core::common::ScaleMode;
use halving_core::common::time::FakeClockProvider;
use halving_core::config::DashboardConfig;
use halving_core::market::entity::{PricePoint, PriceSeries};
use halving_core::market::port::PriceLoader;
use halving_dashboard::service::DashboardService;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// # Summary
/// 返回固定序列的模拟加载器。
struct StaticLoader {
    series: PriceSeries,
    invalidated: AtomicBool,
}

impl StaticLoader {
    fn new(series: PriceSeries) -> Arc<Self> {
        Arc::new(Self {
            series,
            invalidated: AtomicBool::new(false),
        })
    }
}

#[async_trait]
impl PriceLoader for StaticLoader {
    async fn load(&self) -> PriceSeries {
        self.series.clone()
    }

    async fn invalidate(&self) {
        self.invalidated.store(true, Ordering::SeqCst);
    }
}

fn scenario_series() -> PriceSeries {
    PriceSeries::new(
        [
            ((2024, 1, 1), dec!(40000)),
            ((2024, 6, 1), dec!(70000)),
            ((2025, 1, 1), dec!(60000)),
        ]
        .into_iter()
        .map(|((y, m, d), price)| PricePoint {
            date: NaiveDate::from_ymd_opt(y, m, d).unwrap(),
            price,
        })
        .collect(),
    )
    .unwrap()
}

fn clock() -> Arc<FakeClockProvider> {
    Arc::new(FakeClockProvider::new(
        Utc.with_ymd_and_hms(2026, 10, 19, 13, 30, 15).unwrap(),
    ))
}

#[tokio::test]
async fn test_snapshot_scenario() {
    let service = DashboardService::new(
        StaticLoader::new(scenario_series()),
        clock(),
        DashboardConfig::default(),
    );

    let snapshot = service.snapshot(ScaleMode::Log).await;
    assert_eq!(snapshot.metrics.current_price, dec!(60000));
    assert_eq!(snapshot.metrics.all_time_high, dec!(70000));
    assert_eq!(snapshot.metrics.ath_ratio_pct.round_dp(1), dec!(-14.3));

    // FakeClockProvider 的本地时间即其 UTC 时间
    assert_eq!(snapshot.countdown.days, 529);
    assert_eq!(
        (
            snapshot.countdown.hours,
            snapshot.countdown.minutes,
            snapshot.countdown.seconds
        ),
        (10, 29, 45)
    );

    assert_eq!(snapshot.cards[0].value, "$60,000");
    assert_eq!(snapshot.cards[2].badge.as_deref(), Some("~529 days"));
    assert_eq!(snapshot.chart.scale_mode, ScaleMode::Log);
    assert_eq!(snapshot.chart.series.len(), 3);
    assert_eq!(snapshot.chart.markers.len(), 4);
}

#[tokio::test]
async fn test_chart_follows_requested_scale() {
    let service = DashboardService::new(
        StaticLoader::new(scenario_series()),
        clock(),
        DashboardConfig::default(),
    );
    assert_eq!(
        service.chart(ScaleMode::Linear).await.scale_mode,
        ScaleMode::Linear
    );
    assert_eq!(service.chart(ScaleMode::Log).await.scale_mode, ScaleMode::Log);
}

#[tokio::test]
async fn test_fallback_snapshot_is_well_defined() {
    let clock = clock();
    let service = DashboardService::new(
        StaticLoader::new(PriceSeries::fallback(NaiveDate::from_ymd_opt(2026, 10, 19).unwrap())),
        clock.clone(),
        DashboardConfig::default(),
    );

    let snapshot = service.snapshot(ScaleMode::Log).await;
    assert_eq!(snapshot.metrics.current_price, Decimal::ZERO);
    assert_eq!(snapshot.metrics.ath_ratio_pct, Decimal::ZERO);
    assert_eq!(snapshot.cards[1].badge.as_deref(), Some("0.0% ATH"));
    assert_eq!(snapshot.chart.y_values(), vec![Decimal::ZERO]);
}

#[tokio::test]
async fn test_countdown_after_target_is_elapsed() {
    let clock = clock();
    clock.set_time(Utc.with_ymd_and_hms(2028, 4, 2, 0, 0, 0).unwrap());
    let service = DashboardService::new(
        StaticLoader::new(scenario_series()),
        clock,
        DashboardConfig::default(),
    );

    let countdown = service.countdown();
    assert!(countdown.elapsed);
    assert_eq!(countdown.total_seconds(), 0);
}

#[tokio::test]
async fn test_reload_invalidates_loader() {
    let loader = StaticLoader::new(scenario_series());
    let service = DashboardService::new(loader.clone(), clock(), DashboardConfig::default());

    service.reload().await;
    assert!(loader.invalidated.load(Ordering::SeqCst));
    assert_eq!(service.projections().current_epoch, 5);
}
