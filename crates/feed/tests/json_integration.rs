use std::io::Write;

use chrono::NaiveDate;
use halving_core::market::error::MarketError;
use halving_core::market::port::PriceHistoryProvider;
use halving_feed::json::JsonFileProvider;
use rust_decimal_macros::dec;

fn write_fixture(content: &str) -> anyhow::Result<tempfile::NamedTempFile> {
    let mut file = tempfile::NamedTempFile::new()?;
    file.write_all(content.as_bytes())?;
    file.flush()?;
    Ok(file)
}

/// # Summary
/// 正常文件：保持原始顺序，日期转换为日历日期。
#[tokio::test]
async fn test_fetch_history_preserves_order() -> anyhow::Result<()> {
    let file = write_fixture(
        r#"[
            {"date": "2025-01-01", "price": 60000},
            {"date": "2024-01-01T00:00:00", "price": 40000.5},
            {"date": "2024-06-01", "price": 70000}
        ]"#,
    )?;
    let provider = JsonFileProvider::new(file.path());

    let points = provider.fetch_history().await?;
    assert_eq!(points.len(), 3);
    assert_eq!(points[0].date, NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());
    assert_eq!(points[0].price, dec!(60000));
    assert_eq!(points[1].price, dec!(40000.5));
    assert_eq!(points[2].date, NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());

    assert!(provider.fingerprint().await?.is_some());
    assert_eq!(provider.source_key(), file.path().to_string_lossy());
    Ok(())
}

#[tokio::test]
async fn test_missing_file_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let provider = JsonFileProvider::new(dir.path().join("btc_data.json"));

    assert!(matches!(
        provider.fetch_history().await,
        Err(MarketError::NotFound(_))
    ));
    assert!(matches!(
        provider.fingerprint().await,
        Err(MarketError::NotFound(_))
    ));
}

#[tokio::test]
async fn test_malformed_content_is_parse_error() {
    for content in [
        "not json",
        r#"{"date": "2024-01-01", "price": 1}"#,
        r#"[{"date": "2024-01-01"}]"#,
        r#"[{"date": "yesterday", "price": 1}]"#,
        r#"[{"date": "2024-01-01", "price": "abc"}]"#,
    ] {
        let file = write_fixture(content).unwrap();
        let provider = JsonFileProvider::new(file.path());
        assert!(
            matches!(provider.fetch_history().await, Err(MarketError::Parse(_))),
            "content {}",
            content
        );
    }
}

#[tokio::test]
async fn test_negative_price_rejected() {
    let file = write_fixture(r#"[{"date": "2024-01-01", "price": -1}]"#).unwrap();
    let provider = JsonFileProvider::new(file.path());
    assert!(matches!(
        provider.fetch_history().await,
        Err(MarketError::InvalidPrice(_))
    ));
}

#[tokio::test]
async fn test_empty_array_is_returned_as_is() {
    let file = write_fixture("[]").unwrap();
    let provider = JsonFileProvider::new(file.path());
    // 空数组由加载器判定为不可用，数据源本身不报错
    assert!(provider.fetch_history().await.unwrap().is_empty());
}
