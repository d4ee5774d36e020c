use coin_forecast::coingecko::fallback::fallback_series;
use coin_forecast::coingecko::CoinGeckoClient;
use coin_forecast::config::MarketConfig;
use coin_forecast::model::coin::coin_by_symbol;
use coin_forecast::model::range::TimeRange;
use coin_forecast::model::series::to_series;
use coin_forecast::predictor::{linear_forecast, mock_forecast};

// Nothing listens on port 9 of the loopback interface, so every request fails fast.
fn unreachable_client() -> CoinGeckoClient {
    CoinGeckoClient::new(&MarketConfig {
        api_url: "http://127.0.0.1:9/api/v3".to_string(),
        request_timeout_ms: 500,
        ..MarketConfig::default()
    })
    .unwrap()
}

#[test]
fn historical_prices_fall_back_when_upstream_is_down() {
    tokio_test::block_on(async {
        let client = unreachable_client();
        let btc = coin_by_symbol("btc").unwrap();
        assert!(client
            .try_fetch_historical_prices(btc, TimeRange::Month)
            .await
            .is_err());

        let prices = client.fetch_historical_prices(btc, TimeRange::Month).await;
        let expected = fallback_series(TimeRange::Month, 0);
        assert_eq!(prices.len(), 30);
        for (got, want) in prices.iter().zip(&expected) {
            assert!((got.price - want.price).abs() < f64::EPSILON);
        }
        for pair in prices.windows(2) {
            assert_eq!(pair[1].timestamp - pair[0].timestamp, 86_400_000);
        }
    });
}

#[test]
fn latest_market_falls_back_when_upstream_is_down() {
    tokio_test::block_on(async {
        let client = unreachable_client();
        let eth = coin_by_symbol("eth").unwrap();
        let latest = client.fetch_latest_market(eth).await;
        let last_week = fallback_series(TimeRange::Week, 0);
        assert_eq!(latest.current_price, last_week.last().map(|pt| pt.price));
        assert_eq!(latest.price_change_24h, Some(0.0));
        assert!(latest.total_volume.is_none());
    });
}

#[test]
fn sparkline_rounds_prices() {
    tokio_test::block_on(async {
        let client = unreachable_client();
        let sol = coin_by_symbol("sol").unwrap();
        let sparkline = client.fetch_sparkline(sol, TimeRange::Day).await;
        assert_eq!(sparkline.len(), 24);
        for v in sparkline {
            assert!(((v * 100.0).round() - v * 100.0).abs() < 1e-6);
        }
    });
}

#[test]
fn fallback_history_feeds_both_models() {
    let series = to_series(&fallback_series(TimeRange::Quarter, 1_700_000_000_000));
    let mock = mock_forecast(&series, 7, Some("btc-7"));
    let linear = linear_forecast(&series, 7);
    assert_eq!(mock.len(), 7);
    assert_eq!(linear.len(), 7);
    let last_t = series.last().unwrap().t;
    assert_eq!(mock[0].timestamp, last_t + 86_400_000);
    assert_eq!(linear[6].timestamp, last_t + 7 * 86_400_000);
    for pt in mock.iter().chain(&linear) {
        assert!(pt.lower <= pt.point && pt.point <= pt.upper);
    }
}
