//! OpenWeatherProvider against a mock OpenWeatherMap server.

use rainbow_core::{
    Coords, LocationQuery, OpenWeatherProvider, Units, WeatherError, WeatherProvider, dashboard,
};
use serde_json::{Value, json};
use wiremock::matchers::{any, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

// 2026-10-19T12:00:00Z
const NOON: i64 = 1_792_411_200;
const HOUR: i64 = 3600;

fn provider(server: &MockServer) -> OpenWeatherProvider {
    OpenWeatherProvider::new(Some("TEST_KEY".into()))
        .with_base_urls(&format!("{}/data/2.5", server.uri()), &format!("{}/geo/1.0", server.uri()))
}

fn current_body() -> Value {
    json!({
        "coord": { "lon": 2.3488, "lat": 48.8534 },
        "weather": [{ "id": 800, "main": "Clear", "description": "clear sky", "icon": "01d" }],
        "main": { "temp": 21.6, "feels_like": 21.2, "humidity": 45, "pressure": 1021 },
        "visibility": 12000,
        "wind": { "speed": 4.1, "deg": 250 },
        "clouds": { "all": 0 },
        "sys": { "country": "FR", "sunrise": 0, "sunset": 4_102_444_800_i64 },
        "name": "Paris"
    })
}

fn forecast_item(dt: i64, temp: f64, pop: f64) -> Value {
    json!({
        "dt": dt,
        "main": { "temp": temp, "feels_like": temp - 1.0, "humidity": 60, "pressure": 1018 },
        "weather": [{ "main": "Rain", "description": "light rain", "icon": "10d" }],
        "wind": { "speed": 3.3, "deg": 200 },
        "pop": pop
    })
}

fn air_body() -> Value {
    json!({
        "list": [{
            "main": { "aqi": 3 },
            "components": {
                "co": 230.31, "no": 0.02, "no2": 14.4, "o3": 51.5,
                "so2": 1.2, "pm2_5": 12.3, "pm10": 18.7, "nh3": 0.9
            }
        }]
    })
}

#[tokio::test]
async fn fetch_current_by_city() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .and(query_param("q", "Paris"))
        .and(query_param("units", "metric"))
        .and(query_param("appid", "TEST_KEY"))
        .respond_with(ResponseTemplate::new(200).set_body_json(current_body()))
        .expect(1)
        .mount(&server)
        .await;

    let current = provider(&server)
        .fetch_current(&LocationQuery::City("Paris".into()), Units::Metric)
        .await
        .unwrap();

    assert_eq!(current.name, "Paris");
    assert_eq!(current.country, "FR");
    assert_eq!(current.temp, 22);
    assert_eq!(current.visibility, 12);
    // Sunrise at the epoch and sunset in 2100: always daytime.
    assert!(!current.is_night);
}

#[tokio::test]
async fn fetch_current_by_coordinates_uses_lat_lon() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .and(query_param("lat", "48.8534"))
        .and(query_param("lon", "2.3488"))
        .and(query_param("units", "imperial"))
        .respond_with(ResponseTemplate::new(200).set_body_json(current_body()))
        .expect(1)
        .mount(&server)
        .await;

    let coords = Coords::new(48.8534, 2.3488).unwrap();
    let query = LocationQuery::from_parts(Some("ignored"), Some(coords)).unwrap();

    let current = provider(&server).fetch_current(&query, Units::Imperial).await.unwrap();
    assert_eq!(current.coords, Some(coords));
}

#[tokio::test]
async fn missing_key_fails_before_any_request() {
    let server = MockServer::start().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let provider = OpenWeatherProvider::new(None)
        .with_base_urls(&format!("{}/data/2.5", server.uri()), &format!("{}/geo/1.0", server.uri()));
    let query = LocationQuery::City("Paris".into());

    let err = provider.fetch_current(&query, Units::Metric).await.unwrap_err();
    assert!(matches!(err, WeatherError::Configuration));

    assert!(matches!(
        provider.fetch_forecast(&query, Units::Metric).await,
        Err(WeatherError::Configuration)
    ));
    assert!(matches!(provider.fetch_air_quality(&query).await, Err(WeatherError::Configuration)));
    assert!(provider.search_cities("Paris").await.is_empty());
}

#[tokio::test]
async fn unknown_city_is_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({ "cod": "404", "message": "city not found" })),
        )
        .mount(&server)
        .await;

    let err = provider(&server)
        .fetch_current(&LocationQuery::City("Atlantis".into()), Units::Metric)
        .await
        .unwrap_err();

    assert!(matches!(err, WeatherError::NotFound(ref q) if q == "Atlantis"));
    assert_eq!(err.user_message(), "Location not found");
}

#[tokio::test]
async fn server_error_is_transport() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream exploded"))
        .mount(&server)
        .await;

    let err = provider(&server)
        .fetch_current(&LocationQuery::City("Paris".into()), Units::Metric)
        .await
        .unwrap_err();

    assert!(err.is_transport());
    let msg = err.to_string();
    assert!(msg.contains("500"), "status should be reported: {msg}");
    assert!(msg.contains("upstream exploded"));
}

#[tokio::test]
async fn malformed_body_is_invalid_response() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{\"name\": 42}"))
        .mount(&server)
        .await;

    let err = provider(&server)
        .fetch_current(&LocationQuery::City("Paris".into()), Units::Metric)
        .await
        .unwrap_err();

    assert!(matches!(err, WeatherError::InvalidResponse { .. }));
}

#[tokio::test]
async fn forecast_aggregates_two_days_without_padding() {
    let server = MockServer::start().await;

    let list = vec![
        forecast_item(NOON, 18.0, 0.85),
        forecast_item(NOON + 24 * HOUR, 12.0, 0.5),
    ];

    Mock::given(method("GET"))
        .and(path("/data/2.5/forecast"))
        .and(query_param("q", "Paris"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "list": list })))
        .mount(&server)
        .await;

    let forecast = provider(&server)
        .fetch_forecast(&LocationQuery::City("Paris".into()), Units::Metric)
        .await
        .unwrap();

    assert_eq!(forecast.len(), 2);
    assert_eq!(forecast[0].pop, 85);
    assert_eq!(forecast[1].pop, 50);
    assert!(forecast[0].date < forecast[1].date);
    assert_eq!(forecast[0].temp.max, 18);
}

#[tokio::test]
async fn hourly_is_capped_at_24_samples() {
    let server = MockServer::start().await;

    let list: Vec<Value> = (0..40).map(|i| forecast_item(NOON + i * 3 * HOUR, 10.0, 0.2)).collect();

    Mock::given(method("GET"))
        .and(path("/data/2.5/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "list": list })))
        .mount(&server)
        .await;

    let hourly = provider(&server)
        .fetch_hourly(&LocationQuery::City("Paris".into()), Units::Metric)
        .await
        .unwrap();

    assert_eq!(hourly.len(), 24);
    assert_eq!(hourly[0].time.timestamp(), NOON);
    assert_eq!(hourly[23].time.timestamp(), NOON + 23 * 3 * HOUR);
    assert_eq!(hourly[0].pop, 20);
}

#[tokio::test]
async fn air_quality_for_city_geocodes_first() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/geo/1.0/direct"))
        .and(query_param("q", "Paris"))
        .and(query_param("limit", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "name": "Paris", "country": "FR", "state": "Ile-de-France", "lat": 48.8566, "lon": 2.3522 }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/air_pollution"))
        .and(query_param("lat", "48.8566"))
        .and(query_param("lon", "2.3522"))
        .respond_with(ResponseTemplate::new(200).set_body_json(air_body()))
        .expect(1)
        .mount(&server)
        .await;

    let air = provider(&server)
        .fetch_air_quality(&LocationQuery::City("Paris".into()))
        .await
        .unwrap();

    assert_eq!(air.aqi, 3);
    assert_eq!(air.pm2_5, 12.3);
}

#[tokio::test]
async fn air_quality_for_coordinates_skips_geocoding() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/geo/1.0/direct"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/air_pollution"))
        .respond_with(ResponseTemplate::new(200).set_body_json(air_body()))
        .expect(1)
        .mount(&server)
        .await;

    let query = LocationQuery::Coords(Coords::new(10.0, 20.0).unwrap());
    let air = provider(&server).fetch_air_quality(&query).await.unwrap();
    assert_eq!(air.no2, 14.4);
}

#[tokio::test]
async fn air_quality_for_unknown_city_is_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/geo/1.0/direct"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/air_pollution"))
        .respond_with(ResponseTemplate::new(200).set_body_json(air_body()))
        .expect(0)
        .mount(&server)
        .await;

    let err = provider(&server)
        .fetch_air_quality(&LocationQuery::City("Atlantis".into()))
        .await
        .unwrap_err();

    assert!(matches!(err, WeatherError::NotFound(_)));
}

#[tokio::test]
async fn short_suggestion_query_makes_no_request() {
    let server = MockServer::start().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&server)
        .await;

    let provider = provider(&server);
    assert!(provider.search_cities("a").await.is_empty());
    assert!(provider.search_cities(" a ").await.is_empty());
    assert!(provider.search_cities("").await.is_empty());
}

#[tokio::test]
async fn suggestions_are_capped_at_five() {
    let server = MockServer::start().await;

    let places: Vec<Value> = (0..6)
        .map(|i| json!({ "name": format!("Paris {i}"), "country": "US", "lat": 30.0 + i as f64, "lon": -90.0 }))
        .collect();

    Mock::given(method("GET"))
        .and(path("/geo/1.0/direct"))
        .and(query_param("q", "Par"))
        .and(query_param("limit", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(Value::Array(places)))
        .mount(&server)
        .await;

    let suggestions = provider(&server).search_cities("Par").await;

    assert_eq!(suggestions.len(), 5);
    assert_eq!(suggestions[0].name, "Paris 0");
    assert_eq!(suggestions[0].state, None);
    assert_eq!(suggestions[4].coords.lat, 34.0);
}

#[tokio::test]
async fn suggestion_failures_yield_empty_list() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/geo/1.0/direct"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    assert!(provider(&server).search_cities("Par").await.is_empty());

    // Nothing listens on port 1.
    let unreachable = OpenWeatherProvider::new(Some("TEST_KEY".into()))
        .with_base_urls("http://127.0.0.1:1/data/2.5", "http://127.0.0.1:1/geo/1.0");
    assert!(unreachable.search_cities("Par").await.is_empty());
}

#[tokio::test]
async fn dashboard_fails_fast_on_unknown_city() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/data/2.5/forecast"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/geo/1.0/direct"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let provider = provider(&server);
    let err = dashboard::load(&provider, &LocationQuery::City("Atlantis".into()), Units::Metric)
        .await
        .unwrap_err();

    assert!(matches!(err, WeatherError::NotFound(_)));
}

#[tokio::test]
async fn dashboard_loads_everything() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .respond_with(ResponseTemplate::new(200).set_body_json(current_body()))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/data/2.5/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "list": [forecast_item(NOON, 20.0, 0.9), forecast_item(NOON + 24 * HOUR, 30.0, 0.1)]
        })))
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/data/2.5/air_pollution"))
        .respond_with(ResponseTemplate::new(200).set_body_json(air_body()))
        .mount(&server)
        .await;

    let provider = provider(&server);
    let query = LocationQuery::Coords(Coords::new(48.8534, 2.3488).unwrap());
    let dash = dashboard::load(&provider, &query, Units::Metric).await.unwrap();

    assert_eq!(dash.current.name, "Paris");
    assert_eq!(dash.forecast.len(), 2);
    assert_eq!(dash.hourly.len(), 2);
    assert_eq!(dash.air_quality.aqi, 3);

    let messages: Vec<String> = dash.insights().iter().map(ToString::to_string).collect();
    assert_eq!(
        messages,
        vec![
            "Tomorrow will be significantly warmer than today",
            "High chance of precipitation today - consider bringing an umbrella",
        ]
    );
}
