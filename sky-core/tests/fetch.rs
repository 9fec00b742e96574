//! Integration tests for WeatherRequestClient using wiremock.

use chrono::{TimeZone, Utc};
use sky_core::{Config, Coordinate, RequestError, WeatherRequestClient};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const SF_PATH: &str = "/forecast/KEY/37.7749,%20-122.4194";

fn sf() -> Coordinate {
    Coordinate::new(37.7749, -122.4194)
}

fn record_json(time: serde_json::Value) -> serde_json::Value {
    serde_json::json!({
        "latitude": 37.7749,
        "longitude": -122.4194,
        "currently": {
            "time": time,
            "summary": "Partly Cloudy",
            "icon": "partly-cloudy-day",
            "temperature": 57.3,
            "humidity": 0.72
        },
        "daily": {
            "data": [
                {
                    "time": 1613952000,
                    "icon": "rain",
                    "temperatureLow": 47.1,
                    "temperatureHigh": 58.9,
                    "humidity": 0.81
                },
                {
                    "time": 1614038400,
                    "icon": "clear-day",
                    "temperatureLow": 45.0,
                    "temperatureHigh": 61.2,
                    "humidity": 0.64
                }
            ]
        }
    })
}

fn client_for(server: &MockServer) -> WeatherRequestClient {
    WeatherRequestClient::parse(&format!("{}/forecast/KEY", server.uri())).unwrap()
}

#[tokio::test]
async fn test_fetch_success_decodes_record() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(SF_PATH))
        .and(header("content-type", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(record_json(1613952000.into())))
        .expect(1)
        .mount(&mock_server)
        .await;

    let record = client_for(&mock_server).fetch(sf()).await.unwrap();

    assert_eq!(record.currently.time, Utc.with_ymd_and_hms(2021, 2, 22, 0, 0, 0).unwrap());
    assert_eq!(record.currently.summary, "Partly Cloudy");
    assert_eq!(record.daily.data.len(), 2);
    assert_eq!(record.daily.data[1].time, Utc.with_ymd_and_hms(2021, 2, 23, 0, 0, 0).unwrap());
}

#[tokio::test]
async fn test_fetch_not_found_with_valid_body_is_failed_request() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(SF_PATH))
        .respond_with(ResponseTemplate::new(404).set_body_json(record_json(1613952000.into())))
        .expect(1)
        .mount(&mock_server)
        .await;

    let err = client_for(&mock_server).fetch(sf()).await.unwrap_err();
    assert_eq!(err, RequestError::FailedRequest);
}

#[tokio::test]
async fn test_fetch_server_error_is_failed_request() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal error"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let err = client_for(&mock_server).fetch(sf()).await.unwrap_err();
    assert_eq!(err, RequestError::FailedRequest);
}

#[tokio::test]
async fn test_fetch_empty_body_is_unknown() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(SF_PATH))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;

    let err = client_for(&mock_server).fetch(sf()).await.unwrap_err();
    assert_eq!(err, RequestError::Unknown);
}

#[tokio::test]
async fn test_fetch_missing_field_is_invalid_response() {
    let mock_server = MockServer::start().await;

    let mut body = record_json(1613952000.into());
    body["currently"].as_object_mut().unwrap().remove("summary");

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .expect(1)
        .mount(&mock_server)
        .await;

    let err = client_for(&mock_server).fetch(sf()).await.unwrap_err();
    assert_eq!(err, RequestError::InvalidResponse);
}

#[tokio::test]
async fn test_fetch_iso_timestamp_is_invalid_response() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(record_json("2021-02-22T00:00:00Z".into())),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let err = client_for(&mock_server).fetch(sf()).await.unwrap_err();
    assert_eq!(err, RequestError::InvalidResponse);
}

#[tokio::test]
async fn test_fetch_not_json_is_invalid_response() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let err = client_for(&mock_server).fetch(sf()).await.unwrap_err();
    assert_eq!(err, RequestError::InvalidResponse);
}

#[tokio::test]
async fn test_fetch_connection_refused_is_failed_request() {
    // Reserve a port, then free it so nothing is listening there.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let client = WeatherRequestClient::parse(&format!("http://127.0.0.1:{port}/forecast/KEY")).unwrap();

    for coordinate in [sf(), Coordinate::new(0.0, 0.0), Coordinate::new(-91.0, 400.0)] {
        let err = client.fetch(coordinate).await.unwrap_err();
        assert_eq!(err, RequestError::FailedRequest);
    }
}

#[tokio::test]
async fn test_concurrent_fetches_are_independent() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(SF_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(record_json(1613952000.into())))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/forecast/KEY/0.0,%200.0"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let (ok, missing) = tokio::join!(client.fetch(sf()), client.fetch(Coordinate::new(0.0, 0.0)));

    assert!(ok.is_ok());
    // 404 with no body: the missing body is reported first.
    assert_eq!(missing.unwrap_err(), RequestError::Unknown);
}

#[tokio::test]
async fn test_client_from_config_embeds_api_key() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/forecast/SECRET/1.5,%202.5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(record_json(1613952000.5.into())))
        .expect(1)
        .mount(&mock_server)
        .await;

    let cfg = Config {
        api_key: Some("SECRET".into()),
        base_url: format!("{}/forecast", mock_server.uri()),
        ..Config::default()
    };

    let record = WeatherRequestClient::from_config(&cfg)
        .unwrap()
        .fetch(Coordinate::new(1.5, 2.5))
        .await
        .unwrap();

    assert_eq!(record.currently.time.timestamp(), 1613952000);
}
