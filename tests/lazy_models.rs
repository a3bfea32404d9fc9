//! Lazy model layer tests.
//!
//! These assert the fetch-on-first-read contract: one upstream call per
//! transition, cached reads afterwards, and explicit refresh replacing the
//! value whole.

use edsm::{EdsmClient, Fetch, Stations, System, SystemQuery};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn stations_body() -> serde_json::Value {
    serde_json::json!({
        "id64": 10477373803u64,
        "name": "Sol",
        "stations": [
            {
                "id": 560,
                "marketId": 128016640u64,
                "type": "Orbis Starport",
                "name": "Abraham Lincoln",
                "haveMarket": true,
                "haveShipyard": true,
                "haveOutfitting": true
            },
            {
                "id": 561,
                "type": "Planetary Outpost",
                "name": "Armstrong Enterprise",
                "haveMarket": false,
                "haveShipyard": false,
                "haveOutfitting": false
            }
        ]
    })
}

fn market_body() -> serde_json::Value {
    serde_json::json!({
        "id": 27,
        "name": "Sol",
        "marketId": 128016640u64,
        "sId": 560,
        "sName": "Abraham Lincoln",
        "commodities": [
            {
                "id": "gold",
                "name": "Gold",
                "buyPrice": 9401,
                "stock": 52,
                "sellPrice": 9372,
                "demand": 0,
                "stockBracket": 1
            }
        ]
    })
}

#[tokio::test]
async fn test_stations_fetch_exactly_once() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api-system-v1/stations"))
        .and(query_param("systemName", "Sol"))
        .respond_with(ResponseTemplate::new(200).set_body_json(stations_body()))
        .expect(1) // repeated reads must not refetch
        .mount(&mock_server)
        .await;

    let client = EdsmClient::new(&mock_server.uri()).unwrap();
    let mut stations = Stations::new("Sol");

    assert!(!stations.is_fetched());
    assert!(stations.get().is_none());

    let first = stations.entries(&client).await.unwrap().len();
    assert_eq!(first, 2);
    assert!(stations.is_fetched());

    // Second and third reads are answered from the cell.
    assert_eq!(stations.entries(&client).await.unwrap().len(), 2);
    assert_eq!(stations.get().map(<[_]>::len), Some(2));
}

#[tokio::test]
async fn test_find_triggers_collection_fetch() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api-system-v1/stations"))
        .respond_with(ResponseTemplate::new(200).set_body_json(stations_body()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = EdsmClient::new(&mock_server.uri()).unwrap();
    let mut stations = Stations::new("Sol");

    // The lookup transitively fetches the unfetched collection.
    let station = stations.find(&client, "Abraham Lincoln").await.unwrap();
    assert_eq!(station.map(|s| s.id), Some(560));
    assert!(stations.is_fetched());
}

#[tokio::test]
async fn test_find_returns_none_for_no_match() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api-system-v1/stations"))
        .respond_with(ResponseTemplate::new(200).set_body_json(stations_body()))
        .mount(&mock_server)
        .await;

    let client = EdsmClient::new(&mock_server.uri()).unwrap();
    let mut stations = Stations::new("Sol");

    let missing = stations.find(&client, "Jameson Memorial").await.unwrap();
    assert!(missing.is_none());
}

#[tokio::test]
async fn test_find_returns_none_on_empty_collection() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api-system-v1/stations"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "name": "Empty System",
            "stations": []
        })))
        .mount(&mock_server)
        .await;

    let client = EdsmClient::new(&mock_server.uri()).unwrap();
    let mut stations = Stations::new("Empty System");

    let missing = stations.find(&client, "Anything").await.unwrap();
    assert!(missing.is_none());
}

#[tokio::test]
async fn test_refresh_replaces_cached_value() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api-system-v1/stations"))
        .respond_with(ResponseTemplate::new(200).set_body_json(stations_body()))
        .expect(2) // initial read + explicit refresh
        .mount(&mock_server)
        .await;

    let client = EdsmClient::new(&mock_server.uri()).unwrap();
    let mut stations = Stations::new("Sol");

    stations.entries(&client).await.unwrap();
    stations.refresh(&client).await.unwrap();

    assert!(stations.is_fetched());
    assert_eq!(stations.get().map(<[_]>::len), Some(2));
}

#[tokio::test]
async fn test_failed_fetch_leaves_collection_unfetched() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api-system-v1/stations"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
        .mount(&mock_server)
        .await;

    let client = EdsmClient::new(&mock_server.uri()).unwrap();
    let mut stations = Stations::new("Nonexistent");

    let result = stations.entries(&client).await;
    assert!(result.is_err());
    assert!(!stations.is_fetched());
}

#[tokio::test]
async fn test_station_market_fetches_once_when_available() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api-system-v1/stations"))
        .respond_with(ResponseTemplate::new(200).set_body_json(stations_body()))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api-system-v1/stations/market"))
        .and(query_param("marketId", "128016640"))
        .respond_with(ResponseTemplate::new(200).set_body_json(market_body()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = EdsmClient::new(&mock_server.uri()).unwrap();
    let mut stations = Stations::new("Sol");

    let station = stations
        .find_mut(&client, "Abraham Lincoln")
        .await
        .unwrap()
        .unwrap();
    assert!(!station.market_is_fetched());

    let market = station.market(&client).await.unwrap().unwrap();
    assert_eq!(market.commodities.len(), 1);
    assert!(station.market_is_fetched());

    // Second read hits the cell.
    let market = station.market(&client).await.unwrap().unwrap();
    assert_eq!(market.station_name.as_deref(), Some("Abraham Lincoln"));
}

#[tokio::test]
async fn test_station_without_market_yields_none_without_network() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api-system-v1/stations"))
        .respond_with(ResponseTemplate::new(200).set_body_json(stations_body()))
        .mount(&mock_server)
        .await;

    // No market mock mounted: a market request would fail the test.
    let client = EdsmClient::new(&mock_server.uri()).unwrap();
    let mut stations = Stations::new("Sol");

    let station = stations
        .find_mut(&client, "Armstrong Enterprise")
        .await
        .unwrap()
        .unwrap();

    let market = station.market(&client).await.unwrap();
    assert!(market.is_none());
    assert!(!station.market_is_fetched());
}

#[tokio::test]
async fn test_fully_fetched_system_serializes_with_flattened_market() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api-v1/system"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"name": "Sol"})),
        )
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api-system-v1/stations"))
        .respond_with(ResponseTemplate::new(200).set_body_json(stations_body()))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api-system-v1/stations/market"))
        .respond_with(ResponseTemplate::new(200).set_body_json(market_body()))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api-system-v1/traffic"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "name": "Sol",
            "traffic": {"total": 100, "week": 10, "day": 1},
            "breakdown": {"Anaconda": 4}
        })))
        .mount(&mock_server)
        .await;

    let client = EdsmClient::new(&mock_server.uri()).unwrap();
    let mut system = System::fetch(&client, &SystemQuery::named("Sol"))
        .await
        .unwrap();

    system.hydrate(&client).await.unwrap();
    if let Some(station) = system.stations.find_mut(&client, "Abraham Lincoln").await.unwrap() {
        station.market(&client).await.unwrap();
    }

    let value = serde_json::to_value(&system).unwrap();

    // Stations and traffic are embedded as plain data.
    assert_eq!(value["stations"][0]["name"], "Abraham Lincoln");
    assert_eq!(value["traffic"]["traffic"]["total"], 100);

    // The fetched market appears as its commodities, not an object handle.
    let market = &value["stations"][0]["market"];
    assert!(market.is_array());
    assert_eq!(market[0]["name"], "Gold");

    // The unfetched market of the second station serializes as null.
    assert!(value["stations"][1]["market"].is_null());
}
