//! End-to-end pipeline runs: a real `LocationResolver` and a real
//! `NominatimClient` against a wiremock geocode endpoint, with scripted
//! capability/position providers standing in for the platform.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use dancefloor::geocode::NominatimClient;
use dancefloor::location::{
    Capability, CapabilityProvider, Coordinates, LocationResolver, LocationResult,
    PermissionError, PermissionState, PositionError, PositionOptions, PositionProvider,
};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const LONDON: Coordinates = Coordinates {
    latitude: 51.5,
    longitude: -0.12,
};

struct ScriptedCapabilities {
    check: PermissionState,
    request: PermissionState,
}

#[async_trait]
impl CapabilityProvider for ScriptedCapabilities {
    async fn check(&self, _capability: Capability) -> Result<PermissionState, PermissionError> {
        Ok(self.check)
    }

    async fn request(&self, _capability: Capability) -> Result<PermissionState, PermissionError> {
        Ok(self.request)
    }
}

struct FixedPosition(Coordinates);

#[async_trait]
impl PositionProvider for FixedPosition {
    async fn current_position(
        &self,
        _options: &PositionOptions,
    ) -> Result<Coordinates, PositionError> {
        Ok(self.0)
    }
}

fn resolver_against(server: &MockServer) -> LocationResolver {
    LocationResolver::new(
        Arc::new(ScriptedCapabilities {
            check: PermissionState::Denied,
            request: PermissionState::Granted,
        }),
        Arc::new(FixedPosition(LONDON)),
        Arc::new(NominatimClient::new(
            Some(server.uri()),
            Duration::from_secs(2),
        )),
        PositionOptions::default(),
    )
}

#[tokio::test]
async fn test_full_pipeline_publishes_success_with_address() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/reverse"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            r#"{
                "display_name": "London, Greater London, England, United Kingdom",
                "address": {"city": "London", "state": "England"}
            }"#,
            "application/json",
        ))
        .expect(1)
        .mount(&mock_server)
        .await;

    let resolver = resolver_against(&mock_server);
    resolver.activate().await;

    match resolver.current() {
        LocationResult::Success(coordinates, Some(address)) => {
            assert_eq!(coordinates, LONDON);
            assert_eq!(address.city.as_deref(), Some("London"));
            assert_eq!(address.state.as_deref(), Some("England"));
        }
        other => panic!("expected Success with address, got {other:?}"),
    }
}

#[tokio::test]
async fn test_geocode_outage_still_yields_coordinates() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/reverse"))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal error"))
        .mount(&mock_server)
        .await;

    let resolver = resolver_against(&mock_server);
    resolver.activate().await;

    assert_eq!(resolver.current(), LocationResult::Success(LONDON, None));
}

#[tokio::test]
async fn test_subscriber_observes_the_published_result() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/reverse"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            r#"{"display_name": "somewhere", "address": {"city": "London"}}"#,
            "application/json",
        ))
        .mount(&mock_server)
        .await;

    let resolver = Arc::new(resolver_against(&mock_server));
    let mut rx = resolver.subscribe();
    assert_eq!(*rx.borrow(), LocationResult::Pending);

    let runner = resolver.clone();
    let handle = tokio::spawn(async move { runner.activate().await });

    // Wait for changes until the pipeline settles on a terminal variant.
    loop {
        rx.changed().await.expect("resolver dropped");
        let current = rx.borrow_and_update().clone();
        if !current.is_in_progress() {
            assert!(current.is_success());
            break;
        }
    }
    handle.await.expect("pipeline task panicked");
}

#[tokio::test]
async fn test_refresh_after_success_hits_geocode_again() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/reverse"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            r#"{"display_name": "somewhere", "address": {"city": "London"}}"#,
            "application/json",
        ))
        .expect(2)
        .mount(&mock_server)
        .await;

    let resolver = resolver_against(&mock_server);
    resolver.activate().await;
    resolver.refresh().await;

    assert!(resolver.current().is_success());
}
