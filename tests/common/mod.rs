#![allow(dead_code)]

use async_trait::async_trait;
use axum::extract::ConnectInfo;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower::Layer;
use uuid::Uuid;

use link_tracker::application::services::GeolocationService;
use link_tracker::domain::entities::{LocationData, TrackingLink};
use link_tracker::domain::repositories::{ClickRepository, LinkRepository};
use link_tracker::infrastructure::geolocation::{GeoLookup, GeoLookupError};
use link_tracker::infrastructure::persistence::InMemoryStore;
use link_tracker::state::AppState;

/// Address the stub resolves to Testland; every other address fails.
pub const TESTLAND_IP: &str = "1.1.1.1";

pub const PEER_IP: &str = "127.0.0.1";

/// Deterministic lookup standing in for the remote provider.
pub struct StubGeoLookup;

#[async_trait]
impl GeoLookup for StubGeoLookup {
    async fn lookup(&self, ip: &str) -> Result<LocationData, GeoLookupError> {
        if ip == TESTLAND_IP {
            Ok(LocationData {
                country: "Testland".to_string(),
                country_code: "TL".to_string(),
                region: "TC".to_string(),
                region_name: "Test County".to_string(),
                city: "Testville".to_string(),
                latitude: 12.5,
                longitude: -45.25,
            })
        } else {
            Err(GeoLookupError::Failed("reserved range".to_string()))
        }
    }

    fn name(&self) -> &'static str {
        "stub"
    }
}

pub fn create_test_state(behind_proxy: bool) -> (AppState, Arc<InMemoryStore>) {
    let store = Arc::new(InMemoryStore::new());
    let links: Arc<dyn LinkRepository> = store.clone();
    let clicks: Arc<dyn ClickRepository> = store.clone();

    let geolocation = GeolocationService::new(Arc::new(StubGeoLookup), Duration::from_millis(500));

    let state = AppState::new(links, clicks, geolocation, 8, behind_proxy);

    (state, store)
}

pub async fn create_test_link(state: &AppState, url: &str) -> TrackingLink {
    state.link_service.create(url, None).await.unwrap()
}

/// Polls until the link has `expected` clicks, for background recordings.
pub async fn wait_for_clicks(store: &InMemoryStore, link_id: Uuid, expected: usize) {
    for _ in 0..200 {
        if store.list_for_link(link_id).await.unwrap().len() >= expected {
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("timed out waiting for {expected} clicks on {link_id}");
}

#[derive(Clone)]
pub struct MockConnectInfoLayer;

impl<S> Layer<S> for MockConnectInfoLayer {
    type Service = MockConnectInfoService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        MockConnectInfoService { inner }
    }
}

#[derive(Clone)]
pub struct MockConnectInfoService<S> {
    inner: S,
}

impl<S, B> tower::Service<axum::http::Request<B>> for MockConnectInfoService<S>
where
    S: tower::Service<axum::http::Request<B>> + Clone + Send + 'static,
    S::Future: Send + 'static,
    B: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = S::Future;

    fn poll_ready(
        &mut self,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: axum::http::Request<B>) -> Self::Future {
        let addr: SocketAddr = format!("{PEER_IP}:12345").parse().unwrap();
        req.extensions_mut().insert(ConnectInfo(addr));
        self.inner.call(req)
    }
}
