//! Shared test helpers for backend integration tests
//!
//! Provides wiremock-based mock server setup and recording fakes for the
//! messenger and navigator ports.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use relform_api::auth::HttpSessionRefresher;
use relform_api::client::ApiClient;
use relform_api::provider::HttpRelatedUserApi;
use relform_api::session::MemorySessionStore;
use relform_core::domain::{Credentials, Route};
use relform_core::ports::{IMessenger, INavigator, Message};
use relform_core::usecases::SessionRetryGuard;

pub const OLD_ACCESS: &str = "old-access";
pub const OLD_REFRESH: &str = "old-refresh";

/// Everything a test needs to talk to the mock backend
pub struct Backend {
    pub server: MockServer,
    pub store: Arc<MemorySessionStore>,
    pub client: Arc<ApiClient>,
    pub api: HttpRelatedUserApi,
}

/// Starts a mock server and a client whose session holds the old token pair
pub async fn setup_backend() -> Backend {
    let server = MockServer::start().await;
    let store = Arc::new(MemorySessionStore::with_credentials(Credentials::new(
        OLD_ACCESS,
        OLD_REFRESH,
    )));
    let client = Arc::new(ApiClient::with_base_url(server.uri(), store.clone()));
    let api = HttpRelatedUserApi::new(client.clone());

    Backend {
        server,
        store,
        client,
        api,
    }
}

/// A related user payload as the backend returns it
pub fn related_user_json(id: &str) -> serde_json::Value {
    serde_json::json!({
        "_id": id,
        "email": "ana@example.com",
        "name": "Ana",
        "uniqueId": "A-1",
        "businessName": "Acme",
        "permissionGroupId": ["g1"],
        "permissionGroup": [{ "_id": "g1", "name": "Admins" }],
        "__permissionGroup": { "_id": "g1", "name": "Admins" }
    })
}

/// Mounts `GET /related-user/{id}` answering only to the given bearer token
pub async fn mount_find_for_token(
    server: &MockServer,
    id: &str,
    token: &str,
    response: ResponseTemplate,
) {
    Mock::given(method("GET"))
        .and(path(format!("/related-user/{}", id)))
        .and(header("authorization", format!("Bearer {}", token).as_str()))
        .respond_with(response)
        .mount(server)
        .await;
}

/// Error response carrying the expired-session marker
pub fn expired_response() -> ResponseTemplate {
    ResponseTemplate::new(401).set_body_json(serde_json::json!({
        "message": "Your session has expired",
        "logMessage": "jwt expired"
    }))
}

/// Records every message reported to the user
#[derive(Default)]
pub struct RecordingMessenger {
    texts: Mutex<Vec<String>>,
}

impl RecordingMessenger {
    pub fn texts(&self) -> Vec<String> {
        self.texts.lock().unwrap().clone()
    }
}

#[async_trait]
impl IMessenger for RecordingMessenger {
    async fn report(&self, message: &Message) -> anyhow::Result<()> {
        self.texts.lock().unwrap().push(message.text.clone());
        Ok(())
    }
}

/// Records every navigation
#[derive(Default)]
pub struct RecordingNavigator {
    routes: Mutex<Vec<String>>,
}

impl RecordingNavigator {
    pub fn routes(&self) -> Vec<String> {
        self.routes.lock().unwrap().clone()
    }
}

#[async_trait]
impl INavigator for RecordingNavigator {
    async fn navigate(&self, route: &Route) -> anyhow::Result<()> {
        self.routes.lock().unwrap().push(route.as_str().to_string());
        Ok(())
    }
}

/// Builds a retry guard wired to the backend's store and refresh endpoint
pub fn guard_for(
    backend: &Backend,
) -> (SessionRetryGuard, Arc<RecordingMessenger>, Arc<RecordingNavigator>) {
    let messenger = Arc::new(RecordingMessenger::default());
    let navigator = Arc::new(RecordingNavigator::default());
    let guard = SessionRetryGuard::new(
        backend.store.clone(),
        Arc::new(HttpSessionRefresher::new(backend.client.clone())),
        navigator.clone(),
        messenger.clone(),
    );
    (guard, messenger, navigator)
}
