//! In-memory port doubles shared by the use case tests

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::domain::{
    Credentials, PermissionGroup, PermissionGroupFilter, RecordId, RelatedUser, RelatedUserInput,
    RemoteError, Route,
};
use crate::ports::{
    IMessenger, INavigator, IRelatedUserApi, ISessionRefresher, ISessionStore, Message,
};

use super::session_retry::SessionRetryGuard;

pub struct MockStore {
    credentials: Mutex<Option<Credentials>>,
    pub fail_set: bool,
    pub fail_clear: bool,
    pub clears: AtomicUsize,
}

impl MockStore {
    pub fn with(credentials: Option<Credentials>) -> Self {
        Self {
            credentials: Mutex::new(credentials),
            fail_set: false,
            fail_clear: false,
            clears: AtomicUsize::new(0),
        }
    }

    pub fn with_failing_set(credentials: Option<Credentials>) -> Self {
        Self {
            fail_set: true,
            ..Self::with(credentials)
        }
    }

    pub fn with_failing_clear(credentials: Option<Credentials>) -> Self {
        Self {
            fail_clear: true,
            ..Self::with(credentials)
        }
    }

    pub fn current(&self) -> Option<Credentials> {
        self.credentials.lock().unwrap().clone()
    }

    pub fn clear_count(&self) -> usize {
        self.clears.load(Ordering::SeqCst)
    }
}

impl ISessionStore for MockStore {
    fn get(&self) -> anyhow::Result<Option<Credentials>> {
        Ok(self.current())
    }

    fn set(&self, credentials: &Credentials) -> anyhow::Result<()> {
        if self.fail_set {
            anyhow::bail!("storage unavailable");
        }
        *self.credentials.lock().unwrap() = Some(credentials.clone());
        Ok(())
    }

    fn clear(&self) -> anyhow::Result<()> {
        self.clears.fetch_add(1, Ordering::SeqCst);
        if self.fail_clear {
            anyhow::bail!("keyring locked");
        }
        *self.credentials.lock().unwrap() = None;
        Ok(())
    }
}

pub struct MockRefresher {
    result: Result<Credentials, RemoteError>,
    pub calls: Mutex<Vec<String>>,
}

impl MockRefresher {
    pub fn succeeding(credentials: Credentials) -> Self {
        Self {
            result: Ok(credentials),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            result: Err(RemoteError::other(message)),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl ISessionRefresher for MockRefresher {
    async fn refresh(&self, refresh_token: &str) -> Result<Credentials, RemoteError> {
        self.calls.lock().unwrap().push(refresh_token.to_string());
        self.result.clone()
    }
}

/// Records every attempted navigation; fails each one when `fail` is set
#[derive(Default)]
pub struct MockNavigator {
    pub routes: Mutex<Vec<String>>,
    pub fail: bool,
}

impl MockNavigator {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn routes(&self) -> Vec<String> {
        self.routes.lock().unwrap().clone()
    }
}

#[async_trait]
impl INavigator for MockNavigator {
    async fn navigate(&self, route: &Route) -> anyhow::Result<()> {
        self.routes.lock().unwrap().push(route.to_string());
        if self.fail {
            anyhow::bail!("router unavailable");
        }
        Ok(())
    }
}

/// Records every attempted report; fails each one when `fail` is set
#[derive(Default)]
pub struct MockMessenger {
    pub messages: Mutex<Vec<String>>,
    pub fail: bool,
}

impl MockMessenger {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn texts(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }
}

#[async_trait]
impl IMessenger for MockMessenger {
    async fn report(&self, message: &Message) -> anyhow::Result<()> {
        self.messages.lock().unwrap().push(message.text.clone());
        if self.fail {
            anyhow::bail!("snackbar detached");
        }
        Ok(())
    }
}

/// Scripted API: each method pops the next queued response
#[derive(Default)]
pub struct MockApi {
    pub find_responses: Mutex<VecDeque<Result<RelatedUser, RemoteError>>>,
    pub save_responses: Mutex<VecDeque<Result<RelatedUser, RemoteError>>>,
    pub list_responses: Mutex<VecDeque<Result<Vec<PermissionGroup>, RemoteError>>>,
    pub saved: Mutex<Vec<RelatedUserInput>>,
    pub updated: Mutex<Vec<(RelatedUserInput, String)>>,
    pub filters: Mutex<Vec<String>>,
}

impl MockApi {
    pub fn push_find(&self, response: Result<RelatedUser, RemoteError>) {
        self.find_responses.lock().unwrap().push_back(response);
    }

    pub fn push_save(&self, response: Result<RelatedUser, RemoteError>) {
        self.save_responses.lock().unwrap().push_back(response);
    }

    pub fn push_list(&self, response: Result<Vec<PermissionGroup>, RemoteError>) {
        self.list_responses.lock().unwrap().push_back(response);
    }
}

#[async_trait]
impl IRelatedUserApi for MockApi {
    async fn find(&self, _id: &RecordId) -> Result<RelatedUser, RemoteError> {
        self.find_responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(RemoteError::other("no scripted find response")))
    }

    async fn save(&self, input: &RelatedUserInput) -> Result<RelatedUser, RemoteError> {
        self.saved.lock().unwrap().push(input.clone());
        self.save_responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(RelatedUser::default()))
    }

    async fn update(
        &self,
        input: &RelatedUserInput,
        id: &RecordId,
    ) -> Result<RelatedUser, RemoteError> {
        self.updated
            .lock()
            .unwrap()
            .push((input.clone(), id.to_string()));
        self.save_responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(RelatedUser::default()))
    }

    async fn list_permission_groups(
        &self,
        filter: &PermissionGroupFilter,
    ) -> Result<Vec<PermissionGroup>, RemoteError> {
        self.filters.lock().unwrap().push(filter.to_query_value());
        self.list_responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(Vec::new()))
    }
}

/// Collaborators wired into a guard, kept around for assertions
pub struct GuardHarness {
    pub store: Arc<MockStore>,
    pub refresher: Arc<MockRefresher>,
    pub navigator: Arc<MockNavigator>,
    pub messenger: Arc<MockMessenger>,
}

impl GuardHarness {
    pub fn new(refresher: MockRefresher) -> Self {
        Self {
            store: Arc::new(MockStore::with(Some(Credentials::new(
                "old-access",
                "old-refresh",
            )))),
            refresher: Arc::new(refresher),
            navigator: Arc::new(MockNavigator::default()),
            messenger: Arc::new(MockMessenger::default()),
        }
    }

    pub fn guard(&self) -> SessionRetryGuard {
        SessionRetryGuard::new(
            self.store.clone(),
            self.refresher.clone(),
            self.navigator.clone(),
            self.messenger.clone(),
        )
    }
}
