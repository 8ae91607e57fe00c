#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use airavata_registry_client::{
    CredentialProvider, CredentialResult, RegistryClient, RegistryConfig, SessionStore,
    basic_authorization,
};
use async_trait::async_trait;
use httpmock::MockServer;

pub const USERNAME: &str = "admin";
pub const PASSWORD: &str = "s3cret";
pub const API_ROOT: &str = "/airavata-registry/api";

/// Credential provider that records how often it was consulted.
#[derive(Debug, Default)]
pub struct CountingCredentials {
    calls: AtomicUsize,
}

impl CountingCredentials {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CredentialProvider for CountingCredentials {
    async fn password(&self, _username: &str) -> CredentialResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(PASSWORD.to_string())
    }
}

pub fn basic_header() -> String {
    basic_authorization(USERNAME, PASSWORD)
}

pub fn api_path(resource: &str) -> String {
    format!("{API_ROOT}/{resource}")
}

pub fn registry_config(server: &MockServer) -> RegistryConfig {
    RegistryConfig::parse(&server.url(API_ROOT), USERNAME).expect("mock server URL is valid")
}

pub fn client(server: &MockServer) -> (RegistryClient, Arc<CountingCredentials>) {
    client_with_session(server, SessionStore::new())
}

pub fn client_with_session(
    server: &MockServer,
    session: SessionStore,
) -> (RegistryClient, Arc<CountingCredentials>) {
    let credentials = Arc::new(CountingCredentials::default());
    let client = RegistryClient::with_session(
        &registry_config(server),
        Arc::clone(&credentials) as Arc<dyn CredentialProvider>,
        session,
    )
    .expect("client builds");
    (client, credentials)
}

pub fn client_with_timeout(
    server: &MockServer,
    timeout: Duration,
) -> (RegistryClient, Arc<CountingCredentials>) {
    let credentials = Arc::new(CountingCredentials::default());
    let client = RegistryClient::new(
        &registry_config(server).with_timeout(timeout),
        Arc::clone(&credentials) as Arc<dyn CredentialProvider>,
    )
    .expect("client builds");
    (client, credentials)
}
