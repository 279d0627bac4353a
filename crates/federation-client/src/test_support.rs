//! Deterministic collaborators for client tests.

use crate::{FederationClient, RegistryClient};
use async_trait::async_trait;
use federation_core::{
    FederationError, LicenseProvider, PayloadEncryptor, RegistryHostSource, Result, Scheme,
};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use wiremock::MockServer;

/// Wraps the plaintext with the key; checksum is the body length.
pub struct TagEncryptor;

impl TagEncryptor {
    pub fn seal_value(public_key: &str, body: Value) -> Value {
        match body {
            Value::Object(map) => Value::Object(
                map.into_iter()
                    .map(|(k, v)| (k, json!(format!("{public_key}:{}", v.as_str().unwrap_or_default()))))
                    .collect(),
            ),
            other => other,
        }
    }

    pub fn checksum_of(body: &Value) -> String {
        format!("len-{}", body.to_string().len())
    }
}

#[async_trait]
impl PayloadEncryptor for TagEncryptor {
    async fn encrypt_body(&self, public_key: &str, body: Value) -> Result<Value> {
        Ok(Self::seal_value(public_key, body))
    }

    fn checksum(&self, body: &Value) -> String {
        Self::checksum_of(body)
    }
}

pub struct CountingLicense {
    pub calls: AtomicUsize,
    fail: bool,
}

impl CountingLicense {
    pub fn new() -> Self {
        Self {
            calls: AtomicUsize::new(0),
            fail: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            calls: AtomicUsize::new(0),
            fail: true,
        }
    }
}

#[async_trait]
impl LicenseProvider for CountingLicense {
    async fn license_checksum(&self) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            Err(FederationError::Capability("license service down".into()))
        } else {
            Ok("LICENSE".into())
        }
    }
}

pub struct CountingHost {
    pub calls: AtomicUsize,
    host: String,
}

impl CountingHost {
    pub fn new(host: String) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            host,
        }
    }
}

#[async_trait]
impl RegistryHostSource for CountingHost {
    async fn registry_host(&self) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.host.clone())
    }
}

/// Replaces every field with a byte array; checksum is the body length.
pub struct ByteEncryptor;

impl ByteEncryptor {
    pub fn seal_value(body: Value) -> Value {
        match body {
            Value::Object(map) => Value::Object(
                map.into_iter()
                    .map(|(k, v)| {
                        let bytes: Vec<u8> = v.as_str().unwrap_or_default().bytes().collect();
                        (k, json!(bytes))
                    })
                    .collect(),
            ),
            other => other,
        }
    }
}

#[async_trait]
impl PayloadEncryptor for ByteEncryptor {
    async fn encrypt_body(&self, _public_key: &str, body: Value) -> Result<Value> {
        Ok(Self::seal_value(body))
    }

    fn checksum(&self, body: &Value) -> String {
        TagEncryptor::checksum_of(body)
    }
}

pub fn http(timeout: Duration) -> FederationClient {
    FederationClient::builder()
        .timeout(timeout)
        .registry_scheme(Scheme::Http)
        .peer_scheme(Scheme::Http)
        .build()
        .unwrap()
}

pub fn registry_client(
    server: &MockServer,
    timeout: Duration,
) -> (RegistryClient, Arc<CountingLicense>) {
    let license = Arc::new(CountingLicense::new());
    let registry = RegistryClient::new(
        http(timeout),
        Arc::new(TagEncryptor),
        license.clone(),
        Arc::new(server.address().to_string()),
    );
    (registry, license)
}
