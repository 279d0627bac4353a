//! Turns a raw registry answer into federation records.

use federation_core::{FederationRecord, RawRegistryResponse};
use federation_dns::SrvResolver;
use std::sync::Arc;
use tracing::{debug, warn};

/// Community domain whose service record lives on the root zone
pub const BOOTSTRAP_DOMAIN: &str = "community.2ndlock.org";

/// Root zone the bootstrap domain resolves against
pub const ROOT_DOMAIN: &str = "2ndlock.org";

/// Domain whose SRV record locates the federation host of `domain`
#[must_use]
pub fn srv_lookup_domain(domain: &str) -> &str {
    if domain == BOOTSTRAP_DOMAIN {
        ROOT_DOMAIN
    } else {
        domain
    }
}

/// Builds federation records from registry entries and their SRV targets
#[derive(Clone)]
pub struct ResponseParser {
    resolver: Arc<dyn SrvResolver>,
}

impl ResponseParser {
    /// Create a parser resolving through `resolver`
    #[must_use]
    pub fn new(resolver: Arc<dyn SrvResolver>) -> Self {
        Self { resolver }
    }

    /// Resolve every advertised entry, in order.
    ///
    /// Entries without an SRV record are dropped; lookups run one at a time.
    pub async fn parse(&self, response: &RawRegistryResponse) -> Vec<FederationRecord> {
        let mut records = Vec::with_capacity(response.entry_count());

        for entry in response.entries() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(value) => {
                    warn!(entry = %value, "skipping malformed registry entry");
                    continue;
                }
            };

            let lookup = srv_lookup_domain(&entry.domain);
            match self.resolver.resolve_service_record(lookup).await {
                Some(srv) => records.push(FederationRecord::new(entry.domain, entry.public_key, srv)),
                None => debug!(domain = %entry.domain, lookup, "dropping candidate without SRV record"),
            }
        }

        records
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use federation_core::SrvTarget;
    use serde_json::json;
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Scripted {
        answers: HashMap<String, Vec<SrvTarget>>,
        queried: Mutex<Vec<String>>,
    }

    impl Scripted {
        fn with(mut self, domain: &str, target: SrvTarget) -> Self {
            self.answers.insert(domain.to_string(), vec![target]);
            self
        }
    }

    #[async_trait]
    impl SrvResolver for Scripted {
        async fn resolve_service_record(&self, domain: &str) -> Option<Vec<SrvTarget>> {
            self.queried.lock().unwrap().push(domain.to_string());
            self.answers.get(domain).cloned()
        }
    }

    fn raw(value: serde_json::Value) -> RawRegistryResponse {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn bootstrap_domain_maps_to_root() {
        assert_eq!(srv_lookup_domain("community.2ndlock.org"), "2ndlock.org");
        assert_eq!(srv_lookup_domain("example.com"), "example.com");
        assert_eq!(srv_lookup_domain("sub.community.2ndlock.org"), "sub.community.2ndlock.org");
    }

    #[tokio::test]
    async fn bootstrap_entry_resolves_root_zone() {
        let resolver = Arc::new(
            Scripted::default().with("2ndlock.org", SrvTarget::new("fed.2ndlock.org", 443, 0, 0)),
        );
        let parser = ResponseParser::new(resolver.clone());

        let records = parser
            .parse(&raw(json!([
                {"0": {"domain": "community.2ndlock.org", "publicKey": "PKC"}}
            ])))
            .await;

        assert_eq!(*resolver.queried.lock().unwrap(), ["2ndlock.org"]);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].domain, "community.2ndlock.org");
        assert_eq!(records[0].srv[0].name, "fed.2ndlock.org");
    }

    #[tokio::test]
    async fn unresolved_candidates_are_dropped_in_order() {
        let resolver = Arc::new(
            Scripted::default()
                .with("a.example", SrvTarget::new("fed.a.example", 1, 0, 0))
                .with("c.example", SrvTarget::new("fed.c.example", 3, 0, 0)),
        );
        let parser = ResponseParser::new(resolver.clone());

        let records = parser
            .parse(&raw(json!([
                {
                    "x": {"domain": "a.example", "publicKey": "PKA"},
                    "y": {"domain": "b.example", "publicKey": "PKB"}
                },
                [{"domain": "c.example", "publicKey": "PKC"}, "garbage"]
            ])))
            .await;

        let domains: Vec<&str> = records.iter().map(|r| r.domain.as_str()).collect();
        assert_eq!(domains, ["a.example", "c.example"]);
        assert_eq!(records[1].public_key, "PKC");
        assert_eq!(
            *resolver.queried.lock().unwrap(),
            ["a.example", "b.example", "c.example"]
        );
    }

    #[tokio::test]
    async fn sole_unresolved_candidate_yields_nothing() {
        let parser = ResponseParser::new(Arc::new(Scripted::default()));
        let records = parser
            .parse(&raw(json!([{"0": {"domain": "example.com", "publicKey": "PKX"}}])))
            .await;
        assert!(records.is_empty());
    }

    #[tokio::test]
    async fn duplicates_are_kept() {
        let resolver = Arc::new(
            Scripted::default().with("example.com", SrvTarget::new("fed.example.com", 5222, 10, 5)),
        );
        let parser = ResponseParser::new(resolver);
        let records = parser
            .parse(&raw(json!([
                [{"domain": "example.com", "publicKey": "K1"}],
                [{"domain": "example.com", "publicKey": "K2"}]
            ])))
            .await;
        assert_eq!(records.len(), 2);
    }
}
