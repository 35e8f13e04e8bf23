use crate::pipeline::traits::SearchClient;
use async_trait::async_trait;
use serde_json::{Map, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// Stands in for a collaborator whose credential is missing. Every search
/// comes back empty.
pub struct DummySearch;

#[async_trait]
impl SearchClient for DummySearch {
    async fn search(&self, _params: &[(&str, String)]) -> anyhow::Result<Value> {
        Ok(Value::Object(Map::new()))
    }
}

/// Returns the same body for every search and records what it was asked.
pub struct CannedSearch {
    body: Value,
    calls: AtomicUsize,
    last_params: Mutex<Vec<(String, String)>>,
}

impl CannedSearch {
    pub fn new(body: Value) -> Self {
        Self {
            body,
            calls: AtomicUsize::new(0),
            last_params: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_params(&self) -> Vec<(String, String)> {
        self.last_params
            .lock()
            .map(|p| p.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl SearchClient for CannedSearch {
    async fn search(&self, params: &[(&str, String)]) -> anyhow::Result<Value> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut last) = self.last_params.lock() {
            *last = params.iter().map(|(k, v)| (k.to_string(), v.clone())).collect();
        }
        Ok(self.body.clone())
    }
}

/// Fails every search, as an unreachable service would.
#[derive(Default)]
pub struct FailingSearch {
    calls: AtomicUsize,
}

impl FailingSearch {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SearchClient for FailingSearch {
    async fn search(&self, _params: &[(&str, String)]) -> anyhow::Result<Value> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        anyhow::bail!("connection refused")
    }
}
