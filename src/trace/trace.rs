use serde::Serialize;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::locate::step::LocateOutcome;

/// One line of the locate trace log.
#[derive(Debug, Serialize)]
pub struct LocateTrace {
    pub timestamp_ms: u128,

    pub url: Option<String>,
    pub target: Option<usize>,

    pub status: String,
    pub hpath: Option<String>,
    pub steps: Vec<String>,

    pub reduced_nodes: usize,
    pub fingerprint: Option<String>,
}

impl LocateTrace {
    pub fn now(target: Option<usize>) -> Self {
        Self {
            timestamp_ms: SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_millis())
                .unwrap_or_default(),
            url: None,
            target,
            status: String::new(),
            hpath: None,
            steps: vec![],
            reduced_nodes: 0,
            fingerprint: None,
        }
    }

    pub fn with_url(mut self, url: Option<&str>) -> Self {
        self.url = url.map(str::to_string);
        self
    }

    pub fn with_outcome(mut self, outcome: &LocateOutcome) -> Self {
        self.status = outcome.status().to_string();
        self.hpath = outcome.path().map(|p| p.to_string());
        self.steps = outcome
            .path()
            .map(|p| p.steps.iter().map(|s| s.label.clone()).collect())
            .unwrap_or_default();
        self
    }

    pub fn with_tree(mut self, reduced_nodes: usize, fingerprint: Option<&str>) -> Self {
        self.reduced_nodes = reduced_nodes;
        self.fingerprint = fingerprint.map(str::to_string);
        self
    }
}
