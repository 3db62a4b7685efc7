use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use revela_core::ContentHash;
use revela_svg::SvgDocument;

/// Parsed documents keyed by source name. Only successful loads are stored,
/// so a failed fetch is retried on the next request.
#[derive(Default)]
pub struct ResourceCache {
    entries: Mutex<HashMap<String, Arc<SvgDocument>>>,
}

impl ResourceCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<Arc<SvgDocument>> {
        self.lock().get(name).cloned()
    }

    pub fn insert(&self, name: impl Into<String>, document: Arc<SvgDocument>) {
        self.lock().insert(name.into(), document);
    }

    /// Drop a cached document, returning its hash if one was present.
    pub fn invalidate(&self, name: &str) -> Option<ContentHash> {
        self.lock().remove(name).map(|doc| doc.hash().clone())
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, Arc<SvgDocument>>> {
        // Entries are whole documents; a panic mid-insert cannot leave one half-written.
        self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
