use std::sync::Arc;

use revela_core::{RevelaConfig, RevelaResult, ViewportProfile};
use revela_ir::{RevealSchedule, Scene};
use revela_svg::SvgDocument;

use crate::cache::ResourceCache;
use crate::source::SceneSource;

/// What is known about the viewport the reveal will play in.
#[derive(Debug, Clone, Default)]
pub struct ViewportHint {
    pub width: Option<f64>,
    pub user_agent: Option<String>,
}

impl ViewportHint {
    pub fn new(width: Option<f64>, user_agent: Option<String>) -> Self {
        Self { width, user_agent }
    }
}

/// Result of a completed load.
#[derive(Debug, Clone)]
pub struct RevealOutcome {
    pub document: Arc<SvgDocument>,
    pub scene: Scene,
    pub schedule: RevealSchedule,
}

/// Loads one source and turns it into a reveal schedule.
pub struct RevealSession {
    config: RevelaConfig,
    source: Box<dyn SceneSource>,
    cache: Arc<ResourceCache>,
    viewport: ViewportHint,
}

impl RevealSession {
    pub fn new(config: RevelaConfig, source: Box<dyn SceneSource>) -> Self {
        Self {
            config,
            source,
            cache: Arc::new(ResourceCache::new()),
            viewport: ViewportHint::default(),
        }
    }

    /// Share a cache with other sessions.
    pub fn with_cache(mut self, cache: Arc<ResourceCache>) -> Self {
        self.cache = cache;
        self
    }

    pub fn with_viewport(mut self, viewport: ViewportHint) -> Self {
        self.viewport = viewport;
        self
    }

    pub fn config(&self) -> &RevelaConfig {
        &self.config
    }

    pub fn source_name(&self) -> &str {
        self.source.name()
    }

    /// Profile for the session's viewport.
    pub fn detect_profile(&self) -> ViewportProfile {
        ViewportProfile::detect(
            self.viewport.width,
            self.viewport.user_agent.as_deref(),
            self.config.reveal.constrained_max_width,
        )
    }

    /// Fetch and parse the document, reusing a cached parse when present.
    pub async fn load_document(&self) -> RevelaResult<Arc<SvgDocument>> {
        let name = self.source.name();
        if let Some(doc) = self.cache.get(name) {
            tracing::debug!(source = name, "document cache hit");
            return Ok(doc);
        }

        let data = self.source.fetch().await?;
        let doc = Arc::new(SvgDocument::from_data(&data)?);
        tracing::debug!(source = name, bytes = data.len(), hash = %doc.hash(), "loaded document");
        self.cache.insert(name, doc.clone());
        Ok(doc)
    }

    /// Load, extract and schedule for `profile`.
    pub async fn try_run(&self, profile: ViewportProfile) -> RevelaResult<RevealOutcome> {
        let document = self.load_document().await?;
        let scene = document.scene_chunked(&self.config.reveal).await?;
        let schedule = RevealSchedule::build(&scene, &self.config, profile);
        tracing::info!(
            source = self.source.name(),
            shapes = schedule.len(),
            %profile,
            duration = %schedule.total_duration(),
            "reveal scheduled"
        );
        Ok(RevealOutcome {
            document,
            scene,
            schedule,
        })
    }

    /// Like [`try_run`](Self::try_run), but a failed load is logged once and
    /// yields no schedule.
    pub async fn run(&self, profile: ViewportProfile) -> Option<RevealOutcome> {
        match self.try_run(profile).await {
            Ok(outcome) => Some(outcome),
            Err(err) => {
                tracing::error!(source = self.source.name(), error = %err, "failed to load scene");
                None
            }
        }
    }

    /// Run with the profile detected from the viewport hint.
    pub async fn run_detected(&self) -> Option<RevealOutcome> {
        self.run(self.detect_profile()).await
    }
}
