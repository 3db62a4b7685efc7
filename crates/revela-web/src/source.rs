use async_trait::async_trait;
use std::path::PathBuf;
use std::time::Duration;

use revela_core::{LoaderConfig, RevelaError, RevelaResult};

/// Somewhere an SVG document can be fetched from.
#[async_trait]
pub trait SceneSource: Send + Sync {
    /// Stable name for logs and cache keys (path or URL).
    fn name(&self) -> &str;

    async fn fetch(&self) -> RevelaResult<Vec<u8>>;
}

/// Whether `location` should be fetched over HTTP.
pub fn is_http_url(location: &str) -> bool {
    location.starts_with("http://") || location.starts_with("https://")
}

/// Pick a source for a path or URL.
pub fn source_for(location: &str, loader: &LoaderConfig) -> RevelaResult<Box<dyn SceneSource>> {
    if is_http_url(location) {
        Ok(Box::new(HttpSource::new(location, loader)?))
    } else {
        Ok(Box::new(FileSource::new(location)))
    }
}

pub struct FileSource {
    path: PathBuf,
    name: String,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path.display().to_string();
        Self { path, name }
    }
}

#[async_trait]
impl SceneSource for FileSource {
    fn name(&self) -> &str {
        &self.name
    }

    async fn fetch(&self) -> RevelaResult<Vec<u8>> {
        tokio::fs::read(&self.path)
            .await
            .map_err(|e| RevelaError::fetch(e.to_string(), &self.name))
    }
}

pub struct HttpSource {
    url: String,
    client: reqwest::Client,
}

impl HttpSource {
    pub fn new(url: impl Into<String>, loader: &LoaderConfig) -> RevelaResult<Self> {
        let url = url.into();
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(loader.timeout_secs))
            .user_agent(loader.user_agent.clone())
            .build()
            .map_err(|e| RevelaError::fetch(format!("failed to build HTTP client: {}", e), &url))?;
        Ok(Self { url, client })
    }
}

#[async_trait]
impl SceneSource for HttpSource {
    fn name(&self) -> &str {
        &self.url
    }

    async fn fetch(&self) -> RevelaResult<Vec<u8>> {
        let res = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| RevelaError::fetch(e.to_string(), &self.url))?;

        if !res.status().is_success() {
            return Err(RevelaError::fetch(
                format!("server responded {}", res.status()),
                &self.url,
            ));
        }

        let bytes = res
            .bytes()
            .await
            .map_err(|e| RevelaError::fetch(format!("failed to read body: {}", e), &self.url))?;
        Ok(bytes.to_vec())
    }
}

/// An in-memory document, for embedding and tests.
pub struct StaticSource {
    name: String,
    data: Vec<u8>,
}

impl StaticSource {
    pub fn new(name: impl Into<String>, data: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            data: data.into(),
        }
    }
}

#[async_trait]
impl SceneSource for StaticSource {
    fn name(&self) -> &str {
        &self.name
    }

    async fn fetch(&self) -> RevelaResult<Vec<u8>> {
        Ok(self.data.clone())
    }
}
