pub mod cache;
pub mod session;
pub mod source;

pub use cache::ResourceCache;
pub use session::{RevealOutcome, RevealSession, ViewportHint};
pub use source::{is_http_url, source_for, FileSource, HttpSource, SceneSource, StaticSource};
