//! Serving the front-end build output.
//!
//! # Responsibilities
//! - Resolve request paths under the build root (traversal handled by ServeDir)
//! - Serve `index.html` for directories
//! - Serve the root index for client-side page routes when enabled
//! - Everything else that is missing is a 404

use axum::{
    body::Body,
    http::Request,
    response::{IntoResponse, Response},
};
use tower::ServiceExt;
use tower_http::services::{ServeDir, ServeFile};

use crate::config::StaticConfig;

/// Static file server for the build output directory.
#[derive(Debug, Clone)]
pub struct StaticFiles {
    files: ServeDir,
    pages: Option<ServeDir<ServeFile>>,
}

impl StaticFiles {
    pub fn new(config: &StaticConfig) -> Self {
        let files = ServeDir::new(&config.root).append_index_html_on_directories(true);
        let pages = config
            .spa_fallback
            .then(|| files.clone().fallback(ServeFile::new(config.root.join(&config.index))));

        if !config.root.is_dir() {
            tracing::warn!(
                root = %config.root.display(),
                "Build output directory does not exist; every asset request will 404"
            );
        }

        Self { files, pages }
    }

    pub async fn serve(&self, request: Request<Body>) -> Response {
        let result = match &self.pages {
            Some(pages) if is_page_route(request.uri().path()) => pages
                .clone()
                .oneshot(request)
                .await
                .map(IntoResponse::into_response),
            _ => self
                .files
                .clone()
                .oneshot(request)
                .await
                .map(IntoResponse::into_response),
        };

        match result {
            Ok(response) => response,
            Err(never) => match never {},
        }
    }
}

/// A path whose last segment has no extension looks like a page, not an asset.
fn is_page_route(path: &str) -> bool {
    let last = path.rsplit('/').next().unwrap_or_default();
    !last.contains('.')
}
