#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use tempfile::TempDir;
use tower::ServiceExt;

use prompt_animator::config::{AppConfig, MediaConfig};
use prompt_animator::services::renderer::{RenderError, RenderJob, RenderOutput, SceneRenderer};
use prompt_animator::{app, AppState};

/// Renderer double: records every job (and the script contents it saw on
/// disk) and answers with a fixed output.
pub struct MockRenderer {
    reply: RenderOutput,
    calls: Mutex<Vec<RecordedCall>>,
}

#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub job: RenderJob,
    pub script: String,
}

impl MockRenderer {
    pub fn exiting(code: i32, stdout: &str, stderr: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: RenderOutput {
                success: code == 0,
                exit_code: Some(code),
                stdout: stdout.to_string(),
                stderr: stderr.to_string(),
            },
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl SceneRenderer for MockRenderer {
    async fn render(&self, job: &RenderJob) -> Result<RenderOutput, RenderError> {
        let script = std::fs::read_to_string(&job.script_path).expect("script exists while rendering");
        self.calls.lock().unwrap().push(RecordedCall {
            job: job.clone(),
            script,
        });
        Ok(self.reply.clone())
    }

    async fn check_available(&self) -> bool {
        true
    }

    fn program(&self) -> &str {
        "mock-manim"
    }
}

/// Isolated media and script directories for one test.
pub struct TestDirs {
    pub media: TempDir,
    pub scripts: TempDir,
}

impl TestDirs {
    pub fn new() -> Self {
        Self {
            media: tempfile::tempdir().unwrap(),
            scripts: tempfile::tempdir().unwrap(),
        }
    }

    pub fn media_root(&self) -> PathBuf {
        self.media.path().join("media")
    }

    pub fn script_files(&self) -> Vec<PathBuf> {
        list_dir(self.scripts.path())
    }
}

pub fn test_config(dirs: &TestDirs) -> AppConfig {
    AppConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        media: MediaConfig {
            media_root: dirs.media_root(),
            media_url: "https://cdn.example.com/media/".to_string(),
            script_dir: Some(dirs.scripts.path().to_path_buf()),
        },
        renderer_program: "mock-manim".to_string(),
    }
}

pub fn build_test_app(dirs: &TestDirs, renderer: Arc<dyn SceneRenderer>) -> Router {
    app(Arc::new(AppState::new(test_config(dirs), renderer)))
}

pub fn list_dir(dir: &Path) -> Vec<PathBuf> {
    std::fs::read_dir(dir)
        .map(|rd| rd.flatten().map(|e| e.path()).collect())
        .unwrap_or_default()
}

pub async fn post_json(app: Router, uri: &str, body: &str) -> Response {
    post_with_content_type(app, uri, "application/json", body).await
}

pub async fn post_with_content_type(
    app: Router,
    uri: &str,
    content_type: &str,
    body: &str,
) -> Response {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", content_type)
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

pub fn assert_status(response: &Response, expected: StatusCode) {
    assert_eq!(response.status(), expected, "unexpected status");
}
