// src/services/animation.rs
use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use tempfile::TempPath;

use crate::config::MediaConfig;
use crate::error::{AppError, AppResult};
use crate::models::generate::GenerateResponse;
use crate::services::renderer::{RenderError, RenderJob, RenderOutput, SceneRenderer};
use crate::services::scene_script::{
    base_name_now, render_script, video_file_name, SCENE_NAME, SCRIPT_SUFFIX,
};

/// Message returned alongside the renderer's output when it exits non-zero.
pub const RENDER_FAILED_MESSAGE: &str = "Manim failed to generate the video.";

/// Turns prompts into rendered videos under the media root.
#[derive(Clone)]
pub struct AnimationService {
    media: MediaConfig,
    renderer: Arc<dyn SceneRenderer>,
}

impl AnimationService {
    pub fn new(media: MediaConfig, renderer: Arc<dyn SceneRenderer>) -> Self {
        Self { media, renderer }
    }

    pub fn media(&self) -> &MediaConfig {
        &self.media
    }

    pub fn renderer(&self) -> &Arc<dyn SceneRenderer> {
        &self.renderer
    }

    /// Render `prompt` into a video.
    ///
    /// A renderer that exits non-zero yields `Ok(GenerateResponse::Error)`;
    /// `Err` is reserved for a missing prompt and for failures around the
    /// renderer (filesystem, spawn, task panic).
    pub async fn generate(&self, prompt: Option<String>) -> AppResult<GenerateResponse> {
        let prompt = match prompt {
            Some(prompt) if !prompt.is_empty() => prompt,
            _ => return Err(AppError::NoPrompt),
        };

        tokio::fs::create_dir_all(&self.media.media_root)
            .await
            .map_err(|e| AppError::io("Failed to create media directory", e))?;

        let base_name = base_name_now();
        let video_name = video_file_name(&base_name);
        let script = write_script(&self.media.script_dir(), &base_name, &render_script(&prompt))?;

        let job = RenderJob {
            script_path: script.to_path_buf(),
            scene_name: SCENE_NAME.to_string(),
            media_dir: self.media.media_root.clone(),
            output_file: self.media.media_root.join(&video_name),
        };

        tracing::info!(
            base_name = %base_name,
            prompt_chars = prompt.chars().count(),
            renderer = %self.renderer.program(),
            "Rendering animation"
        );

        // The task owns the script, so cleanup runs even if the caller goes away.
        let output = tokio::spawn(run_render(self.renderer.clone(), job, script))
            .await
            .map_err(|e| AppError::Task(e.to_string()))??;

        if output.success {
            let video_url = self.media.video_url(&video_name);
            tracing::info!(base_name = %base_name, video_url = %video_url, "Animation rendered");
            Ok(GenerateResponse::Success { video_url })
        } else {
            tracing::warn!(
                base_name = %base_name,
                exit_code = ?output.exit_code,
                stderr_bytes = output.stderr.len(),
                "Renderer exited with failure"
            );
            Ok(GenerateResponse::Error {
                error: RENDER_FAILED_MESSAGE.to_string(),
                stdout: output.stdout,
                stderr: output.stderr,
            })
        }
    }
}

async fn run_render(
    renderer: Arc<dyn SceneRenderer>,
    job: RenderJob,
    script: TempPath,
) -> Result<RenderOutput, RenderError> {
    let started = Instant::now();
    let result = renderer.render(&job).await;
    tracing::debug!(
        duration_ms = %started.elapsed().as_millis(),
        ok = result.is_ok(),
        "Renderer finished"
    );
    remove_script(script);
    result
}

/// Write the scene script to a fresh `<base_name>_XXXXXX.py` file in `dir`.
fn write_script(dir: &Path, base_name: &str, contents: &str) -> AppResult<TempPath> {
    let mut file = tempfile::Builder::new()
        .prefix(&format!("{}_", base_name))
        .suffix(SCRIPT_SUFFIX)
        .tempfile_in(dir)
        .map_err(|e| AppError::io("Failed to create scene script", e))?;

    file.write_all(contents.as_bytes())
        .and_then(|_| file.flush())
        .map_err(|e| AppError::io("Failed to write scene script", e))?;

    Ok(file.into_temp_path())
}

/// Delete the script if it is still there. Consumes the path so it happens once.
fn remove_script(script: TempPath) {
    let path = script.to_path_buf();
    match script.close() {
        Ok(()) => tracing::debug!(path = %path.display(), "Removed scene script"),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => tracing::warn!(path = %path.display(), error = %e, "Failed to remove scene script"),
    }
}
