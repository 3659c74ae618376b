// src/services/renderer.rs
// Manim renderer wrapper using the command-line tool.

use async_trait::async_trait;
use std::ffi::OsString;
use std::path::PathBuf;
use std::process::Stdio;
use tokio::process::Command;

/// Quality preset flag (`-ql`, 480p15).
pub const LOW_QUALITY_FLAG: &str = "-ql";
pub const DISABLE_CACHE_FLAG: &str = "--disable_caching";

/// One invocation of the renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderJob {
    pub script_path: PathBuf,
    pub scene_name: String,
    pub media_dir: PathBuf,
    pub output_file: PathBuf,
}

impl RenderJob {
    /// Arguments after the program name, in the order the renderer expects.
    pub fn args(&self) -> Vec<OsString> {
        vec![
            self.script_path.clone().into_os_string(),
            self.scene_name.clone().into(),
            LOW_QUALITY_FLAG.into(),
            DISABLE_CACHE_FLAG.into(),
            "--media_dir".into(),
            self.media_dir.clone().into_os_string(),
            "--output_file".into(),
            self.output_file.clone().into_os_string(),
        ]
    }
}

/// Captured result of a finished render process.
///
/// Output is decoded lossily: invalid UTF-8 bytes become U+FFFD.
#[derive(Debug, Clone, Default)]
pub struct RenderOutput {
    pub success: bool,
    /// `None` when the process was killed by a signal.
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("Failed to execute {program}: {source}. Make sure it is installed.")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
}

#[async_trait]
pub trait SceneRenderer: Send + Sync {
    /// Run the renderer to completion and capture its output.
    async fn render(&self, job: &RenderJob) -> Result<RenderOutput, RenderError>;

    /// Whether the renderer can be launched at all.
    async fn check_available(&self) -> bool;

    fn program(&self) -> &str;
}

/// Runs the `manim` executable (or a configured replacement).
#[derive(Debug, Clone)]
pub struct ManimCli {
    program: String,
}

impl ManimCli {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

#[async_trait]
impl SceneRenderer for ManimCli {
    async fn render(&self, job: &RenderJob) -> Result<RenderOutput, RenderError> {
        tracing::debug!(
            program = %self.program,
            script = %job.script_path.display(),
            output = %job.output_file.display(),
            "Spawning renderer"
        );

        let output = Command::new(&self.program)
            .args(job.args())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|source| RenderError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        Ok(RenderOutput {
            success: output.status.success(),
            exit_code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }

    async fn check_available(&self) -> bool {
        let status = Command::new(&self.program)
            .arg("--version")
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await;

        matches!(status, Ok(status) if status.success())
    }

    fn program(&self) -> &str {
        &self.program
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn job() -> RenderJob {
        RenderJob {
            script_path: PathBuf::from("/tmp/scene_abc.py"),
            scene_name: "GeneratedScene".into(),
            media_dir: PathBuf::from("media"),
            output_file: PathBuf::from("media/scene_1.mp4"),
        }
    }

    #[test]
    fn test_args_order() {
        let args: Vec<String> = job()
            .args()
            .into_iter()
            .map(|a| a.into_string().unwrap())
            .collect();
        assert_eq!(
            args,
            vec![
                "/tmp/scene_abc.py",
                "GeneratedScene",
                "-ql",
                "--disable_caching",
                "--media_dir",
                "media",
                "--output_file",
                "media/scene_1.mp4",
            ]
        );
    }

    #[tokio::test]
    async fn test_missing_program_is_spawn_error() {
        let cli = ManimCli::new("prompt-animator-no-such-renderer");
        assert!(!cli.check_available().await);

        let err = cli.render(&job()).await.unwrap_err();
        assert!(matches!(err, RenderError::Spawn { ref program, .. } if program == "prompt-animator-no-such-renderer"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_exit_status_is_captured() {
        let ok = ManimCli::new("true").render(&job()).await.unwrap();
        assert!(ok.success);
        assert_eq!(ok.exit_code, Some(0));

        let failed = ManimCli::new("false").render(&job()).await.unwrap();
        assert!(!failed.success);
        assert_eq!(failed.exit_code, Some(1));
    }
}
