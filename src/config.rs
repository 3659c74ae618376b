// src/config.rs
use std::path::PathBuf;

/// Errors raised while reading configuration from the environment.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} must be a valid {expected}, got {value:?}")]
    Invalid {
        var: &'static str,
        expected: &'static str,
        value: String,
    },

    #[error("{0} must not be empty")]
    Empty(&'static str),
}

/// Where rendered videos land and how they are addressed publicly.
#[derive(Debug, Clone)]
pub struct MediaConfig {
    /// Directory the renderer writes finished videos into.
    pub media_root: PathBuf,
    /// Prefix joined with the video file name to build `video_url`.
    pub media_url: String,
    /// Directory for temporary scene scripts. `None` means the system temp dir.
    pub script_dir: Option<PathBuf>,
}

impl MediaConfig {
    pub fn script_dir(&self) -> PathBuf {
        self.script_dir.clone().unwrap_or_else(std::env::temp_dir)
    }

    pub fn video_url(&self, file_name: &str) -> String {
        format!("{}{}", self.media_url, file_name)
    }
}

/// Server configuration loaded from environment variables.
///
/// | Env Var      | Default       |
/// |--------------|---------------|
/// | `HOST`       | `0.0.0.0`     |
/// | `PORT`       | `3000`        |
/// | `MEDIA_ROOT` | `media`       |
/// | `MEDIA_URL`  | `/media/`     |
/// | `MANIM_BIN`  | `manim`       |
/// | `SCRIPT_DIR` | system temp   |
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub media: MediaConfig,
    /// Renderer executable, looked up on `PATH` unless absolute.
    pub renderer_program: String,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from an arbitrary key lookup so tests don't touch the process env.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".into());

        let port = match lookup("PORT") {
            Some(raw) => raw.trim().parse::<u16>().map_err(|_| ConfigError::Invalid {
                var: "PORT",
                expected: "u16",
                value: raw.clone(),
            })?,
            None => 3000,
        };

        let media_root = PathBuf::from(lookup("MEDIA_ROOT").unwrap_or_else(|| "media".into()));
        if media_root.as_os_str().is_empty() {
            return Err(ConfigError::Empty("MEDIA_ROOT"));
        }

        let media_url = lookup("MEDIA_URL").unwrap_or_else(|| "/media/".into());

        let renderer_program = lookup("MANIM_BIN").unwrap_or_else(|| "manim".into());
        if renderer_program.trim().is_empty() {
            return Err(ConfigError::Empty("MANIM_BIN"));
        }

        let script_dir = lookup("SCRIPT_DIR")
            .filter(|s| !s.is_empty())
            .map(PathBuf::from);

        Ok(Self {
            host,
            port,
            media: MediaConfig {
                media_root,
                media_url,
                script_dir,
            },
            renderer_program,
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
