use axum::http::StatusCode;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    #[serde(default)]
    pub prompt: Option<String>,
}

/// Outcome of a render, tagged by `status` on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum GenerateResponse {
    Success {
        video_url: String,
    },
    /// Renderer exited non-zero; its output is passed through untouched.
    Error {
        error: String,
        stdout: String,
        stderr: String,
    },
}

impl GenerateResponse {
    pub fn status_code(&self) -> StatusCode {
        match self {
            GenerateResponse::Success { .. } => StatusCode::OK,
            GenerateResponse::Error { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_wire_shapes() {
        let success = GenerateResponse::Success {
            video_url: "/media/scene_1.mp4".into(),
        };
        assert_eq!(
            serde_json::to_value(&success).unwrap(),
            json!({ "status": "success", "video_url": "/media/scene_1.mp4" })
        );
        assert_eq!(success.status_code(), StatusCode::OK);

        let failure = GenerateResponse::Error {
            error: "Manim failed to generate the video.".into(),
            stdout: "out".into(),
            stderr: "err".into(),
        };
        assert_eq!(
            serde_json::to_value(&failure).unwrap(),
            json!({
                "status": "error",
                "error": "Manim failed to generate the video.",
                "stdout": "out",
                "stderr": "err",
            })
        );
        assert_eq!(failure.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_request_prompt_is_optional() {
        let req: GenerateRequest = serde_json::from_str("{}").unwrap();
        assert!(req.prompt.is_none());

        let req: GenerateRequest = serde_json::from_str(r#"{"prompt": null}"#).unwrap();
        assert!(req.prompt.is_none());

        let req: GenerateRequest = serde_json::from_str(r#"{"prompt": "circle"}"#).unwrap();
        assert_eq!(req.prompt.as_deref(), Some("circle"));
    }
}
