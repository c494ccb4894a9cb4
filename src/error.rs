use crate::shader::ShaderKind;
use std::ffi::NulError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DemoError {
    #[error("Failed to read shader source {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("{} shader compilation failed:\n{log}", .kind.label())]
    Compile { kind: ShaderKind, log: String },

    #[error("Program linking failed:\n{0}")]
    Link(String),

    #[error("Null byte in shader source: {0}")]
    Nul(#[from] NulError),

    #[error("Failed to create window: {0}")]
    WindowCreate(String),

    #[error("Failed to initialize GL context: {0}")]
    ContextInit(String),

    #[error("Failed to load texture {path}: {source}")]
    TextureLoad {
        path: PathBuf,
        source: image::ImageError,
    },

    #[error("Failed to load config {path}: {message}")]
    Config { path: PathBuf, message: String },

    #[error("Event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compile_error_is_labeled_by_kind() {
        let err = DemoError::Compile {
            kind: ShaderKind::Fragment,
            log: "0:1(1): error: syntax error".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("fragment shader"));
        assert!(msg.contains("syntax error"));
    }

    #[test]
    fn file_read_error_names_the_path() {
        let err = DemoError::FileRead {
            path: PathBuf::from("shaders/missing.vert"),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        };
        assert!(err.to_string().contains("shaders/missing.vert"));
    }
}
