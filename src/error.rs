use std::path::PathBuf;

use thiserror::Error;

pub type Result<T, E = DemoError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum DemoError {
    #[error("failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode image {path:?}: {source}")]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("failed to load model {path:?}: {source}")]
    Model {
        path: PathBuf,
        #[source]
        source: gltf::Error,
    },

    #[error("model {path:?} has no triangle primitives")]
    EmptyModel { path: PathBuf },

    #[error("shader `{name}` failed to compile: {message}")]
    Shader { name: String, message: String },

    #[error("render pipeline `{label}` could not be created: {message}")]
    Pipeline { label: String, message: String },

    #[error("failed to create window: {0}")]
    Window(#[from] winit::error::OsError),

    #[error("failed to create surface: {0}")]
    Surface(#[from] wgpu::CreateSurfaceError),

    #[error("no suitable graphics adapter: {0}")]
    Adapter(#[from] wgpu::RequestAdapterError),

    #[error("failed to create device: {0}")]
    Device(#[from] wgpu::RequestDeviceError),

    #[error("event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),
}

impl DemoError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shader_error_names_the_program() {
        let err = DemoError::Shader {
            name: "lit".into(),
            message: "unknown identifier `foo`".into(),
        };
        let text = err.to_string();
        assert!(text.contains("`lit`"));
        assert!(text.contains("unknown identifier"));
    }

    #[test]
    fn io_error_keeps_path_and_source() {
        let err = DemoError::io(
            "Textures/brick.png",
            std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        );
        assert!(err.to_string().contains("brick.png"));
        assert!(std::error::Error::source(&err).is_some());
    }
}
