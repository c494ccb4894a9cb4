pub mod config;
pub mod driver;
pub mod error;
pub mod mesh;
pub mod shader;
pub mod texture;
pub mod transform;
pub mod window;

// Re-export commonly used types
pub use config::{DemoConfig, SceneConfig, WindowConfig};
pub use driver::RenderDriver;
pub use error::DemoError;
pub use mesh::{Mesh, MeshData, VertexAttribute};
pub use shader::{Shader, ShaderKind, ShaderProgram};
pub use texture::Texture;
pub use transform::TransformParams;
pub use window::WindowContext;
