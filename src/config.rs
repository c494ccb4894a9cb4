use crate::error::DemoError;
use crate::transform::TransformParams;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub width: u32,
    pub height: u32,
    pub title: String,
    pub clear_color: [f32; 4],
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            title: "glimmer".to_string(),
            clear_color: [0.207, 0.866, 0.545, 1.0],
        }
    }
}

/// Which of the three demo scenes the driver renders. The scenes share
/// one driver; only the resources they construct differ.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SceneConfig {
    /// No program, no mesh: clear the screen and present.
    Clear,
    Triangle {
        vertex_shader: PathBuf,
        fragment_shader: PathBuf,
    },
    TexturedQuad {
        vertex_shader: PathBuf,
        fragment_shader: PathBuf,
        texture: PathBuf,
    },
}

impl SceneConfig {
    pub fn triangle() -> Self {
        SceneConfig::Triangle {
            vertex_shader: PathBuf::from("shaders/triangle.vert"),
            fragment_shader: PathBuf::from("shaders/triangle.frag"),
        }
    }

    pub fn textured_quad() -> Self {
        SceneConfig::TexturedQuad {
            vertex_shader: PathBuf::from("shaders/quad.vert"),
            fragment_shader: PathBuf::from("shaders/quad.frag"),
            texture: PathBuf::from("assets/checker.png"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    pub window: WindowConfig,
    pub scene: SceneConfig,
    pub transform: TransformParams,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            scene: SceneConfig::triangle(),
            transform: TransformParams::default(),
        }
    }
}

impl DemoConfig {
    /// Parses a TOML config file, falling back to defaults when the file
    /// does not exist. Unreadable or malformed files are an error.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self, DemoError> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }
        let text = fs::read_to_string(path).map_err(|e| DemoError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        toml::from_str(&text).map_err(|e| DemoError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_match_the_demo_window() {
        let config = DemoConfig::default();
        assert_eq!(config.window.width, 800);
        assert_eq!(config.window.height, 600);
        assert!(matches!(config.scene, SceneConfig::Triangle { .. }));
    }

    #[test]
    fn toml_round_trip() {
        let config = DemoConfig {
            scene: SceneConfig::textured_quad(),
            ..Default::default()
        };
        let text = toml::to_string(&config).unwrap();
        let parsed: DemoConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed.window.title, config.window.title);
        match parsed.scene {
            SceneConfig::TexturedQuad { texture, .. } => {
                assert_eq!(texture, PathBuf::from("assets/checker.png"));
            }
            other => panic!("expected textured_quad, got {other:?}"),
        }
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let config = DemoConfig::load_or_default("no/such/glimmer.toml").unwrap();
        assert_eq!(config.window.width, 800);
    }

    #[test]
    fn malformed_file_is_a_config_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "window = \"not a table\"").unwrap();
        match DemoConfig::load_or_default(file.path()) {
            Err(DemoError::Config { .. }) => {}
            other => panic!("expected Config error, got {other:?}"),
        }
    }

    #[test]
    fn default_shader_sources_exist_and_declare_the_uniform() {
        let root = Path::new(env!("CARGO_MANIFEST_DIR"));
        for rel in [
            "shaders/triangle.vert",
            "shaders/triangle.frag",
            "shaders/quad.vert",
            "shaders/quad.frag",
        ] {
            let source = fs::read_to_string(root.join(rel)).unwrap();
            assert!(source.starts_with("#version 330 core"), "{rel}");
            if rel.ends_with(".vert") {
                assert!(source.contains("uniform mat4 transform"), "{rel}");
            }
        }
    }
}
