use crate::error::DemoError;
use gl::types::*;
use glam::Mat4;
use log::warn;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::ffi::CString;
use std::fs;
use std::path::Path;
use std::ptr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShaderKind {
    Vertex,
    Fragment,
}

impl ShaderKind {
    pub fn label(self) -> &'static str {
        match self {
            ShaderKind::Vertex => "vertex",
            ShaderKind::Fragment => "fragment",
        }
    }

    fn gl_enum(self) -> GLenum {
        match self {
            ShaderKind::Vertex => gl::VERTEX_SHADER,
            ShaderKind::Fragment => gl::FRAGMENT_SHADER,
        }
    }
}

/// One vertex or fragment shader object. Lifecycle:
/// `from_file` -> `compile` -> `check_status` -> `attach_to` -> drop.
/// Dropping is valid any time after the program has been linked.
pub struct Shader {
    id: GLuint,
    kind: ShaderKind,
}

impl Shader {
    /// Reads the whole source file and stages it on a fresh shader object.
    /// Fails before any GL object is allocated if the file is unreadable.
    pub fn from_file<P: AsRef<Path>>(path: P, kind: ShaderKind) -> Result<Self, DemoError> {
        let source = fs::read_to_string(path.as_ref()).map_err(|source| DemoError::FileRead {
            path: path.as_ref().to_path_buf(),
            source,
        })?;
        Self::from_source(&source, kind)
    }

    pub fn from_source(source: &str, kind: ShaderKind) -> Result<Self, DemoError> {
        let c_source = CString::new(source.as_bytes())?;

        let id = unsafe { gl::CreateShader(kind.gl_enum()) };
        unsafe {
            gl::ShaderSource(id, 1, &c_source.as_ptr(), ptr::null());
        }

        Ok(Self { id, kind })
    }

    pub fn compile(&self) {
        unsafe {
            gl::CompileShader(self.id);
        }
    }

    /// Queries the compile status. On failure the info log is fetched,
    /// reported at warn level labeled by shader kind, and returned as a
    /// typed error so the caller decides whether to abort.
    pub fn check_status(&self) -> Result<(), DemoError> {
        let mut success = 1;
        unsafe {
            gl::GetShaderiv(self.id, gl::COMPILE_STATUS, &mut success);
        }

        if success == 0 {
            let mut len = 0;
            unsafe {
                gl::GetShaderiv(self.id, gl::INFO_LOG_LENGTH, &mut len);
            }

            let buffer = whitespace_cstring_with_len(len as usize);
            unsafe {
                gl::GetShaderInfoLog(self.id, len, ptr::null_mut(), buffer.as_ptr() as *mut GLchar);
            }

            let log = buffer.to_string_lossy().into_owned();
            warn!("{} shader compilation failed:\n{}", self.kind.label(), log);
            return Err(DemoError::Compile {
                kind: self.kind,
                log,
            });
        }

        Ok(())
    }

    pub fn attach_to(&self, program: GLuint) {
        unsafe {
            gl::AttachShader(program, self.id);
        }
    }

    pub fn id(&self) -> GLuint {
        self.id
    }

    pub fn kind(&self) -> ShaderKind {
        self.kind
    }
}

impl Drop for Shader {
    fn drop(&mut self) {
        unsafe {
            gl::DeleteShader(self.id);
        }
    }
}

pub struct ShaderProgram {
    id: GLuint,
    uniforms: HashMap<String, GLint>,
}

impl ShaderProgram {
    pub fn from_files<P: AsRef<Path>>(vertex_path: P, fragment_path: P) -> Result<Self, DemoError> {
        let vertex = Shader::from_file(vertex_path, ShaderKind::Vertex)?;
        let fragment = Shader::from_file(fragment_path, ShaderKind::Fragment)?;
        Self::link(vertex, fragment)
    }

    pub fn from_sources(vertex_source: &str, fragment_source: &str) -> Result<Self, DemoError> {
        let vertex = Shader::from_source(vertex_source, ShaderKind::Vertex)?;
        let fragment = Shader::from_source(fragment_source, ShaderKind::Fragment)?;
        Self::link(vertex, fragment)
    }

    /// Compiles both units, links them into a program and releases them.
    /// Linking copies what it needs, so the unit objects are deleted here.
    pub fn link(vertex: Shader, fragment: Shader) -> Result<Self, DemoError> {
        vertex.compile();
        fragment.compile();
        vertex.check_status()?;
        fragment.check_status()?;

        let id = unsafe { gl::CreateProgram() };
        vertex.attach_to(id);
        fragment.attach_to(id);
        unsafe {
            gl::LinkProgram(id);
        }
        drop(vertex);
        drop(fragment);

        let mut success = 1;
        unsafe {
            gl::GetProgramiv(id, gl::LINK_STATUS, &mut success);
        }

        if success == 0 {
            let mut len = 0;
            unsafe {
                gl::GetProgramiv(id, gl::INFO_LOG_LENGTH, &mut len);
            }

            let buffer = whitespace_cstring_with_len(len as usize);
            unsafe {
                gl::GetProgramInfoLog(id, len, ptr::null_mut(), buffer.as_ptr() as *mut GLchar);
                gl::DeleteProgram(id);
            }

            let log = buffer.to_string_lossy().into_owned();
            warn!("Program linking failed:\n{}", log);
            return Err(DemoError::Link(log));
        }

        Ok(Self {
            id,
            uniforms: HashMap::new(),
        })
    }

    pub fn id(&self) -> GLuint {
        self.id
    }

    pub fn set_used(&self) {
        unsafe {
            gl::UseProgram(self.id);
        }
    }

    fn get_uniform_location(&mut self, name: &str) -> GLint {
        if let Some(location) = self.uniforms.get(name) {
            return *location;
        }

        let cname = CString::new(name).unwrap();
        let location = unsafe { gl::GetUniformLocation(self.id, cname.as_ptr()) };

        if location == -1 {
            warn!("Uniform '{}' not found in shader", name);
        }

        self.uniforms.insert(name.to_string(), location);
        location
    }

    pub fn set_uniform_1i(&mut self, name: &str, value: i32) {
        self.set_used();
        let location = self.get_uniform_location(name);
        unsafe {
            gl::Uniform1i(location, value);
        }
    }

    pub fn set_uniform_mat4(&mut self, name: &str, mat: &Mat4) {
        self.set_used();
        let location = self.get_uniform_location(name);
        let cols = mat.to_cols_array();
        unsafe {
            gl::UniformMatrix4fv(location, 1, gl::FALSE, cols.as_ptr());
        }
    }
}

impl Drop for ShaderProgram {
    fn drop(&mut self) {
        unsafe {
            gl::DeleteProgram(self.id);
        }
    }
}

fn whitespace_cstring_with_len(len: usize) -> CString {
    let mut buffer: Vec<u8> = Vec::with_capacity(len + 1);
    buffer.extend([b' '].iter().cycle().take(len));
    unsafe { CString::from_vec_unchecked(buffer) }
}

#[cfg(test)]
mod tests {
    use super::*;

    // These run without a GL context: both failure paths bail out before
    // the first GL call is made.

    #[test]
    fn missing_file_fails_without_allocating() {
        match Shader::from_file("shaders/does_not_exist.vert", ShaderKind::Vertex) {
            Err(DemoError::FileRead { path, .. }) => {
                assert_eq!(path, Path::new("shaders/does_not_exist.vert"));
            }
            Err(other) => panic!("expected FileRead, got {other:?}"),
            Ok(_) => panic!("missing file must fail"),
        }
    }

    #[test]
    fn interior_nul_is_rejected() {
        match Shader::from_source("void main() {\0}", ShaderKind::Fragment) {
            Err(err) => assert!(matches!(err, DemoError::Nul(_))),
            Ok(_) => panic!("interior NUL must fail"),
        }
    }

    #[test]
    fn kind_labels() {
        assert_eq!(ShaderKind::Vertex.label(), "vertex");
        assert_eq!(ShaderKind::Fragment.label(), "fragment");
    }
}
