use gl::types::*;
use std::mem;
use std::ptr;

/// One interleaved vertex attribute: shader location plus float component
/// count. Offsets and stride are derived from the slice order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VertexAttribute {
    pub location: GLuint,
    pub components: GLint,
}

/// A fixed mesh: interleaved vertex floats, optional indices, and the
/// attribute layout describing each vertex. The demo primitives are
/// process-wide constants handed to the render driver at construction.
#[derive(Debug, Clone, Copy)]
pub struct MeshData {
    pub vertices: &'static [f32],
    pub indices: &'static [u32],
    pub layout: &'static [VertexAttribute],
}

impl MeshData {
    pub fn floats_per_vertex(&self) -> usize {
        self.layout.iter().map(|a| a.components as usize).sum()
    }

    pub fn stride_bytes(&self) -> usize {
        self.floats_per_vertex() * mem::size_of::<f32>()
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / self.floats_per_vertex()
    }

    pub fn is_indexed(&self) -> bool {
        !self.indices.is_empty()
    }
}

/// Plain colored triangle, drawn non-indexed.
pub const TRIANGLE: MeshData = MeshData {
    vertices: &[
        // positions        // colors
        -0.5, -0.5, 0.0, 1.0, 0.0, 0.0, //
        0.5, -0.5, 0.0, 0.0, 1.0, 0.0, //
        0.0, 0.5, 0.0, 0.0, 0.0, 1.0,
    ],
    indices: &[],
    layout: &[
        VertexAttribute {
            location: 0,
            components: 3,
        },
        VertexAttribute {
            location: 1,
            components: 3,
        },
    ],
};

/// Quad with texture coordinates, drawn as two indexed triangles.
pub const TEXTURED_QUAD: MeshData = MeshData {
    vertices: &[
        // positions        // texture coordinates
        -0.5, -0.5, 0.0, 0.0, 0.0, //
        0.5, 0.5, 0.0, 1.0, 1.0, //
        0.5, -0.5, 0.0, 1.0, 0.0, //
        -0.5, 0.5, 0.0, 0.0, 1.0,
    ],
    indices: &[0, 1, 2, 0, 1, 3],
    layout: &[
        VertexAttribute {
            location: 0,
            components: 3,
        },
        VertexAttribute {
            location: 1,
            components: 2,
        },
    ],
};

/// GPU-side copy of a `MeshData`: VAO + VBO + optional EBO, all deleted
/// on drop in reverse-acquisition order.
pub struct Mesh {
    vao: GLuint,
    vbo: GLuint,
    ebo: GLuint,
    vertex_count: GLsizei,
    index_count: GLsizei,
}

impl Mesh {
    pub fn upload(data: &MeshData) -> Self {
        let mut vao = 0;
        let mut vbo = 0;
        let mut ebo = 0;

        unsafe {
            gl::GenVertexArrays(1, &mut vao);
            gl::GenBuffers(1, &mut vbo);

            gl::BindVertexArray(vao);
            gl::BindBuffer(gl::ARRAY_BUFFER, vbo);
            gl::BufferData(
                gl::ARRAY_BUFFER,
                (data.vertices.len() * mem::size_of::<f32>()) as isize,
                data.vertices.as_ptr() as *const _,
                gl::STATIC_DRAW,
            );

            if data.is_indexed() {
                gl::GenBuffers(1, &mut ebo);
                gl::BindBuffer(gl::ELEMENT_ARRAY_BUFFER, ebo);
                gl::BufferData(
                    gl::ELEMENT_ARRAY_BUFFER,
                    (data.indices.len() * mem::size_of::<u32>()) as isize,
                    data.indices.as_ptr() as *const _,
                    gl::STATIC_DRAW,
                );
            }

            let stride = data.stride_bytes() as GLsizei;
            let mut offset = 0usize;
            for attribute in data.layout {
                gl::VertexAttribPointer(
                    attribute.location,
                    attribute.components,
                    gl::FLOAT,
                    gl::FALSE,
                    stride,
                    offset as *const _,
                );
                gl::EnableVertexAttribArray(attribute.location);
                offset += attribute.components as usize * mem::size_of::<f32>();
            }

            gl::BindVertexArray(0);
        }

        Self {
            vao,
            vbo,
            ebo,
            vertex_count: data.vertex_count() as GLsizei,
            index_count: data.indices.len() as GLsizei,
        }
    }

    pub fn draw(&self) {
        unsafe {
            gl::BindVertexArray(self.vao);
            if self.ebo != 0 {
                gl::DrawElements(gl::TRIANGLES, self.index_count, gl::UNSIGNED_INT, ptr::null());
            } else {
                gl::DrawArrays(gl::TRIANGLES, 0, self.vertex_count);
            }
            gl::BindVertexArray(0);
        }
    }
}

impl Drop for Mesh {
    fn drop(&mut self) {
        unsafe {
            if self.ebo != 0 {
                gl::DeleteBuffers(1, &self.ebo);
            }
            gl::DeleteBuffers(1, &self.vbo);
            gl::DeleteVertexArrays(1, &self.vao);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn triangle_layout() {
        assert_eq!(TRIANGLE.floats_per_vertex(), 6);
        assert_eq!(TRIANGLE.stride_bytes(), 24);
        assert_eq!(TRIANGLE.vertex_count(), 3);
        assert!(!TRIANGLE.is_indexed());
    }

    #[test]
    fn quad_layout() {
        assert_eq!(TEXTURED_QUAD.floats_per_vertex(), 5);
        assert_eq!(TEXTURED_QUAD.stride_bytes(), 20);
        assert_eq!(TEXTURED_QUAD.vertex_count(), 4);
        assert_eq!(TEXTURED_QUAD.indices.len(), 6);
    }

    #[test]
    fn quad_indices_are_in_range() {
        let count = TEXTURED_QUAD.vertex_count() as u32;
        assert!(TEXTURED_QUAD.indices.iter().all(|&i| i < count));
    }
}
