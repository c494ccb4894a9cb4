use crate::config::{DemoConfig, SceneConfig};
use crate::error::DemoError;
use crate::mesh::{self, Mesh};
use crate::shader::ShaderProgram;
use crate::texture::Texture;
use crate::transform::TransformParams;
use crate::window::WindowContext;
use log::info;
use std::time::Instant;
use winit::{
    event::{ElementState, Event, KeyEvent, WindowEvent},
    event_loop::EventLoop,
    keyboard::{KeyCode, PhysicalKey},
};

/// The one render driver behind all three demos. Owns every GPU object
/// for the process lifetime; field order puts GPU resources before the
/// context they live in, so drops delete them while the context is
/// still current.
pub struct RenderDriver {
    texture: Option<Texture>,
    mesh: Option<Mesh>,
    program: Option<ShaderProgram>,
    ctx: WindowContext,
    transform: TransformParams,
    clear_color: [f32; 4],
    started: Instant,
}

impl RenderDriver {
    /// Builds the scene's program, mesh and texture up front. Any
    /// construction failure (unreadable source, compile or link error,
    /// undecodable texture) aborts startup.
    pub fn new(ctx: WindowContext, config: &DemoConfig) -> Result<Self, DemoError> {
        let (program, mesh, texture) = match &config.scene {
            SceneConfig::Clear => (None, None, None),
            SceneConfig::Triangle {
                vertex_shader,
                fragment_shader,
            } => {
                let program = ShaderProgram::from_files(vertex_shader, fragment_shader)?;
                (Some(program), Some(Mesh::upload(&mesh::TRIANGLE)), None)
            }
            SceneConfig::TexturedQuad {
                vertex_shader,
                fragment_shader,
                texture,
            } => {
                let mut program = ShaderProgram::from_files(vertex_shader, fragment_shader)?;
                let texture = Texture::from_file(texture, true)?;
                program.set_uniform_1i("tex", 0);
                (
                    Some(program),
                    Some(Mesh::upload(&mesh::TEXTURED_QUAD)),
                    Some(texture),
                )
            }
        };

        Ok(Self {
            texture,
            mesh,
            program,
            ctx,
            transform: config.transform.clone(),
            clear_color: config.window.clear_color,
            started: Instant::now(),
        })
    }

    /// Runs the blocking frame loop until the window is closed or Escape
    /// is pressed. Teardown happens through drops when `self` goes out
    /// of scope after the loop exits.
    pub fn run(mut self, event_loop: EventLoop<()>) -> Result<(), DemoError> {
        event_loop.run(move |event, elwt| match event {
            Event::WindowEvent { event, .. } => match event {
                WindowEvent::CloseRequested => {
                    info!("Close requested, shutting down");
                    elwt.exit();
                }
                WindowEvent::Resized(size) => self.ctx.resize(size),
                WindowEvent::KeyboardInput {
                    event:
                        KeyEvent {
                            physical_key: PhysicalKey::Code(KeyCode::Escape),
                            state: ElementState::Pressed,
                            ..
                        },
                    ..
                } => {
                    info!("Escape pressed, shutting down");
                    elwt.exit();
                }
                WindowEvent::RedrawRequested => self.render_frame(),
                _ => (),
            },
            Event::AboutToWait => {
                self.ctx.window.request_redraw();
            }
            _ => (),
        })?;

        Ok(())
    }

    fn render_frame(&mut self) {
        let [r, g, b, a] = self.clear_color;
        unsafe {
            gl::ClearColor(r, g, b, a);
            gl::Clear(gl::COLOR_BUFFER_BIT);
        }

        if let (Some(program), Some(mesh)) = (self.program.as_mut(), self.mesh.as_ref()) {
            let elapsed = self.started.elapsed().as_secs_f32();
            program.set_used();
            program.set_uniform_mat4("transform", &self.transform.model_matrix(elapsed));

            if let Some(texture) = &self.texture {
                unsafe {
                    gl::ActiveTexture(gl::TEXTURE0);
                }
                texture.bind();
            }

            mesh.draw();
        }

        self.ctx.swap_buffers();
    }
}
