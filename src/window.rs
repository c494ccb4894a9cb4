use crate::config::WindowConfig;
use crate::error::DemoError;
use glutin::{
    config::ConfigTemplateBuilder,
    context::{ContextApi, ContextAttributesBuilder, GlProfile, PossiblyCurrentContext, Version},
    display::{GetGlDisplay, GlDisplay},
    prelude::*,
    surface::{Surface, WindowSurface},
};
use glutin_winit::{DisplayBuilder, GlWindow};
use log::{error, info};
use raw_window_handle::HasRawWindowHandle;
use std::{ffi::CString, num::NonZeroU32};
use winit::{
    dpi::{LogicalSize, PhysicalSize},
    event_loop::EventLoop,
    window::{Window, WindowBuilder},
};

/// Window plus current GL context and surface. Created once at startup;
/// torn down by winit/glutin when dropped, after every GPU object that
/// lives in the context.
pub struct WindowContext {
    pub window: Window,
    gl_context: PossiblyCurrentContext,
    gl_surface: Surface<WindowSurface>,
}

impl WindowContext {
    pub fn new(event_loop: &EventLoop<()>, config: &WindowConfig) -> Result<Self, DemoError> {
        let window_builder = WindowBuilder::new()
            .with_title(&config.title)
            .with_inner_size(LogicalSize::new(config.width, config.height));

        let template = ConfigTemplateBuilder::new().with_alpha_size(8);

        let display_builder = DisplayBuilder::new().with_window_builder(Some(window_builder));

        let (window, gl_config) = display_builder
            .build(event_loop, template, |configs| {
                configs
                    .reduce(|accum, config| {
                        if config.num_samples() > accum.num_samples() {
                            config
                        } else {
                            accum
                        }
                    })
                    .unwrap()
            })
            .map_err(|e| DemoError::WindowCreate(e.to_string()))?;

        let window = window.ok_or_else(|| {
            DemoError::WindowCreate("display builder produced no window".to_string())
        })?;
        let raw_window_handle = window.raw_window_handle();

        let context_attributes = ContextAttributesBuilder::new()
            .with_context_api(ContextApi::OpenGl(Some(Version::new(3, 3))))
            .with_profile(GlProfile::Core)
            .build(Some(raw_window_handle));

        let gl_display = gl_config.display();

        let gl_context = unsafe {
            gl_display
                .create_context(&gl_config, &context_attributes)
                .map_err(|e| DemoError::ContextInit(e.to_string()))?
        };

        let attrs = window.build_surface_attributes(<_>::default());
        let gl_surface = unsafe {
            gl_display
                .create_window_surface(&gl_config, &attrs)
                .map_err(|e| DemoError::ContextInit(e.to_string()))?
        };

        let gl_context = gl_context
            .make_current(&gl_surface)
            .map_err(|e| DemoError::ContextInit(e.to_string()))?;

        // Load OpenGL function pointers
        gl::load_with(|symbol| {
            let symbol = CString::new(symbol).unwrap();
            gl_display.get_proc_address(symbol.as_c_str()) as *const _
        });

        unsafe {
            gl::Viewport(0, 0, config.width as i32, config.height as i32);
        }

        info!(
            "Created {}x{} window with a GL 3.3 core context",
            config.width, config.height
        );

        Ok(Self {
            window,
            gl_context,
            gl_surface,
        })
    }

    pub fn resize(&self, size: PhysicalSize<u32>) {
        if let (Some(width), Some(height)) = (NonZeroU32::new(size.width), NonZeroU32::new(size.height)) {
            self.gl_surface.resize(&self.gl_context, width, height);
            unsafe {
                gl::Viewport(0, 0, size.width as i32, size.height as i32);
            }
        }
    }

    pub fn swap_buffers(&self) {
        if let Err(e) = self.gl_surface.swap_buffers(&self.gl_context) {
            error!("Buffer swap failed: {}", e);
        }
    }
}
