use anyhow::Result;
use glimmer::{DemoConfig, RenderDriver, SceneConfig, WindowContext};
use log::{info, LevelFilter};
use simple_logger::SimpleLogger;
use winit::event_loop::EventLoop;

fn main() -> Result<()> {
    SimpleLogger::new().with_level(LevelFilter::Info).init()?;
    info!("Starting clear-only demo");

    let config = DemoConfig {
        scene: SceneConfig::Clear,
        ..Default::default()
    };

    let event_loop = EventLoop::new()?;
    let ctx = WindowContext::new(&event_loop, &config.window)?;
    let driver = RenderDriver::new(ctx, &config)?;
    driver.run(event_loop)?;

    Ok(())
}
