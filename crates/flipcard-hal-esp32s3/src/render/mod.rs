pub mod screens;

use flipcard_core::render::Screen;

use crate::platform::FrameBuffer;

pub use screens::ScreenRenderer;

pub trait FrameRenderer {
    fn render(&mut self, screen: Screen<'_>, frame: &mut FrameBuffer);
}
