// Renderer adapters for the frame loop.

pub mod headless;
pub mod shapes;
pub mod text;

pub use headless::HeadlessRenderer;
pub use text::TextRenderer;
