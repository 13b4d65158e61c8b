// Layout: abstract document tree → positioned drawing instructions.
// Pure and CPU-bound; callers on the async side run it inside tokio::task::spawn_blocking.

pub mod font_metrics;
pub mod formatter;
pub mod instructions;
pub mod profile;
pub mod text;

// Re-export the public API consumed by other modules (render backends, handlers).
pub use formatter::render;
pub use instructions::DrawInstructions;
pub use profile::{ProfileKind, RenderProfile};
