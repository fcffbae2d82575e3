use crate::env::Environment;
use crate::model::Timeline;

/// External image backend for timeline exports
///
/// Only timeline exports carry image bytes; event, period, and relationship
/// exports are JSON-only and never touch the renderer. A backend failure is
/// reported as a plain message and surfaced to the caller as a runtime
/// diagnostic, it does not abort entity-graph evaluation that already
/// happened.
pub trait Renderer {
    /// Render a timeline to encoded image bytes (PNG by convention)
    fn render_timeline(&self, timeline: &Timeline, env: &Environment) -> Result<Vec<u8>, String>;
}

/// Renderer that produces no image bytes
///
/// The default backend for headless runs and tests: timeline exports still
/// produce their JSON payload, with an empty image.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn render_timeline(&self, _timeline: &Timeline, _env: &Environment) -> Result<Vec<u8>, String> {
        Ok(Vec::new())
    }
}
