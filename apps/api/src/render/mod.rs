//! Document backends turn drawing instructions into output bytes.
//!
//! Backends are synchronous and CPU-bound. The export controller is the only
//! caller on the async side and runs them inside `spawn_blocking`.
use std::io::Write;

use thiserror::Error;

use crate::layout::DrawInstructions;

pub mod pdf;

pub use pdf::PdfBackend;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("PDF library error: {0}")]
    Pdf(#[from] lopdf::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub trait DocumentBackend: Send + Sync {
    /// Short backend name, used in logs.
    fn name(&self) -> &'static str;

    /// MIME type of the produced bytes.
    fn content_type(&self) -> &'static str;

    /// Writes the finished document into `out`.
    fn produce(
        &self,
        instructions: &DrawInstructions,
        out: &mut dyn Write,
    ) -> Result<(), RenderError>;

    fn produce_vec(&self, instructions: &DrawInstructions) -> Result<Vec<u8>, RenderError> {
        let mut buf = Vec::new();
        self.produce(instructions, &mut buf)?;
        Ok(buf)
    }
}
