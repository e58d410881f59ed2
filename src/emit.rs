use std::io::Write;

use thiserror::Error;

use crate::parser::Endpoint;

#[derive(Debug, Error)]
pub enum EmitError {
    #[error("failed to serialize catalog: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to write catalog: {0}")]
    Io(#[from] std::io::Error),
}

/// Receives the final catalog.
pub trait Emitter {
    fn emit(&mut self, endpoints: &[Endpoint]) -> Result<(), EmitError>;
}

/// Writes the catalog as a JSON array followed by a newline.
pub struct JsonEmitter<W> {
    out: W,
    pretty: bool,
}

impl<W: Write> JsonEmitter<W> {
    pub fn new(out: W, pretty: bool) -> Self {
        Self { out, pretty }
    }
}

impl<W: Write> Emitter for JsonEmitter<W> {
    fn emit(&mut self, endpoints: &[Endpoint]) -> Result<(), EmitError> {
        if self.pretty {
            serde_json::to_writer_pretty(&mut self.out, endpoints)?;
        } else {
            serde_json::to_writer(&mut self.out, endpoints)?;
        }
        writeln!(self.out)?;
        self.out.flush()?;
        Ok(())
    }
}

// ── Tests ──
