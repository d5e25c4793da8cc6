//! Entry point
//!
//! [`Pdfium`] binds an engine implementation to a display configuration and
//! opens [`Document`] sessions against it. Opening is the only fallible
//! session operation; see [`crate::document::OpenError`] for the taxonomy.

use std::fs::File;
use std::sync::Arc;

use crate::document::{Document, DocumentSource, Result, Shared};
use crate::engine::{lock_engine, EngineBindings};

/// Session layer configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Resolution used for pixel metrics and rendering.
    pub dpi: u32,
}

impl Default for Config {
    fn default() -> Self {
        // PDF point resolution; callers with a real display pass its density.
        Self { dpi: 72 }
    }
}

/// The engine entry point: opens document sessions.
///
/// All sessions opened from one `Pdfium` share its bindings and dpi. The
/// serialization gate is process-wide, so even sessions from separate
/// `Pdfium` instances never race inside the engine.
pub struct Pdfium {
    shared: Arc<Shared>,
}

impl Pdfium {
    pub fn new(bindings: Arc<dyn EngineBindings>, config: Config) -> Self {
        tracing::debug!(dpi = config.dpi, "pdfium session layer initialized");
        Self {
            shared: Arc::new(Shared {
                bindings,
                dpi: config.dpi,
            }),
        }
    }

    /// Opens a document backed by an owned file descriptor.
    ///
    /// The file is consumed: on success it lives inside the session until
    /// close (the engine reads from it lazily), on failure it is dropped
    /// here and the descriptor is released.
    pub fn open_file(&self, file: File, password: Option<&str>) -> Result<Document> {
        let handle = {
            let _gate = lock_engine();
            self.shared.bindings.open(&file, password)?
        };
        Ok(Document::new(
            self.shared.clone(),
            handle,
            DocumentSource::File(file),
        ))
    }

    /// Opens a document backed by an in-memory buffer.
    ///
    /// The buffer lives inside the session until close; the engine reads
    /// from it lazily.
    pub fn open_bytes(&self, data: Vec<u8>, password: Option<&str>) -> Result<Document> {
        let data = Arc::new(data);
        let handle = {
            let _gate = lock_engine();
            self.shared.bindings.open_bytes(&data, password)?
        };
        Ok(Document::new(
            self.shared.clone(),
            handle,
            DocumentSource::Bytes(data),
        ))
    }
}
