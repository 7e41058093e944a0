//! Pipeline stages for PDF-to-PNG conversion.
//!
//! Each submodule implements exactly one step. Stages run strictly in
//! sequence for a single document; render → encode → write repeats once per
//! selected page, in page order.
//!
//! ## Data Flow
//!
//! ```text
//! input ──▶ load ──▶ select ──▶ render ──▶ encode ──▶ write
//! (path/bytes) (engine) (config)  (surface)  (PNG)     (disk/memory)
//! ```
//!
//! 1. [`input`]  — read a path into memory, or pass a buffer through
//! 2. [`load`]   — build load parameters and open the document
//! 3. page selection lives in [`crate::config::PageSelection::resolve`]
//! 4. [`render`] — viewport, surface allocation, engine render
//! 5. [`encode`] — surface → PNG bytes
//! 6. [`write`]  — deterministic naming and optional persistence

pub mod encode;
pub mod input;
pub mod load;
pub mod render;
pub mod write;
