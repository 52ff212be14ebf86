//! PDF document serialization.

pub mod writer;

pub use writer::write_pdf;
