// Presentation layer - markup adapters for projection output
pub mod svg;
