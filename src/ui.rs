//! Terminal UI of sift: a header line, the windowed list body and a status line.

pub mod render;

pub use render::render;
