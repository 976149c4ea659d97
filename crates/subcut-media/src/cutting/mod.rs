//! Cut-plan construction and rendering.
//!
//! `keep` holds the pure keep-range pipeline (merge, pad, silence filter),
//! `graph` turns a finished plan into an FFmpeg filter graph, and `render`
//! hands the graph to the transcoder.

pub mod graph;
pub mod keep;
pub mod render;
