// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// Attach.
pub mod ansi_segmenter;
pub mod cursor_tracker;
pub mod diff_renderer;
pub mod frame_state;
pub mod line_geometry;

// Re-export.
pub use ansi_segmenter::*;
pub use cursor_tracker::*;
pub use diff_renderer::*;
pub use frame_state::*;
pub use line_geometry::*;
