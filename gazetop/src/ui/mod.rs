//! UI module root: exposes drawing functions for individual panels.

pub mod chart;
pub mod footer;
pub mod header;
pub mod theme;
pub mod util;
