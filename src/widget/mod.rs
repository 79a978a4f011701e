//! Widget snapshot: the self-contained pay state handed to the display surface.

pub mod sink;
pub mod snapshot;
pub mod timeline;
