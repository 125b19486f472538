//! bandwise-report — HTML export of response logs.

pub mod html;
