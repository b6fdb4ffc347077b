mod html;

pub use html::*;
