mod colorize;

pub use colorize::{format_plain, Colorize, ColorizeBookmark};
