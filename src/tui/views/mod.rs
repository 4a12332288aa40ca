mod timer;

pub use timer::{draw_compact, draw_timer};
