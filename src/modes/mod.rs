pub mod play;

pub use play::{PanelEngine, PlayMode};
