//! Studio module - Style state, prompt and image orchestration, sessions

pub mod image;
pub mod prompt;
pub mod registry;
pub mod session;
pub mod state;
pub mod style;
pub mod view;

pub use registry::StudioRegistry;
pub use session::StudioSession;
pub use state::StudioState;
pub use style::{
    AspectRatio, CameraPerspective, LightingStyle, StyleOptions, StyleSelection, StyleUpdate,
};
pub use view::{ResultPanel, StudioView};
