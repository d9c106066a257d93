// module declaration
pub mod core;
pub mod actions;
pub mod refresh;
pub mod ui_state;

// export App and related types
pub use core::App;
pub use core::{InputMode, MessageType};
