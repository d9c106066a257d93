// UI module for the tip jar terminal client
// Rendering only; all state changes go through App

mod draw;
mod main_view;
mod utils;

pub use draw::draw;
