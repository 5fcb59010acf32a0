//! Application state and input handling for sift.
//!
//! - [state]: [AppState], the owner of everything the event loop touches
//! - [nav]: [NavState], the directory/filter/selection state machine
//! - [actions]: input modes and the prompt line editor
//! - [keymap]: key bindings from the config
//! - [handlers]: what each action does

pub mod actions;
pub mod keymap;
pub mod nav;
pub mod state;

mod handlers;

pub use actions::{ActionContext, Mode};
pub use keymap::{Action, Keymap};
pub use nav::{GoIn, NavState};
pub use state::{AppState, KeypressResult, LayoutMetrics};
