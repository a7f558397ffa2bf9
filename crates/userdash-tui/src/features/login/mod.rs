//! Login screen: form state, key handling and rendering.

mod render;
mod state;
mod update;

pub use render::render_login;
pub use state::{LoginField, LoginState, PASSWORD_REQUIRED, USERNAME_REQUIRED};
pub use update::{handle_key, handle_paste};
