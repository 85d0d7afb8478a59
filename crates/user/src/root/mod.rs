use std::ops::Deref;

use crate::jwt::TokenConfig;

mod login;
mod password;
mod register;
mod role;

pub use login::LoginInput;
pub use register::{RegisterInput, UserCreated};
pub use password::SetPasswordInput;

#[derive(Clone)]
pub struct Command {
    state: foodgram_shared::State,
    token: TokenConfig,
}

impl Deref for Command {
    type Target = foodgram_shared::State;

    fn deref(&self) -> &Self::Target {
        &self.state
    }
}

impl Command {
    pub fn new(state: foodgram_shared::State, token: TokenConfig) -> Self {
        Self { state, token }
    }
}
