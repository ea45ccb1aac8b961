use crate::user_input::interface::{UserAction, UserInput};
use std::sync::mpsc;

/// Replays a fixed list of actions, then closes the stream.
pub struct UserInputFake {
    actions: Vec<UserAction>,
}

impl UserInputFake {
    pub fn new(actions: Vec<UserAction>) -> Self {
        Self { actions }
    }
}

impl UserInput for UserInputFake {
    fn events(&self) -> mpsc::Receiver<UserAction> {
        let (tx, rx) = mpsc::channel();
        for action in &self.actions {
            let _ = tx.send(*action);
        }
        rx
    }
}
