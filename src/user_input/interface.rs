use crate::image_source::interface::SourceMode;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserAction {
    PickSource(SourceMode),
    Quit,
}

pub trait UserInput {
    /// Actions in the order the user performed them. The stream ends when the input closes.
    fn events(&self) -> std::sync::mpsc::Receiver<UserAction>;
}
