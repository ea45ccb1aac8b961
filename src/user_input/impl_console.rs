use crate::image_source::interface::SourceMode;
use crate::library::logger::interface::Logger;
use crate::user_input::interface::{UserAction, UserInput};
use std::io::BufRead;
use std::sync::mpsc;
use std::sync::Arc;

pub const HELP: &str = "[c] camera  [l] photo library  [q] quit";

pub struct UserInputConsole {
    logger: Arc<dyn Logger + Send + Sync>,
}

impl UserInputConsole {
    pub fn new(logger: Arc<dyn Logger + Send + Sync>) -> Self {
        Self {
            logger: logger.with_namespace("user_input"),
        }
    }
}

pub fn parse_command(line: &str) -> Option<UserAction> {
    match line.trim().to_lowercase().as_str() {
        "c" | "camera" => Some(UserAction::PickSource(SourceMode::Camera)),
        "l" | "library" => Some(UserAction::PickSource(SourceMode::Library)),
        "q" | "quit" | "exit" => Some(UserAction::Quit),
        _ => None,
    }
}

impl UserInput for UserInputConsole {
    fn events(&self) -> mpsc::Receiver<UserAction> {
        let (tx, rx) = mpsc::channel();
        let logger = self.logger.clone();

        std::thread::spawn(move || {
            for line in std::io::stdin().lock().lines() {
                let Ok(line) = line else { break };
                if line.trim().is_empty() {
                    continue;
                }

                match parse_command(&line) {
                    Some(action) => {
                        if tx.send(action).is_err() {
                            return;
                        }
                    }
                    None => {
                        let _ = logger.info(&format!("Unknown command {:?}. {}", line.trim(), HELP));
                    }
                }
            }

            // stdin closed
            let _ = tx.send(UserAction::Quit);
        });

        rx
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_command() {
        assert_eq!(
            parse_command("c"),
            Some(UserAction::PickSource(SourceMode::Camera))
        );
        assert_eq!(
            parse_command(" Library \n"),
            Some(UserAction::PickSource(SourceMode::Library))
        );
        assert_eq!(parse_command("q"), Some(UserAction::Quit));
        assert_eq!(parse_command("x"), None);
    }
}
