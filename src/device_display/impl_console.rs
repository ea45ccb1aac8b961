use crate::device_display::interface::{DeviceDisplay, Screen};
use crate::user_input::impl_console::HELP;
use std::error::Error;

pub struct DeviceDisplayConsole {
    width: usize,
    last: Option<Screen>,
}

impl DeviceDisplayConsole {
    pub fn new(width: usize) -> Self {
        Self {
            width: width.max(20),
            last: None,
        }
    }

    fn frame(&self, screen: &Screen) -> String {
        let inner = self.width - 4;
        let rule = "─".repeat(self.width - 2);
        let mut out = String::new();

        out.push_str(&format!("┌{}┐\n", rule));
        let title = if screen.title.is_empty() {
            "Flower Lens"
        } else {
            screen.title.as_str()
        };
        for line in wrap(title, inner) {
            out.push_str(&row(&line, inner));
        }
        for line in wrap(&screen.status, inner) {
            out.push_str(&row(&line, inner));
        }

        if !screen.description.is_empty() || !screen.thumbnail_url.is_empty() {
            out.push_str(&format!("├{}┤\n", rule));
            for paragraph in screen.description.lines() {
                for line in wrap(paragraph, inner) {
                    out.push_str(&row(&line, inner));
                }
            }
            if !screen.thumbnail_url.is_empty() {
                for line in wrap(&format!("Image: {}", screen.thumbnail_url), inner) {
                    out.push_str(&row(&line, inner));
                }
            }
        }

        out.push_str(&format!("└{}┘\n", rule));
        out.push_str(HELP);
        out
    }
}

fn row(text: &str, inner: usize) -> String {
    let pad = inner.saturating_sub(text.chars().count());
    format!("│ {}{} │\n", text, " ".repeat(pad))
}

/// Greedy word wrap; words longer than `width` are split.
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();

    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();
        while word.len() > width {
            if !line.is_empty() {
                lines.push(std::mem::take(&mut line));
            }
            lines.push(word.drain(..width).collect());
        }
        let word: String = word.into_iter().collect();
        if word.is_empty() {
            continue;
        }

        if line.is_empty() {
            line = word;
        } else if line.chars().count() + 1 + word.chars().count() <= width {
            line.push(' ');
            line.push_str(&word);
        } else {
            lines.push(std::mem::replace(&mut line, word));
        }
    }

    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

impl DeviceDisplay for DeviceDisplayConsole {
    fn init(&mut self) -> Result<(), Box<dyn Error + Send + Sync>> {
        let screen = Screen::default();
        println!("{}", self.frame(&screen));
        self.last = Some(screen);
        Ok(())
    }

    fn show(&mut self, screen: &Screen) -> Result<(), Box<dyn Error + Send + Sync>> {
        if self.last.as_ref() == Some(screen) {
            return Ok(());
        }
        println!("{}", self.frame(screen));
        self.last = Some(screen.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_breaks_on_words() {
        assert_eq!(
            wrap("A daisy is a small flower", 10),
            vec!["A daisy is", "a small", "flower"]
        );
    }

    #[test]
    fn test_wrap_splits_long_words() {
        assert_eq!(wrap("abcdefghij", 4), vec!["abcd", "efgh", "ij"]);
        assert!(wrap("   ", 4).is_empty());
    }

    #[test]
    fn test_frame_contains_every_field() {
        let display = DeviceDisplayConsole::new(40);
        let frame = display.frame(&Screen {
            title: "Daisy".to_string(),
            status: String::new(),
            description: "A daisy is...".to_string(),
            thumbnail_url: "http://x/daisy.jpg".to_string(),
            photo: None,
        });

        assert!(frame.contains("│ Daisy "));
        assert!(frame.contains("A daisy is..."));
        assert!(frame.contains("Image: http://x/daisy.jpg"));
        for line in frame.lines().filter(|l| l.starts_with('│')) {
            assert_eq!(line.chars().count(), 40);
        }
    }
}
