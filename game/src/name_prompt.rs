use winit::event::VirtualKeyCode;

use engine::app::InputFrame;

pub const MAX_NAME_LEN: usize = 12;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptResult {
    Submitted(String),
    Cancelled,
}

/// Modal text entry for the end-of-game name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NamePrompt {
    text: String,
}

impl NamePrompt {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn push_char(&mut self, ch: char) {
        if ch.is_control() || self.text.chars().count() >= MAX_NAME_LEN {
            return;
        }
        self.text.push(ch);
    }

    pub fn backspace(&mut self) {
        self.text.pop();
    }

    /// An empty name counts as a cancel.
    pub fn submit(&self) -> PromptResult {
        if self.text.is_empty() {
            PromptResult::Cancelled
        } else {
            PromptResult::Submitted(self.text.clone())
        }
    }

    /// Feeds one frame of keyboard activity. Returns a result once Enter or Escape is hit.
    pub fn apply_frame(&mut self, input: &InputFrame) -> Option<PromptResult> {
        for &ch in &input.text {
            self.push_char(ch);
        }
        for &key in &input.keys_pressed {
            match key {
                VirtualKeyCode::Back => self.backspace(),
                VirtualKeyCode::Return | VirtualKeyCode::NumpadEnter => {
                    return Some(self.submit());
                }
                VirtualKeyCode::Escape => return Some(PromptResult::Cancelled),
                _ => {}
            }
        }
        None
    }
}
