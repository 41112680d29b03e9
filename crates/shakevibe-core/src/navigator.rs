//! [`Navigator`] – back-stack of [`Screen`]s rooted at [`Screen::Main`].

use shakevibe_types::Screen;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct Navigator {
    stack: Vec<Screen>,
}

impl Default for Navigator {
    fn default() -> Self {
        Self {
            stack: vec![Screen::Main],
        }
    }
}

impl Navigator {
    pub fn new() -> Self {
        Self::default()
    }

    /// The screen on top of the stack.
    pub fn current(&self) -> &Screen {
        // The root is never popped.
        &self.stack[self.stack.len() - 1]
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Open the display screen with `message` as its only parameter.
    pub fn send_message(&mut self, message: impl Into<String>) -> &Screen {
        self.push(Screen::DisplayMessage {
            message: Some(message.into()),
        })
    }

    pub fn open_settings(&mut self) -> &Screen {
        self.push(Screen::Settings)
    }

    /// Pop the current screen. Returns `false` (and stays put) on the root.
    pub fn back(&mut self) -> bool {
        if self.stack.len() <= 1 {
            return false;
        }
        let left = self.stack.pop();
        debug!(screen = ?left, "navigated back");
        true
    }

    fn push(&mut self, screen: Screen) -> &Screen {
        debug!(screen = ?screen, "navigated to");
        self.stack.push(screen);
        self.current()
    }
}
