/// Virtual-key code of the escape key.
pub const ESCAPE_KEY: u16 = 0x1B;

/// The window messages the sample reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowEvent {
    KeyDown { virtual_key: u16 },
    Close,
    Destroy,
    Quit,
    Other,
}

impl WindowEvent {
    /// Close, destroy, quit and the escape key all end the frame loop.
    pub fn ends_session(self) -> bool {
        match self {
            WindowEvent::KeyDown { virtual_key } => virtual_key == ESCAPE_KEY,
            WindowEvent::Close | WindowEvent::Destroy | WindowEvent::Quit => true,
            WindowEvent::Other => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_ends_the_session_other_keys_do_not() {
        assert!(WindowEvent::KeyDown {
            virtual_key: ESCAPE_KEY
        }
        .ends_session());
        assert!(!WindowEvent::KeyDown { virtual_key: 0x41 }.ends_session());
    }

    #[test]
    fn lifecycle_messages_end_the_session() {
        assert!(WindowEvent::Close.ends_session());
        assert!(WindowEvent::Destroy.ends_session());
        assert!(WindowEvent::Quit.ends_session());
        assert!(!WindowEvent::Other.ends_session());
    }
}
