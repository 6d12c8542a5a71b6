use windows::Win32::UI::WindowsAndMessaging::*;

use crate::window_class::classify_message;
use crate::window_event::WindowEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PumpOutcome {
    Continue,
    Quit,
}

/// Dispatches every pending message for this thread.
///
/// Returns [`PumpOutcome::Quit`] as soon as `WM_QUIT` is seen; the window
/// procedure posts it for close, destroy and escape.
pub fn drain_messages() -> PumpOutcome {
    let mut message = MSG::default();
    while unsafe { PeekMessageW(&mut message, None, 0, 0, PM_REMOVE) }.as_bool() {
        if classify_message(message.message, message.wParam) == WindowEvent::Quit {
            return PumpOutcome::Quit;
        }
        unsafe {
            _ = TranslateMessage(&message);
            DispatchMessageW(&message);
        }
    }
    PumpOutcome::Continue
}
