use eyre::WrapErr;
use windows::core::*;
use windows::Win32::Foundation::*;
use windows::Win32::Graphics::Gdi::GetStockObject;
use windows::Win32::Graphics::Gdi::BLACK_BRUSH;
use windows::Win32::Graphics::Gdi::HBRUSH;
use windows::Win32::UI::WindowsAndMessaging::*;

use crate::error::AppResult;
use crate::window_event::WindowEvent;

pub const WINDOW_CLASS_NAME: PCWSTR = w!("D3D12WindowClass");

pub fn register_window_class(instance: HMODULE) -> AppResult<()> {
    let wc = WNDCLASSEXW {
        cbSize: std::mem::size_of::<WNDCLASSEXW>() as u32,
        style: CS_HREDRAW | CS_VREDRAW,
        lpfnWndProc: Some(wndproc),
        hInstance: instance.into(),
        hCursor: unsafe { LoadCursorW(None, IDC_ARROW) }.wrap_err("failed to load arrow cursor")?,
        hbrBackground: HBRUSH(unsafe { GetStockObject(BLACK_BRUSH) }.0),
        lpszClassName: WINDOW_CLASS_NAME,
        ..Default::default()
    };

    let atom = unsafe { RegisterClassExW(&wc) };
    if atom == 0 {
        return Err(Error::from_win32()).wrap_err("failed to register window class");
    }
    Ok(())
}

pub fn classify_message(message: u32, wparam: WPARAM) -> WindowEvent {
    match message {
        WM_KEYDOWN => WindowEvent::KeyDown {
            virtual_key: wparam.0 as u16,
        },
        WM_CLOSE => WindowEvent::Close,
        WM_DESTROY => WindowEvent::Destroy,
        WM_QUIT => WindowEvent::Quit,
        _ => WindowEvent::Other,
    }
}

extern "system" fn wndproc(window: HWND, message: u32, wparam: WPARAM, lparam: LPARAM) -> LRESULT {
    if classify_message(message, wparam).ends_session() {
        // The frame loop picks up WM_QUIT on its next drain.
        unsafe { PostQuitMessage(0) };
        return LRESULT(0);
    }
    unsafe { DefWindowProcW(window, message, wparam, lparam) }
}

#[cfg(test)]
mod tests {
    use windows::Win32::UI::Input::KeyboardAndMouse::VK_ESCAPE;
    use windows::Win32::UI::Input::KeyboardAndMouse::VK_SPACE;

    use super::*;
    use crate::window_event::ESCAPE_KEY;

    fn key(virtual_key: u16) -> WPARAM {
        WPARAM(virtual_key as usize)
    }

    #[test]
    fn escape_key_down_ends_the_session() {
        assert_eq!(ESCAPE_KEY, VK_ESCAPE.0);
        let event = classify_message(WM_KEYDOWN, key(VK_ESCAPE.0));
        assert_eq!(
            event,
            WindowEvent::KeyDown {
                virtual_key: ESCAPE_KEY
            }
        );
        assert!(event.ends_session());
    }

    #[test]
    fn other_key_down_keeps_running() {
        let event = classify_message(WM_KEYDOWN, key(VK_SPACE.0));
        assert_eq!(
            event,
            WindowEvent::KeyDown {
                virtual_key: VK_SPACE.0
            }
        );
        assert!(!event.ends_session());
    }

    #[test]
    fn lifecycle_messages_are_classified() {
        assert_eq!(classify_message(WM_CLOSE, WPARAM(0)), WindowEvent::Close);
        assert_eq!(classify_message(WM_DESTROY, WPARAM(0)), WindowEvent::Destroy);
        assert_eq!(classify_message(WM_QUIT, WPARAM(0)), WindowEvent::Quit);
    }

    #[test]
    fn unhandled_messages_are_other() {
        assert_eq!(
            classify_message(WM_KEYUP, key(VK_ESCAPE.0)),
            WindowEvent::Other
        );
        assert_eq!(classify_message(WM_PAINT, WPARAM(0)), WindowEvent::Other);
        assert!(!classify_message(WM_PAINT, WPARAM(0)).ends_session());
    }
}
