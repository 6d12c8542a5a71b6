use eyre::WrapErr;
use tracing::debug;
use tracing::info;
use windows::core::*;
use windows::Win32::Foundation::*;
use windows::Win32::UI::WindowsAndMessaging::*;

use crate::error::AppResult;
use crate::launch_options::LaunchOptions;
use crate::teardown::LifecycleObject;
use crate::teardown::Teardown;
use crate::window_class::WINDOW_CLASS_NAME;

pub struct NativeWindow {
    hwnd: HWND,
}

pub fn create_window(instance: HMODULE, options: &LaunchOptions) -> AppResult<NativeWindow> {
    let (width, height) = options.resolution();
    let mut window_rect = RECT {
        left: 0,
        top: 0,
        right: width as i32,
        bottom: height as i32,
    };

    let (style, ex_style) = if options.borderless {
        (WS_POPUP, WS_EX_TOPMOST)
    } else {
        (WS_OVERLAPPEDWINDOW, WINDOW_EX_STYLE::default())
    };

    let screen_width = unsafe { GetSystemMetrics(SM_CXSCREEN) };
    let (x, y) = options.window_origin(screen_width);

    // Grow the outer rectangle so the client area is exactly the back buffer size.
    unsafe { AdjustWindowRect(&mut window_rect, style, false) }
        .wrap_err("failed to size window rectangle")?;

    let hwnd = unsafe {
        CreateWindowExW(
            ex_style,
            WINDOW_CLASS_NAME,
            w!("D3D12 Window"),
            style,
            x,
            y,
            window_rect.right - window_rect.left,
            window_rect.bottom - window_rect.top,
            None,
            None,
            Some(instance.into()),
            None,
        )
    }
    .wrap_err("failed to create window")?;

    info!(width, height, borderless = options.borderless, "window created");
    Ok(NativeWindow { hwnd })
}

impl NativeWindow {
    pub fn hwnd(&self) -> HWND {
        self.hwnd
    }

    pub fn show(&self) {
        unsafe { _ = ShowWindow(self.hwnd, SW_SHOWDEFAULT) };
    }

    /// Destroys the window. It is the first object created, so it goes last.
    ///
    /// The window is destroyed even when the ledger refuses the release;
    /// the refusal is still returned.
    pub fn destroy(self, teardown: &mut Teardown) -> AppResult<()> {
        let released = teardown.release(LifecycleObject::Window);
        self.discard();
        Ok(released?)
    }

    /// Destroys the window outside the teardown ledger, for when startup
    /// failed before the ledger exists.
    pub fn discard(self) {
        // A WM_DESTROY seen earlier means the window is already gone.
        if let Err(error) = unsafe { DestroyWindow(self.hwnd) } {
            debug!(%error, "window was already destroyed");
        }
    }
}
