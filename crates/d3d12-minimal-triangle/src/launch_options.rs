/// Window settings picked at process start.
///
/// Running with no arguments gives a 1280x720 borderless window. The
/// switches follow the usual sample convention: case-insensitive, with a
/// `-` or `/` prefix.
///
/// * `-small` - 960x540 instead of 1280x720
/// * `-windowed` - an overlapped window with a title bar instead of a popup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LaunchOptions {
    pub small_window: bool,
    pub borderless: bool,
}

/// Distance from the top of the screen to the window, in pixels.
pub const WINDOW_TOP: i32 = 100;

impl Default for LaunchOptions {
    fn default() -> Self {
        Self {
            small_window: false,
            borderless: true,
        }
    }
}

impl LaunchOptions {
    pub fn from_env() -> Self {
        Self::from_args(std::env::args().skip(1))
    }

    pub fn from_args<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut options = Self::default();
        for arg in args {
            let arg = arg.as_ref();
            if is_switch(arg, "small") {
                options.small_window = true;
            } else if is_switch(arg, "windowed") {
                options.borderless = false;
            }
        }
        options
    }

    /// Client area size, which is also the back buffer size.
    pub fn resolution(&self) -> (u32, u32) {
        if self.small_window {
            (960, 540)
        } else {
            (1280, 720)
        }
    }

    pub fn aspect_ratio(&self) -> f32 {
        let (width, height) = self.resolution();
        width as f32 / height as f32
    }

    /// Top-left corner of a window centered horizontally on a screen of the given width.
    pub fn window_origin(&self, screen_width: i32) -> (i32, i32) {
        let (width, _) = self.resolution();
        ((screen_width - width as i32) / 2, WINDOW_TOP)
    }
}

fn is_switch(arg: &str, name: &str) -> bool {
    arg.strip_prefix('-')
        .or_else(|| arg.strip_prefix('/'))
        .is_some_and(|switch| switch.eq_ignore_ascii_case(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_arguments_gives_the_default_window() {
        let options = LaunchOptions::from_args(Vec::<String>::new());
        assert_eq!(options, LaunchOptions::default());
        assert_eq!(options.resolution(), (1280, 720));
        assert!(options.borderless);
    }

    #[test]
    fn switches_accept_both_prefixes_in_any_case() {
        let options = LaunchOptions::from_args(["/SMALL", "-Windowed"]);
        assert!(options.small_window);
        assert!(!options.borderless);
        assert_eq!(options.resolution(), (960, 540));
    }

    #[test]
    fn unknown_and_bare_arguments_are_ignored() {
        let options = LaunchOptions::from_args(["small", "--small", "-warp", "/"]);
        assert_eq!(options, LaunchOptions::default());
    }

    #[test]
    fn aspect_ratio_matches_resolution() {
        let options = LaunchOptions::default();
        assert!((options.aspect_ratio() - 16.0 / 9.0).abs() < f32::EPSILON);
    }

    #[test]
    fn window_is_centered_horizontally() {
        let options = LaunchOptions::default();
        assert_eq!(options.window_origin(1920), (320, WINDOW_TOP));
        let small = LaunchOptions {
            small_window: true,
            ..LaunchOptions::default()
        };
        assert_eq!(small.window_origin(1920), (480, WINDOW_TOP));
    }
}
