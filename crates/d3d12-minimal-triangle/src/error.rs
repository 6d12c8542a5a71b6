use tracing::error;

use crate::frame_loop::FrameState;
use crate::teardown::LifecycleObject;

pub type AppResult<T, E = eyre::Report> = core::result::Result<T, E>;

/// Folds the results of steps that all had to run into the first failure.
/// Later failures are logged so they are not lost.
pub fn first_failure<I>(steps: I) -> AppResult<()>
where
    I: IntoIterator<Item = (&'static str, AppResult<()>)>,
{
    let mut first = None;
    for (step, result) in steps {
        let Err(report) = result else {
            continue;
        };
        if first.is_none() {
            first = Some(report);
        } else {
            error!(step, error = ?report, "further failure");
        }
    }
    first.map_or(Ok(()), Err)
}

/// Failures that stop the sample before the first frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StartupError {
    NoHardwareAdapter { minimum_feature_level: &'static str },
    UnsupportedPlatform,
}

impl std::error::Error for StartupError {}
impl std::fmt::Display for StartupError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StartupError::NoHardwareAdapter {
                minimum_feature_level,
            } => write!(
                f,
                "no hardware adapter supports Direct3D feature level {minimum_feature_level}"
            ),
            StartupError::UnsupportedPlatform => {
                write!(f, "Direct3D12 is only available on Windows")
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameError {
    InvalidTransition { from: FrameState, to: FrameState },
    FrameIndexOutOfRange { index: u32, frame_count: u32 },
}

impl std::error::Error for FrameError {}
impl std::fmt::Display for FrameError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FrameError::InvalidTransition { from, to } => {
                write!(f, "frame cannot move from {from:?} to {to:?}")
            }
            FrameError::FrameIndexOutOfRange { index, frame_count } => write!(
                f,
                "present image index {index} is outside the {frame_count} back buffers"
            ),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TeardownError {
    FenceNotDrained {
        object: LifecycleObject,
    },
    OutOfOrder {
        expected: Option<LifecycleObject>,
        found: LifecycleObject,
    },
}

impl std::error::Error for TeardownError {}
impl std::fmt::Display for TeardownError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TeardownError::FenceNotDrained { object } => {
                write!(f, "{object:?} released before the final fence wait")
            }
            TeardownError::OutOfOrder {
                expected: Some(expected),
                found,
            } => write!(f, "{found:?} released while {expected:?} is still alive"),
            TeardownError::OutOfOrder {
                expected: None,
                found,
            } => write!(f, "{found:?} released but nothing is left to release"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn startup_error_names_the_feature_level() {
        let error = StartupError::NoHardwareAdapter {
            minimum_feature_level: "12_1",
        };
        assert_eq!(
            error.to_string(),
            "no hardware adapter supports Direct3D feature level 12_1"
        );
    }

    #[test]
    fn frame_errors_convert_into_reports() {
        let report: eyre::Report = FrameError::FrameIndexOutOfRange {
            index: 2,
            frame_count: 2,
        }
        .into();
        assert!(report.to_string().contains("index 2"));
        assert!(report.downcast_ref::<FrameError>().is_some());
    }

    #[test]
    fn first_failure_is_ok_when_every_step_succeeds() {
        assert!(first_failure([("frames", Ok(())), ("shutdown", Ok(()))]).is_ok());
    }

    #[test]
    fn first_failure_keeps_the_earliest_error() {
        let result = first_failure([
            ("frames", Ok(())),
            ("shutdown", Err(eyre::eyre!("final GPU wait failed"))),
            (
                "window",
                Err(TeardownError::OutOfOrder {
                    expected: Some(LifecycleObject::Fence),
                    found: LifecycleObject::Window,
                }
                .into()),
            ),
        ]);
        let report = result.unwrap_err();
        assert_eq!(report.to_string(), "final GPU wait failed");
        assert!(report.downcast_ref::<TeardownError>().is_none());
    }

    #[test]
    fn teardown_error_without_remaining_objects() {
        let error = TeardownError::OutOfOrder {
            expected: None,
            found: LifecycleObject::Device,
        };
        assert_eq!(
            error.to_string(),
            "Device released but nothing is left to release"
        );
    }
}
