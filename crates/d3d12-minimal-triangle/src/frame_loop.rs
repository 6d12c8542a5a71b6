use crate::error::FrameError;

/// Number of swap chain back buffers.
pub const FRAME_COUNT: u32 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameState {
    Idle,
    Recording,
    Submitted,
    Presented,
    Exited,
}

/// Tracks where the current frame is in its clear/draw/present cycle and
/// which back buffer it renders to.
///
/// One frame is in flight at most: a new recording can only start from
/// `Idle`, and `Idle` is only reached again through [`FrameLoop::complete`],
/// which the renderer calls after the fence wait. The back buffer index is
/// replaced only by `complete`, with the index the swap chain reported after
/// that wait.
#[derive(Debug)]
pub struct FrameLoop {
    state: FrameState,
    frame_index: u32,
    frames_presented: u64,
}

impl FrameLoop {
    pub fn new(initial_frame_index: u32) -> Result<Self, FrameError> {
        check_frame_index(initial_frame_index)?;
        Ok(Self {
            state: FrameState::Idle,
            frame_index: initial_frame_index,
            frames_presented: 0,
        })
    }

    pub fn state(&self) -> FrameState {
        self.state
    }

    pub fn frame_index(&self) -> u32 {
        self.frame_index
    }

    pub fn frames_presented(&self) -> u64 {
        self.frames_presented
    }

    /// Idle -> Recording. Returns the back buffer index to record into.
    pub fn begin_recording(&mut self) -> Result<u32, FrameError> {
        self.transition(FrameState::Idle, FrameState::Recording)?;
        Ok(self.frame_index)
    }

    pub fn submit(&mut self) -> Result<(), FrameError> {
        self.transition(FrameState::Recording, FrameState::Submitted)
    }

    pub fn present(&mut self) -> Result<(), FrameError> {
        self.transition(FrameState::Submitted, FrameState::Presented)
    }

    /// Presented -> Idle, once the GPU has finished the frame.
    pub fn complete(&mut self, next_frame_index: u32) -> Result<(), FrameError> {
        check_frame_index(next_frame_index)?;
        self.transition(FrameState::Presented, FrameState::Idle)?;
        self.frame_index = next_frame_index;
        self.frames_presented += 1;
        Ok(())
    }

    pub fn exit(&mut self) -> Result<(), FrameError> {
        self.transition(FrameState::Idle, FrameState::Exited)
    }

    fn transition(&mut self, expected: FrameState, next: FrameState) -> Result<(), FrameError> {
        if self.state != expected {
            return Err(FrameError::InvalidTransition {
                from: self.state,
                to: next,
            });
        }
        self.state = next;
        Ok(())
    }
}

fn check_frame_index(index: u32) -> Result<(), FrameError> {
    if index >= FRAME_COUNT {
        return Err(FrameError::FrameIndexOutOfRange {
            index,
            frame_count: FRAME_COUNT,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_frame(frame_loop: &mut FrameLoop, next_index: u32) -> u32 {
        let recorded = frame_loop.begin_recording().unwrap();
        frame_loop.submit().unwrap();
        frame_loop.present().unwrap();
        frame_loop.complete(next_index).unwrap();
        recorded
    }

    #[test]
    fn a_full_frame_returns_to_idle() {
        let mut frame_loop = FrameLoop::new(0).unwrap();
        run_frame(&mut frame_loop, 1);
        assert_eq!(frame_loop.state(), FrameState::Idle);
        assert_eq!(frame_loop.frames_presented(), 1);
    }

    #[test]
    fn recording_cannot_start_before_the_previous_frame_completes() {
        let mut frame_loop = FrameLoop::new(0).unwrap();
        frame_loop.begin_recording().unwrap();
        assert_eq!(
            frame_loop.begin_recording(),
            Err(FrameError::InvalidTransition {
                from: FrameState::Recording,
                to: FrameState::Recording,
            })
        );

        frame_loop.submit().unwrap();
        frame_loop.present().unwrap();
        assert!(frame_loop.begin_recording().is_err());
        assert_eq!(frame_loop.state(), FrameState::Presented);
    }

    #[test]
    fn steps_cannot_be_skipped() {
        let mut frame_loop = FrameLoop::new(0).unwrap();
        assert!(frame_loop.submit().is_err());
        assert!(frame_loop.present().is_err());
        assert!(frame_loop.complete(1).is_err());
        assert_eq!(frame_loop.state(), FrameState::Idle);
    }

    #[test]
    fn recording_uses_the_index_reported_after_the_last_frame() {
        let mut frame_loop = FrameLoop::new(1).unwrap();
        assert_eq!(run_frame(&mut frame_loop, 0), 1);
        assert_eq!(run_frame(&mut frame_loop, 1), 0);
        assert_eq!(run_frame(&mut frame_loop, 1), 1);
        assert_eq!(frame_loop.frame_index(), 1);
    }

    #[test]
    fn out_of_range_index_is_rejected_without_changing_state() {
        assert!(FrameLoop::new(FRAME_COUNT).is_err());

        let mut frame_loop = FrameLoop::new(0).unwrap();
        frame_loop.begin_recording().unwrap();
        frame_loop.submit().unwrap();
        frame_loop.present().unwrap();
        assert_eq!(
            frame_loop.complete(FRAME_COUNT),
            Err(FrameError::FrameIndexOutOfRange {
                index: FRAME_COUNT,
                frame_count: FRAME_COUNT,
            })
        );
        assert_eq!(frame_loop.state(), FrameState::Presented);
        assert_eq!(frame_loop.frame_index(), 0);
    }

    #[test]
    fn exit_is_terminal_and_only_taken_from_idle() {
        let mut frame_loop = FrameLoop::new(0).unwrap();
        frame_loop.begin_recording().unwrap();
        assert!(frame_loop.exit().is_err());

        let mut frame_loop = FrameLoop::new(0).unwrap();
        frame_loop.exit().unwrap();
        assert_eq!(frame_loop.state(), FrameState::Exited);
        assert!(frame_loop.begin_recording().is_err());
    }
}
