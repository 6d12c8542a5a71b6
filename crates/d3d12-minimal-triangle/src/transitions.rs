/// States a back buffer moves between during a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceState {
    Present,
    RenderTarget,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub before: SurfaceState,
    pub after: SurfaceState,
}

impl Transition {
    pub const fn inverse(self) -> Self {
        Self {
            before: self.after,
            after: self.before,
        }
    }
}

pub const TO_RENDER_TARGET: Transition = Transition {
    before: SurfaceState::Present,
    after: SurfaceState::RenderTarget,
};

pub const TO_PRESENT: Transition = TO_RENDER_TARGET.inverse();

/// Barriers recorded for the back buffer each frame: one before the clear,
/// one after the draw.
pub const FRAME_TRANSITIONS: [Transition; 2] = [TO_RENDER_TARGET, TO_PRESENT];

/// True when the transitions form one present -> render target -> present
/// round trip, each link starting where the previous one ended.
pub fn is_paired(transitions: &[Transition]) -> bool {
    let count = |wanted: Transition| transitions.iter().filter(|&&t| t == wanted).count();
    if count(TO_RENDER_TARGET) != 1 || count(TO_PRESENT) != 1 || transitions.len() != 2 {
        return false;
    }
    let mut state = SurfaceState::Present;
    for transition in transitions {
        if transition.before != state {
            return false;
        }
        state = transition.after;
    }
    state == SurfaceState::Present
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_transitions_are_one_paired_round_trip() {
        assert!(is_paired(&FRAME_TRANSITIONS));
        assert_eq!(FRAME_TRANSITIONS[0], TO_RENDER_TARGET);
        assert_eq!(FRAME_TRANSITIONS[1], TO_RENDER_TARGET.inverse());
    }

    #[test]
    fn reversed_order_is_not_paired() {
        assert!(!is_paired(&[TO_PRESENT, TO_RENDER_TARGET]));
    }

    #[test]
    fn missing_or_repeated_transitions_are_not_paired() {
        assert!(!is_paired(&[]));
        assert!(!is_paired(&[TO_RENDER_TARGET]));
        assert!(!is_paired(&[
            TO_RENDER_TARGET,
            TO_PRESENT,
            TO_RENDER_TARGET,
            TO_PRESENT
        ]));
    }

    #[test]
    fn inverse_swaps_states() {
        assert_eq!(TO_PRESENT.before, SurfaceState::RenderTarget);
        assert_eq!(TO_PRESENT.after, SurfaceState::Present);
        assert_eq!(TO_PRESENT.inverse(), TO_RENDER_TARGET);
    }
}
