//! One-shot celebration schedule.
//!
//! The blow-out choreography is a declarative list of `(offset, action)`
//! stages fired relative to the trigger moment. Offsets are absolute from the
//! trigger, never chained, so ordering and cancellation can be tested without
//! any tween or rendering collaborator.

use smallvec::SmallVec;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StageAction {
    /// Fade the candle light, spawn smoke at the tip, play the blow cue.
    ExtinguishCandle,
    /// Confetti burst, flower/sparkle pulses, camera dolly, label + message.
    StartCelebration,
}

#[derive(Clone, Copy, Debug)]
pub struct Stage {
    pub offset_sec: f64,
    pub action: StageAction,
}

pub const CELEBRATION_STAGES: &[Stage] = &[
    Stage {
        offset_sec: 0.0,
        action: StageAction::ExtinguishCandle,
    },
    Stage {
        offset_sec: crate::constants::CELEBRATION_DELAY_SEC,
        action: StageAction::StartCelebration,
    },
];

/// Executes a fixed stage list against a monotonically increasing clock.
///
/// At most one schedule is pending at a time: `trigger` restarts from the
/// first stage, which discards (cancels) any stages the previous trigger had
/// not yet fired.
#[derive(Clone, Debug)]
pub struct Timeline {
    stages: &'static [Stage],
    origin: Option<f64>,
    cursor: usize,
}

impl Timeline {
    pub fn new(stages: &'static [Stage]) -> Self {
        debug_assert!(
            stages.windows(2).all(|w| w[0].offset_sec <= w[1].offset_sec),
            "stages must be ordered by offset"
        );
        Self {
            stages,
            origin: None,
            cursor: 0,
        }
    }

    pub fn celebration() -> Self {
        Self::new(CELEBRATION_STAGES)
    }

    /// Arm the schedule at `now`, cancelling any still-pending stages from an
    /// earlier trigger.
    pub fn trigger(&mut self, now_sec: f64) {
        self.origin = Some(now_sec);
        self.cursor = 0;
    }

    pub fn cancel(&mut self) {
        self.origin = None;
        self.cursor = 0;
    }

    /// Any stages still waiting to fire?
    pub fn pending(&self) -> bool {
        self.origin.is_some() && self.cursor < self.stages.len()
    }

    /// Collect every stage whose offset has elapsed by `now`. Stages fire in
    /// list order; a stage fires exactly once per trigger.
    pub fn poll(&mut self, now_sec: f64, out: &mut SmallVec<[StageAction; 4]>) {
        let Some(origin) = self.origin else {
            return;
        };
        while self.cursor < self.stages.len() {
            let stage = &self.stages[self.cursor];
            if now_sec - origin < stage.offset_sec {
                break;
            }
            out.push(stage.action);
            self.cursor += 1;
        }
    }
}
