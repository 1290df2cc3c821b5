//! On/off bookkeeping for the after-effects across filter-mode changes.
//!
//! An effect that was on stays on only with its repeat probability. Once it turns off it
//! has to sit out its off-time (counted in cycles) before it may be rolled on again.

use super::hypercos::HypercosOverlayMode;
use super::{AfterEffectsMap, AfterEffectsSettings, AfterEffectsType};
use crate::goom_rand::{RandomSource, Weights};

/// Frame-count timer. Starts out finished.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Timer {
    duration: u32,
    elapsed: u32,
}

impl Timer {
    pub fn new(duration: u32) -> Self {
        Self {
            duration,
            elapsed: duration,
        }
    }

    pub fn finished(&self) -> bool {
        self.elapsed >= self.duration
    }

    pub fn reset_to_zero(&mut self) {
        self.elapsed = 0;
    }

    pub fn increment(&mut self) {
        if self.elapsed < self.duration {
            self.elapsed += 1;
        }
    }
}

#[derive(Clone, Debug)]
struct AfterEffectState {
    turned_on: bool,
    prob_repeated: f32,
    off_timer: Timer,
    pending_off_timer_reset: bool,
}

impl AfterEffectState {
    fn new(prob_repeated: f32, off_time: u32) -> Self {
        Self {
            turned_on: false,
            prob_repeated,
            off_timer: Timer::new(off_time),
            pending_off_timer_reset: false,
        }
    }

    fn update_state(&mut self, rand: &mut dyn RandomSource, prob_effect: f32) {
        if !self.off_timer.finished() || self.pending_off_timer_reset {
            return;
        }
        let value = rand.probability_of(prob_effect);
        self.set_state(rand, value);
    }

    fn set_state(&mut self, rand: &mut dyn RandomSource, value: bool) {
        let previously_on = self.turned_on;
        self.turned_on = value;
        if previously_on && self.turned_on {
            self.turned_on = rand.probability_of(self.prob_repeated);
        }
        if previously_on && !self.turned_on {
            self.pending_off_timer_reset = true;
        }
    }

    fn check_pending_off_timer_reset(&mut self) {
        if !self.pending_off_timer_reset {
            return;
        }
        self.off_timer.reset_to_zero();
        self.pending_off_timer_reset = false;
    }
}

/// Per-mode odds handed to [`AfterEffectsStates::reset_all_states`].
#[derive(Clone, Debug)]
pub struct AfterEffectsProbabilities {
    pub hypercos_mode_weights: Weights<HypercosOverlayMode>,
    pub probabilities: AfterEffectsMap<f32>,
}

#[derive(Clone, Debug)]
pub struct AfterEffectsStates {
    hypercos_overlay_mode: HypercosOverlayMode,
    states: AfterEffectsMap<AfterEffectState>,
}

impl AfterEffectsStates {
    pub fn new(repeat_probabilities: &AfterEffectsMap<f32>, off_times: &AfterEffectsMap<u32>) -> Self {
        Self {
            hypercos_overlay_mode: HypercosOverlayMode::None,
            states: AfterEffectsMap::from_fn(|effect| {
                AfterEffectState::new(repeat_probabilities[effect], off_times[effect])
            }),
        }
    }

    pub fn hypercos_overlay_mode(&self) -> HypercosOverlayMode {
        self.hypercos_overlay_mode
    }

    pub fn is_turned_on(&self, effect: AfterEffectsType) -> bool {
        self.states[effect].turned_on
    }

    pub fn is_off_timer_finished(&self, effect: AfterEffectsType) -> bool {
        self.states[effect].off_timer.finished()
    }

    pub fn set_defaults(&mut self) {
        self.hypercos_overlay_mode = HypercosOverlayMode::None;
    }

    pub fn reset_all_states(
        &mut self,
        rand: &mut dyn RandomSource,
        probabilities: &AfterEffectsProbabilities,
    ) {
        self.hypercos_overlay_mode = probabilities.hypercos_mode_weights.random_weighted(rand);
        self.reset_standard_states(rand, probabilities);
    }

    /// Hypercos is only on when an overlay mode was rolled, and vice versa.
    pub fn reset_standard_states(
        &mut self,
        rand: &mut dyn RandomSource,
        probabilities: &AfterEffectsProbabilities,
    ) {
        for effect in AfterEffectsType::ALL {
            self.states[effect].update_state(rand, probabilities.probabilities[effect]);
        }

        let hypercos = &mut self.states[AfterEffectsType::Hypercos];
        if self.hypercos_overlay_mode == HypercosOverlayMode::None {
            hypercos.set_state(rand, false);
        }
        if !hypercos.turned_on {
            self.hypercos_overlay_mode = HypercosOverlayMode::None;
        }
    }

    pub fn turn_plane_effect_on(&mut self, rand: &mut dyn RandomSource) {
        self.states[AfterEffectsType::Planes].set_state(rand, true);
    }

    pub fn check_for_pending_off_timers(&mut self) {
        for effect in AfterEffectsType::ALL {
            let state = &mut self.states[effect];
            if state.pending_off_timer_reset {
                log::debug!("{effect:?} turned off, starting its off timer");
            }
            state.check_pending_off_timer_reset();
        }
    }

    /// Advances every off-timer by one cycle.
    pub fn increment_timers(&mut self) {
        for effect in AfterEffectsType::ALL {
            self.states[effect].off_timer.increment();
        }
    }

    pub fn update_settings_from_states(&self, settings: &mut AfterEffectsSettings) {
        settings.hypercos_overlay_mode = self.hypercos_overlay_mode;
        for effect in AfterEffectsType::ALL {
            settings.is_active[effect] = self.states[effect].turned_on;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timer_starts_finished() {
        let mut timer = Timer::new(3);
        assert!(timer.finished());
        timer.reset_to_zero();
        assert!(!timer.finished());
        for _ in 0..3 {
            timer.increment();
        }
        assert!(timer.finished());
    }

    #[test]
    fn zero_duration_timer_is_always_finished() {
        let mut timer = Timer::new(0);
        timer.reset_to_zero();
        assert!(timer.finished());
    }
}
