use crate::api::types::{CueKind, SoundEvent};
use crate::core::rng::Rng;
use crate::core::time::Interval;

/// Blip cadence of the scanning loop.
pub const SCAN_INTERVAL: f32 = 0.1;
/// Blip pitch range in Hz, lower bound inclusive.
pub const SCAN_FREQ_MIN: f32 = 800.0;
pub const SCAN_FREQ_MAX: f32 = 1600.0;

/// Fire-and-forget audio capability used by the game.
/// Nothing here reports completion; callers keep their own dwell timers.
pub trait AudioCues {
    fn play_cue(&mut self, kind: CueKind);
    fn start_loop(&mut self);
    fn stop_loop(&mut self);
}

/// Repeating scanning blips, active between `start` and `stop`.
#[derive(Debug, Clone)]
pub struct ScanLoop {
    active: bool,
    interval: Interval,
}

impl ScanLoop {
    pub fn new() -> Self {
        Self {
            active: false,
            interval: Interval::new(SCAN_INTERVAL),
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn start(&mut self) {
        self.active = true;
        self.interval.reset();
    }

    /// Stop and discard the partially elapsed period, so nothing fires afterwards.
    pub fn stop(&mut self) {
        self.active = false;
        self.interval.reset();
    }

    /// Advance by `dt`, pushing one blip per elapsed period while active.
    pub fn tick(&mut self, dt: f32, rng: &mut Rng, out: &mut Vec<SoundEvent>) {
        if !self.active {
            return;
        }
        for _ in 0..self.interval.tick(dt) {
            let freq = rng.range_f32(SCAN_FREQ_MIN, SCAN_FREQ_MAX);
            out.push(SoundEvent::new(CueKind::ScanBlip, freq));
        }
    }
}

impl Default for ScanLoop {
    fn default() -> Self {
        Self::new()
    }
}

/// Engine-side audio state: this frame's sound events, the scanning loop,
/// and whether the host has been told to unlock its audio context.
#[derive(Debug, Clone, Default)]
pub struct AudioState {
    sounds: Vec<SoundEvent>,
    scan: ScanLoop,
    unlocked: bool,
}

impl AudioState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the first user gesture. Returns true only the first time.
    pub fn unlock(&mut self) -> bool {
        !std::mem::replace(&mut self.unlocked, true)
    }

    pub fn is_looping(&self) -> bool {
        self.scan.is_active()
    }

    pub fn sounds(&self) -> &[SoundEvent] {
        &self.sounds
    }

    pub fn clear_sounds(&mut self) {
        self.sounds.clear();
    }

    pub fn tick(&mut self, dt: f32, rng: &mut Rng) {
        self.scan.tick(dt, rng, &mut self.sounds);
    }
}

impl AudioCues for AudioState {
    fn play_cue(&mut self, kind: CueKind) {
        self.sounds.push(SoundEvent::new(kind, 0.0));
    }

    fn start_loop(&mut self) {
        self.scan.start();
    }

    fn stop_loop(&mut self) {
        self.scan.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    fn run(audio: &mut AudioState, rng: &mut Rng, seconds: f32) -> Vec<SoundEvent> {
        let mut heard = Vec::new();
        for _ in 0..(seconds / DT).round() as usize {
            audio.tick(DT, rng);
            heard.extend_from_slice(audio.sounds());
            audio.clear_sounds();
        }
        heard
    }

    #[test]
    fn scan_loop_blips_ten_times_a_second() {
        let mut audio = AudioState::new();
        let mut rng = Rng::new(1);
        audio.start_loop();
        let heard = run(&mut audio, &mut rng, 1.0);
        assert_eq!(heard.len(), 10);
        for e in &heard {
            assert_eq!(e.kind(), Some(CueKind::ScanBlip));
            assert!((SCAN_FREQ_MIN..SCAN_FREQ_MAX).contains(&e.param));
        }
    }

    #[test]
    fn nothing_fires_after_stop() {
        let mut audio = AudioState::new();
        let mut rng = Rng::new(1);
        audio.start_loop();
        // stop part-way through a period
        run(&mut audio, &mut rng, 0.15);
        audio.stop_loop();
        assert!(run(&mut audio, &mut rng, 2.0).is_empty());
        assert!(!audio.is_looping());
    }

    #[test]
    fn silent_until_started() {
        let mut audio = AudioState::new();
        let mut rng = Rng::new(1);
        assert!(run(&mut audio, &mut rng, 1.0).is_empty());
    }

    #[test]
    fn unlock_reports_first_time_only() {
        let mut audio = AudioState::new();
        assert!(audio.unlock());
        assert!(!audio.unlock());
    }

    #[test]
    fn play_cue_queues_event() {
        let mut audio = AudioState::new();
        audio.play_cue(CueKind::EnergyBuildup);
        assert_eq!(audio.sounds(), &[SoundEvent::new(CueKind::EnergyBuildup, 0.0)]);
    }
}
