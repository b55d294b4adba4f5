//! Offline synthesis of every cue into mono PCM samples.
//!
//! Each cue is described as a `Score`: a handful of voices (oscillators or
//! filtered noise) with automated frequency and gain, mixed through a fixed
//! master gain. The host wraps the rendered samples in an audio buffer.

use std::f32::consts::TAU;
use crate::api::types::CueKind;
use crate::core::rng::Rng;
use super::filter::Biquad;
use super::param::Param;

/// Output level applied after mixing.
pub const MASTER_GAIN: f32 = 0.3;

/// Length of the scripted part of the energy buildup, in seconds.
pub const BUILDUP_SECONDS: f32 = 3.5;

/// Level a tone decays to before it is cut.
const TONE_FLOOR: f32 = 0.01;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Waveform {
    Sine,
    Square,
    Sawtooth,
    Triangle,
}

impl Waveform {
    /// Sample at `phase` in cycles (any real; only the fraction matters).
    pub fn sample(self, phase: f32) -> f32 {
        let p = phase.rem_euclid(1.0);
        match self {
            Waveform::Sine => (TAU * p).sin(),
            Waveform::Square => if p < 0.5 { 1.0 } else { -1.0 },
            Waveform::Sawtooth => 2.0 * p - 1.0,
            Waveform::Triangle => {
                if p < 0.25 {
                    4.0 * p
                } else if p < 0.75 {
                    2.0 - 4.0 * p
                } else {
                    4.0 * p - 4.0
                }
            }
        }
    }
}

/// Sine low-frequency oscillator added to a voice's frequency.
#[derive(Debug, Clone)]
struct Lfo {
    freq: Param,
    depth: f32,
}

#[derive(Debug, Clone)]
enum Source {
    Oscillator {
        waveform: Waveform,
        freq: Param,
        lfo: Option<Lfo>,
    },
    /// White noise through a high-pass filter.
    Noise { highpass: f32 },
}

#[derive(Debug, Clone)]
struct Voice {
    source: Source,
    gain: Param,
    start: f32,
    stop: f32,
}

impl Voice {
    fn oscillator(waveform: Waveform, freq: Param, gain: Param, start: f32, stop: f32) -> Self {
        Self {
            source: Source::Oscillator { waveform, freq, lfo: None },
            gain,
            start,
            stop,
        }
    }

    /// Fixed-pitch blip that decays from `vol` to the floor over `duration`.
    fn tone(freq: f32, waveform: Waveform, duration: f32, start: f32, vol: f32) -> Self {
        Self::oscillator(
            waveform,
            Param::new(freq).set(freq, start),
            Param::new(vol).set(vol, start).exponential_to(TONE_FLOOR, start + duration),
            start,
            start + duration,
        )
    }

    fn with_lfo(mut self, freq: Param, depth: f32) -> Self {
        if let Source::Oscillator { lfo, .. } = &mut self.source {
            *lfo = Some(Lfo { freq, depth });
        }
        self
    }
}

/// A cue as a set of voices over a fixed length.
#[derive(Debug, Clone)]
struct Score {
    voices: Vec<Voice>,
    length: f32,
}

impl Score {
    fn render(&self, sample_rate: f32, rng: &mut Rng) -> Vec<f32> {
        let total = (self.length * sample_rate).round() as usize;
        let mut out = vec![0.0f32; total];

        for voice in &self.voices {
            let first = (voice.start * sample_rate).max(0.0) as usize;
            let last = ((voice.stop.min(self.length)) * sample_rate).ceil() as usize;
            let last = last.min(total);
            let mut phase = 0.0f32;
            let mut lfo_phase = 0.0f32;
            let mut filter = match voice.source {
                Source::Noise { highpass } => Some(Biquad::highpass(highpass, sample_rate)),
                Source::Oscillator { .. } => None,
            };

            for (i, slot) in out.iter_mut().enumerate().take(last).skip(first) {
                let t = i as f32 / sample_rate;
                let raw = match &voice.source {
                    Source::Oscillator { waveform, freq, lfo } => {
                        let mut f = freq.value_at(t);
                        if let Some(lfo) = lfo {
                            f += lfo.depth * Waveform::Sine.sample(lfo_phase);
                            lfo_phase += lfo.freq.value_at(t) / sample_rate;
                        }
                        let s = waveform.sample(phase);
                        phase += f / sample_rate;
                        s
                    }
                    Source::Noise { .. } => {
                        let white = rng.next_f32() * 2.0 - 1.0;
                        filter.as_mut().map_or(white, |f| f.process(white))
                    }
                };
                *slot += raw * voice.gain.value_at(t);
            }
        }

        for s in &mut out {
            *s = (*s * MASTER_GAIN).clamp(-1.0, 1.0);
        }
        out
    }
}

fn click() -> Score {
    Score {
        voices: vec![
            Voice::tone(1200.0, Waveform::Sine, 0.1, 0.0, 0.5),
            Voice::tone(2000.0, Waveform::Square, 0.05, 0.05, 0.3),
        ],
        length: 0.1,
    }
}

fn hover() -> Score {
    Score {
        voices: vec![Voice::tone(800.0, Waveform::Triangle, 0.05, 0.0, 0.1)],
        length: 0.05,
    }
}

fn transition() -> Score {
    Score {
        voices: vec![Voice::oscillator(
            Waveform::Sawtooth,
            Param::new(100.0).set(100.0, 0.0).exponential_to(800.0, 0.3),
            Param::new(0.2).set(0.2, 0.0).linear_to(0.0, 0.3),
            0.0,
            0.3,
        )],
        length: 0.3,
    }
}

fn scan_blip(freq: f32) -> Score {
    Score {
        voices: vec![Voice::tone(freq, Waveform::Sine, 0.05, 0.0, 0.1)],
        length: 0.05,
    }
}

/// Heartbeat pulses, a wobbling riser and a closing noise crash.
fn energy_buildup() -> Score {
    const BEATS: usize = 5;
    const BEAT_GAP: f32 = 0.6;
    const CRASH_TAIL: f32 = 1.2;
    const NOISE_SECONDS: f32 = 1.5;
    let d = BUILDUP_SECONDS;
    let mut voices = Vec::with_capacity(BEATS * 2 + 2);

    for i in 0..BEATS {
        let t = i as f32 * BEAT_GAP;
        // lub
        voices.push(Voice::oscillator(
            Waveform::Sine,
            Param::new(60.0).set(60.0, t).exponential_to(30.0, t + 0.1),
            Param::new(0.0).set(0.6, t).exponential_to(0.01, t + 0.15),
            t,
            t + 0.2,
        ));
        // dub, lighter
        let t2 = t + 0.15;
        voices.push(Voice::oscillator(
            Waveform::Sine,
            Param::new(50.0).set(50.0, t2).exponential_to(25.0, t2 + 0.1),
            Param::new(0.0).set(0.4, t2).exponential_to(0.01, t2 + 0.15),
            t2,
            t2 + 0.2,
        ));
    }

    voices.push(
        Voice::oscillator(
            Waveform::Triangle,
            Param::new(200.0)
                .set(200.0, 0.0)
                .linear_to(800.0, d * 0.8)
                .exponential_to(2000.0, d),
            Param::new(0.0).set(0.0, 0.0).linear_to(0.2, d),
            0.0,
            d,
        )
        .with_lfo(Param::new(5.0).set(5.0, 0.0).linear_to(20.0, d), 500.0),
    );

    voices.push(Voice {
        source: Source::Noise { highpass: 1000.0 },
        gain: Param::new(0.0)
            .set(0.0, d - 0.1)
            .linear_to(0.5, d)
            .exponential_to(0.01, d + CRASH_TAIL),
        start: d,
        stop: d + NOISE_SECONDS,
    });

    Score {
        voices,
        length: d + NOISE_SECONDS,
    }
}

/// Render `kind` to mono samples in [-1, 1]. `param` is the blip frequency for
/// `ScanBlip` and ignored otherwise; `seed` drives the noise.
pub fn render_cue(kind: CueKind, param: f32, sample_rate: f32, seed: u64) -> Vec<f32> {
    if !(sample_rate.is_finite() && sample_rate > 0.0) {
        log::warn!("render_cue: invalid sample rate {}", sample_rate);
        return Vec::new();
    }
    let score = match kind {
        CueKind::Click => click(),
        CueKind::Hover => hover(),
        CueKind::Transition => transition(),
        CueKind::ScanBlip => scan_blip(param),
        CueKind::EnergyBuildup => energy_buildup(),
    };
    score.render(sample_rate, &mut Rng::new(seed))
}
