//! Interaction sound cues.
//!
//! The scene queues cues as things happen; the web layer drains the queue
//! each frame and synthesizes them only when sound is enabled.

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SoundCue {
    Grab,
    Pop,
    Swoosh,
    Thud,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Waveform {
    Sine,
    Sawtooth,
    Triangle,
}

/// One short oscillator blip with an exponential frequency sweep and gain
/// decay.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SoundSpec {
    pub frequency: f32,
    pub duration: f32,
    pub waveform: Waveform,
    pub gain: f32,
    /// Frequency multiplier reached at the end of the cue.
    pub sweep: f32,
}

impl SoundSpec {
    #[inline]
    pub fn end_frequency(&self) -> f32 {
        self.frequency * self.sweep
    }
}

impl SoundCue {
    pub const ALL: [SoundCue; 4] = [SoundCue::Grab, SoundCue::Pop, SoundCue::Swoosh, SoundCue::Thud];

    pub fn spec(self) -> SoundSpec {
        match self {
            SoundCue::Grab => SoundSpec {
                frequency: 220.0,
                duration: 0.08,
                waveform: Waveform::Sine,
                gain: 0.15,
                sweep: 0.5,
            },
            // the only rising cue
            SoundCue::Pop => SoundSpec {
                frequency: 660.0,
                duration: 0.12,
                waveform: Waveform::Sine,
                gain: 0.2,
                sweep: 1.5,
            },
            SoundCue::Swoosh => SoundSpec {
                frequency: 180.0,
                duration: 0.25,
                waveform: Waveform::Sawtooth,
                gain: 0.08,
                sweep: 0.5,
            },
            SoundCue::Thud => SoundSpec {
                frequency: 80.0,
                duration: 0.15,
                waveform: Waveform::Triangle,
                gain: 0.2,
                sweep: 0.5,
            },
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            SoundCue::Grab => "grab",
            SoundCue::Pop => "pop",
            SoundCue::Swoosh => "swoosh",
            SoundCue::Thud => "thud",
        }
    }
}
