use lob_core::{SoundCue, Waveform};
use web_sys as web;

/// Tiny one-shot synth for interaction cues.
///
/// The audio context is created on first use, which must be inside a user
/// gesture for browsers to allow playback.
#[derive(Default)]
pub struct SoundBoard {
    ctx: Option<web::AudioContext>,
    failed: bool,
}

fn create_gain(audio_ctx: &web::AudioContext, value: f32, label: &str) -> Option<web::GainNode> {
    match web::GainNode::new(audio_ctx) {
        Ok(g) => {
            g.gain().set_value(value);
            Some(g)
        }
        Err(e) => {
            log::error!("{} GainNode error: {:?}", label, e);
            None
        }
    }
}

impl SoundBoard {
    fn context(&mut self) -> Option<&web::AudioContext> {
        if self.ctx.is_none() && !self.failed {
            match web::AudioContext::new() {
                Ok(ctx) => self.ctx = Some(ctx),
                Err(e) => {
                    log::error!("[audio] AudioContext error: {:?}", e);
                    self.failed = true;
                }
            }
        }
        let ctx = self.ctx.as_ref()?;
        if ctx.state() == web::AudioContextState::Suspended {
            _ = ctx.resume();
        }
        Some(ctx)
    }

    /// Call from the sound toggle click so the context unlocks.
    pub fn unlock(&mut self) {
        _ = self.context();
    }

    pub fn play(&mut self, cue: SoundCue) {
        let Some(ctx) = self.context() else {
            return;
        };
        let spec = cue.spec();
        let osc = match web::OscillatorNode::new(ctx) {
            Ok(o) => o,
            Err(e) => {
                log::error!("[audio] {} OscillatorNode error: {:?}", cue.name(), e);
                return;
            }
        };
        osc.set_type(match spec.waveform {
            Waveform::Sine => web::OscillatorType::Sine,
            Waveform::Sawtooth => web::OscillatorType::Sawtooth,
            Waveform::Triangle => web::OscillatorType::Triangle,
        });
        let Some(gain) = create_gain(ctx, spec.gain, cue.name()) else {
            return;
        };

        let t0 = ctx.current_time();
        let t1 = t0 + spec.duration as f64;
        osc.frequency().set_value(spec.frequency);
        _ = osc
            .frequency()
            .exponential_ramp_to_value_at_time(spec.end_frequency(), t1);
        // exponential ramps cannot reach zero
        _ = gain.gain().exponential_ramp_to_value_at_time(0.001, t1);

        _ = osc.connect_with_audio_node(&gain);
        _ = gain.connect_with_audio_node(&ctx.destination());
        _ = osc.start_with_when(t0);
        _ = osc.stop_with_when(t1 + 0.02);
    }
}
