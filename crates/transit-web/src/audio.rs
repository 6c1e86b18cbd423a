//! Web Audio synthesis for the show's cues. Everything is generated with
//! oscillators; there are no sample files.

use std::cell::Cell;
use std::rc::Rc;
use transit_engine::{AudioCues, AudioError, Cue};
use wasm_bindgen::prelude::*;
use web_sys::{AudioContext, AudioScheduledSourceNode, GainNode, OscillatorNode, OscillatorType};

const MASTER_VOLUME: f32 = 0.3;
const DRONE_HZ: f32 = 60.0;
const DRONE_WOBBLE_HZ: f32 = 0.15;
const DRONE_WOBBLE_DEPTH: f32 = 5.0;
const DRONE_LEVEL: f32 = 0.4;
/// Time constant of the drone fade-in, seconds.
const DRONE_FADE: f64 = 5.0;
const CHORD_HZ: [f32; 4] = [261.63, 329.63, 392.0, 523.25];

fn audio_err(e: JsValue) -> AudioError {
    AudioError(format!("{e:?}"))
}

struct Graph {
    ctx: AudioContext,
    master: GainNode,
    drone_gain: GainNode,
}

/// Oscillator-based cue player. Builds its audio graph on `ensure_started`.
#[derive(Default)]
pub struct WebAudioCues {
    graph: Option<Graph>,
    /// Set when the context's `resume()` promise rejected.
    resume_rejected: Rc<Cell<bool>>,
}

fn note_resume_rejected(flag: &Cell<bool>, reason: &str) {
    log::warn!("audio context did not resume: {reason}");
    flag.set(true);
}

impl WebAudioCues {
    pub fn new() -> Self {
        Self::default()
    }

    fn build_graph() -> Result<Graph, JsValue> {
        let ctx = AudioContext::new()?;
        let master = ctx.create_gain()?;
        master.gain().set_value(MASTER_VOLUME);
        master.connect_with_audio_node(&ctx.destination())?;

        // Low hum with a slow frequency wobble.
        let drone = ctx.create_oscillator()?;
        drone.set_type(OscillatorType::Sine);
        drone.frequency().set_value(DRONE_HZ);
        let wobble = ctx.create_oscillator()?;
        wobble.frequency().set_value(DRONE_WOBBLE_HZ);
        let wobble_gain = ctx.create_gain()?;
        wobble_gain.gain().set_value(DRONE_WOBBLE_DEPTH);
        wobble.connect_with_audio_node(&wobble_gain)?;
        wobble_gain.connect_with_audio_param(&drone.frequency())?;
        AudioScheduledSourceNode::start(&wobble)?;

        let drone_gain = ctx.create_gain()?;
        drone_gain.gain().set_value(0.0);
        drone.connect_with_audio_node(&drone_gain)?;
        drone_gain.connect_with_audio_node(&master)?;
        AudioScheduledSourceNode::start(&drone)?;

        Ok(Graph { ctx, master, drone_gain })
    }

    /// Ask a suspended context to resume. A rejection is logged and flagged
    /// so the next cue retries.
    fn resume(graph: &Graph, flag: &Rc<Cell<bool>>) -> Result<(), JsValue> {
        let promise = graph.ctx.resume()?;
        let flag = Rc::clone(flag);
        let on_reject = Closure::once(move |e: JsValue| note_resume_rejected(&flag, &format!("{e:?}")));
        let _ = promise.catch(&on_reject);
        // Released when the promise settles.
        on_reject.forget();
        Ok(())
    }

    pub fn resume_rejected(&self) -> bool {
        self.resume_rejected.get()
    }

    fn voice(graph: &Graph) -> Result<(OscillatorNode, GainNode), JsValue> {
        let osc = graph.ctx.create_oscillator()?;
        let gain = graph.ctx.create_gain()?;
        osc.connect_with_audio_node(&gain)?;
        gain.connect_with_audio_node(&graph.master)?;
        Ok((osc, gain))
    }

    fn fade_in_drone(graph: &Graph) -> Result<(), JsValue> {
        let t = graph.ctx.current_time();
        graph.drone_gain.gain().set_target_at_time(DRONE_LEVEL, t, DRONE_FADE)?;
        Ok(())
    }

    fn blip(graph: &Graph) -> Result<(), JsValue> {
        let t = graph.ctx.current_time();
        let (osc, gain) = Self::voice(graph)?;
        osc.frequency().set_value_at_time(800.0, t)?;
        osc.frequency().exponential_ramp_to_value_at_time(1200.0, t + 0.1)?;
        gain.gain().set_value_at_time(0.1, t)?;
        gain.gain().exponential_ramp_to_value_at_time(0.001, t + 0.1)?;
        AudioScheduledSourceNode::start(&osc)?;
        AudioScheduledSourceNode::stop_with_when(&osc, t + 0.1)?;
        Ok(())
    }

    fn sweep(graph: &Graph) -> Result<(), JsValue> {
        let t = graph.ctx.current_time();
        let (osc, gain) = Self::voice(graph)?;
        osc.set_type(OscillatorType::Triangle);
        osc.frequency().set_value_at_time(440.0, t)?;
        gain.gain().set_value_at_time(0.05, t)?;
        gain.gain().linear_ramp_to_value_at_time(0.0, t + 0.5)?;
        AudioScheduledSourceNode::start(&osc)?;
        AudioScheduledSourceNode::stop_with_when(&osc, t + 0.5)?;
        Ok(())
    }

    /// Staggered major chord swelling in over a few seconds and dying away by 8 s.
    fn chord(graph: &Graph) -> Result<(), JsValue> {
        let t = graph.ctx.current_time();
        for (i, hz) in CHORD_HZ.iter().enumerate() {
            let (osc, gain) = Self::voice(graph)?;
            osc.frequency().set_value(*hz);
            gain.gain().set_value_at_time(0.0, t)?;
            gain.gain().linear_ramp_to_value_at_time(0.05, t + 2.0 + i as f64 * 0.5)?;
            gain.gain().linear_ramp_to_value_at_time(0.0, t + 8.0)?;
            AudioScheduledSourceNode::start(&osc)?;
            AudioScheduledSourceNode::stop_with_when(&osc, t + 8.0)?;
        }
        Ok(())
    }
}

impl AudioCues for WebAudioCues {
    fn ensure_started(&mut self) -> Result<(), AudioError> {
        if self.graph.is_some() {
            return Ok(());
        }
        let graph = Self::build_graph().map_err(audio_err)?;
        // Contexts created outside a gesture start suspended.
        Self::resume(&graph, &self.resume_rejected).map_err(audio_err)?;
        log::info!("audio graph ready");
        self.graph = Some(graph);
        Ok(())
    }

    fn play_cue(&mut self, cue: Cue) {
        let Some(graph) = &self.graph else { return };
        if self.resume_rejected.replace(false) {
            if let Err(e) = Self::resume(graph, &self.resume_rejected) {
                log::warn!("audio resume retry failed: {}", audio_err(e));
            }
        }
        let result = match cue {
            Cue::AmbientFadeIn => Self::fade_in_drone(graph),
            Cue::ShortBlip => Self::blip(graph),
            Cue::Sweep => Self::sweep(graph),
            Cue::SuccessChord => Self::chord(graph),
        };
        if let Err(e) = result {
            log::warn!("cue {cue:?} failed: {}", audio_err(e));
        }
    }
}
