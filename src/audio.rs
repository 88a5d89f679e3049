use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink, Source, source::Buffered};
use std::fs::File;
use std::io::BufReader;

type Effect = Buffered<Decoder<BufReader<File>>>;

/// Sound effect playback. Every slot is optional: a missing device or a
/// missing/broken file leaves that slot silent without touching the rest
/// of the game.
pub struct AudioManager {
    /// Output stream must stay alive for as long as anything plays.
    output: Option<(OutputStream, OutputStreamHandle)>,
    fire_sound: Option<Effect>,
    jump_sound: Option<Effect>,
}

impl AudioManager {
    pub fn new() -> Self {
        let output = match OutputStream::try_default() {
            Ok(pair) => Some(pair),
            Err(err) => {
                eprintln!("Warning: failed to initialize audio: {err}");
                eprintln!("Continuing without sound...");
                None
            }
        };

        let (fire_sound, jump_sound) = if output.is_some() {
            (
                load_effect("assets/sounds/fire.wav"),
                load_effect("assets/sounds/jump.wav"),
            )
        } else {
            (None, None)
        };

        Self {
            output,
            fire_sound,
            jump_sound,
        }
    }

    pub fn play_fire(&self) {
        self.play(&self.fire_sound, 0.3);
    }

    pub fn play_jump(&self) {
        self.play(&self.jump_sound, 0.3);
    }

    fn play(&self, effect: &Option<Effect>, volume: f32) {
        let (Some((_, handle)), Some(effect)) = (self.output.as_ref(), effect) else {
            return;
        };
        // Playback errors are ignored; sound must never take down a frame
        if let Ok(sink) = Sink::try_new(handle) {
            sink.set_volume(volume);
            sink.append(effect.clone());
            sink.detach();
        }
    }
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new()
    }
}

/// Pre-load and buffer one effect. Absent files are normal (the game
/// ships without sound assets); decode failures get a warning.
fn load_effect(path: &str) -> Option<Effect> {
    let file = File::open(path).ok()?;
    match Decoder::new(BufReader::new(file)) {
        Ok(source) => Some(source.buffered()),
        Err(err) => {
            eprintln!("Warning: could not decode {path}: {err}");
            None
        }
    }
}
