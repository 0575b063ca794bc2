use std::collections::{HashMap, HashSet};
use std::fs;
use std::io::{BufReader, Cursor};
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;

use log::{error, warn};
use rodio::{Decoder, OutputStream, Sink, Source};

/// Logical identifiers for the discrete sound effects.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum SoundType {
    Ufo,
    Fire,
    PlayerDies,
    InvaderDies,
    Invader1,
    Invader2,
    Invader3,
    Invader4,
    UfoHit,
}

/// Message from the main thread to the audio thread.
struct Message {
    sound_type: SoundType,
    on: bool,
}

/// Mapping between an output-latch bit and a logical sound.
struct SoundInfo {
    sound_type: SoundType,
    path: &'static str,
    port: u8,
    bit: u8,
}

impl SoundInfo {
    const fn new(sound_type: SoundType, path: &'static str, port: u8, bit: u8) -> Self {
        Self {
            sound_type,
            path,
            port,
            bit,
        }
    }
}

/// All sound definitions, keyed to the OUT 3 and OUT 5 latch bits.
///
/// Paths are relative to the workspace root.
const ALL_SOUNDS: &[SoundInfo] = &[
    // Port 3: bit 0 = UFO on screen (loops), bit 1 = shot,
    // bit 2 = player die, bit 3 = invader die.
    SoundInfo::new(SoundType::Ufo, "assets/sounds/ufo_lowpitch.wav", 3, 0),
    SoundInfo::new(SoundType::Fire, "assets/sounds/shoot.wav", 3, 1),
    SoundInfo::new(SoundType::PlayerDies, "assets/sounds/explosion.wav", 3, 2),
    SoundInfo::new(
        SoundType::InvaderDies,
        "assets/sounds/invaderkilled.wav",
        3,
        3,
    ),
    // Port 5: fleet movement notes and the UFO hit.
    SoundInfo::new(SoundType::Invader1, "assets/sounds/fastinvader1.wav", 5, 0),
    SoundInfo::new(SoundType::Invader2, "assets/sounds/fastinvader2.wav", 5, 1),
    SoundInfo::new(SoundType::Invader3, "assets/sounds/fastinvader3.wav", 5, 2),
    SoundInfo::new(SoundType::Invader4, "assets/sounds/fastinvader4.wav", 5, 3),
    SoundInfo::new(SoundType::UfoHit, "assets/sounds/explosion.wav", 5, 4),
];

struct SoundThread {
    receiver: Receiver<Message>,
    sound_files: HashMap<SoundType, Vec<u8>>,
}

impl SoundThread {
    fn new(receiver: Receiver<Message>) -> Option<Self> {
        let mut sound_files = HashMap::new();

        for info in ALL_SOUNDS {
            match fs::read(info.path) {
                Ok(bytes) => {
                    sound_files.insert(info.sound_type, bytes);
                }
                Err(e) => {
                    warn!(
                        "failed to load sound {:?} from {}: {e}",
                        info.sound_type, info.path
                    );
                }
            }
        }

        if sound_files.is_empty() {
            warn!("no sound files could be loaded, disabling audio");
            return None;
        }

        Some(Self {
            receiver,
            sound_files,
        })
    }

    fn run(self) {
        // The stream must outlive every sink playing into it.
        let Ok((_stream, stream_handle)) = OutputStream::try_default() else {
            error!("failed to open default audio output, disabling audio");
            return;
        };

        // The UFO tone loops for as long as its latch bit stays up, so it
        // gets a dedicated sink that can be paused and resumed.
        let Ok(ufo_sink) = Sink::try_new(&stream_handle) else {
            error!("failed to create audio sink, disabling audio");
            return;
        };
        ufo_sink.pause();
        if let Some(bytes) = self.sound_files.get(&SoundType::Ufo) {
            let reader = BufReader::new(Cursor::new(bytes.clone()));
            match Decoder::new(reader) {
                Ok(source) => ufo_sink.append(source.repeat_infinite()),
                Err(e) => error!("failed to decode UFO sound: {e}"),
            }
        }

        while let Ok(msg) = self.receiver.recv() {
            if msg.sound_type == SoundType::Ufo {
                if msg.on {
                    ufo_sink.play();
                } else {
                    ufo_sink.pause();
                }
                continue;
            }

            // Everything else is a one-shot triggered on the rising edge;
            // a detached sink lets effects overlap instead of queueing.
            if !msg.on {
                continue;
            }
            let Some(bytes) = self.sound_files.get(&msg.sound_type) else {
                warn!("no audio data for sound {:?}", msg.sound_type);
                continue;
            };
            let reader = BufReader::new(Cursor::new(bytes.clone()));
            match Decoder::new(reader) {
                Ok(source) => match Sink::try_new(&stream_handle) {
                    Ok(sink) => {
                        sink.append(source);
                        sink.detach();
                    }
                    Err(e) => error!("failed to create one-shot sink: {e}"),
                },
                Err(e) => {
                    error!("failed to decode sound {:?}: {e}", msg.sound_type);
                }
            }
        }
    }
}

/// Main-thread controller that watches the sound latches and tells the
/// audio thread about bit edges.
pub struct SoundManager {
    sender: Sender<Message>,
    active: HashSet<SoundType>,
}

impl SoundManager {
    /// Try to start the audio thread. Returns `None` when audio cannot be
    /// brought up; the game then runs silently.
    pub fn new() -> Option<Self> {
        let (sender, receiver) = mpsc::channel::<Message>();

        let sound_thread = SoundThread::new(receiver)?;
        if let Err(e) = thread::Builder::new()
            .name("invaders_sound".into())
            .spawn(move || sound_thread.run())
        {
            error!("failed to spawn audio thread: {e}");
            return None;
        }

        Some(Self {
            sender,
            active: HashSet::new(),
        })
    }

    /// Edge-detect the OUT 3 and OUT 5 latches against the previous frame
    /// and notify the audio thread about every bit that toggled.
    pub fn update(&mut self, out3: u8, out5: u8) {
        for info in ALL_SOUNDS {
            let value = match info.port {
                3 => out3,
                5 => out5,
                _ => 0,
            };

            let sound_type = info.sound_type;
            let was_playing = self.active.contains(&sound_type);
            let on = (value & (1 << info.bit)) != 0;

            if on {
                self.active.insert(sound_type);
            } else {
                self.active.remove(&sound_type);
            }

            if on != was_playing {
                // A send error means the audio thread has gone away; new
                // sounds simply stop triggering.
                let _ = self.sender.send(Message { sound_type, on });
            }
        }
    }
}
