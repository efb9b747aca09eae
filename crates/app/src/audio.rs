use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;

use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink, Source};
use services::{AudioBackend, AudioError, MusicTrack, SoundEffect};

enum Command {
    PlayMusic {
        track: MusicTrack,
        volume: f32,
        looping: bool,
    },
    StopMusic,
    SetMusicVolume(f32),
    PlayEffect {
        effect: SoundEffect,
        volume: f32,
    },
}

/// rodio playback on a dedicated thread.
///
/// The output stream is not `Send`, so the thread owns it together with the
/// music and effect sinks; callers only push commands. Load failures surface
/// on that thread and are logged there.
pub struct RodioAudio {
    commands: Sender<Command>,
}

impl RodioAudio {
    /// Open the default output device and start the audio thread.
    ///
    /// # Errors
    ///
    /// Returns `AudioError::Device` when no output device can be opened.
    pub fn spawn(sounds_dir: PathBuf) -> Result<Self, AudioError> {
        let (commands, inbox) = mpsc::channel();
        let (ready_tx, ready_rx) = mpsc::sync_channel(1);

        thread::Builder::new()
            .name("audio".into())
            .spawn(move || {
                let (stream, handle) = match OutputStream::try_default() {
                    Ok(pair) => pair,
                    Err(err) => {
                        let _ = ready_tx.send(Err(AudioError::Device(err.to_string())));
                        return;
                    }
                };
                let _ = ready_tx.send(Ok(()));
                Player {
                    _stream: stream,
                    handle,
                    sounds_dir,
                    music: None,
                    effect: None,
                }
                .run(&inbox);
            })
            .map_err(|err| AudioError::Device(err.to_string()))?;

        ready_rx.recv().map_err(|_| AudioError::Disconnected)??;
        Ok(Self { commands })
    }

    fn send(&self, command: Command) -> Result<(), AudioError> {
        self.commands
            .send(command)
            .map_err(|_| AudioError::Disconnected)
    }
}

impl AudioBackend for RodioAudio {
    fn play_music(&self, track: MusicTrack, volume: f32, looping: bool) -> Result<(), AudioError> {
        self.send(Command::PlayMusic {
            track,
            volume,
            looping,
        })
    }

    fn stop_music(&self) -> Result<(), AudioError> {
        self.send(Command::StopMusic)
    }

    fn set_music_volume(&self, volume: f32) -> Result<(), AudioError> {
        self.send(Command::SetMusicVolume(volume))
    }

    fn play_effect(&self, effect: SoundEffect, volume: f32) -> Result<(), AudioError> {
        self.send(Command::PlayEffect { effect, volume })
    }
}

struct Player {
    _stream: OutputStream,
    handle: OutputStreamHandle,
    sounds_dir: PathBuf,
    music: Option<Sink>,
    effect: Option<Sink>,
}

impl Player {
    fn run(mut self, inbox: &Receiver<Command>) {
        // Ends when every `RodioAudio` handle is gone.
        while let Ok(command) = inbox.recv() {
            if let Err(err) = self.apply(command) {
                log::warn!("audio: {err}");
            }
        }
        log::debug!("audio thread stopped");
    }

    fn apply(&mut self, command: Command) -> Result<(), AudioError> {
        match command {
            Command::PlayMusic {
                track,
                volume,
                looping,
            } => {
                stop(&mut self.music);
                let source = load(&self.sounds_dir, track.file_name())?;
                let sink = self.new_sink(volume)?;
                if looping {
                    sink.append(source.repeat_infinite());
                } else {
                    sink.append(source);
                }
                self.music = Some(sink);
            }
            Command::StopMusic => stop(&mut self.music),
            Command::SetMusicVolume(volume) => {
                if let Some(sink) = &self.music {
                    sink.set_volume(volume);
                }
            }
            Command::PlayEffect { effect, volume } => {
                stop(&mut self.effect);
                let source = load(&self.sounds_dir, effect.file_name())?;
                let sink = self.new_sink(volume)?;
                sink.append(source);
                self.effect = Some(sink);
            }
        }
        Ok(())
    }

    fn new_sink(&self, volume: f32) -> Result<Sink, AudioError> {
        let sink = Sink::try_new(&self.handle).map_err(|err| AudioError::Playback(err.to_string()))?;
        sink.set_volume(volume);
        Ok(sink)
    }
}

fn stop(slot: &mut Option<Sink>) {
    if let Some(sink) = slot.take() {
        sink.stop();
    }
}

fn load(dir: &Path, name: &'static str) -> Result<Decoder<BufReader<File>>, AudioError> {
    let file = File::open(dir.join(name)).map_err(|err| AudioError::Load {
        name,
        reason: err.to_string(),
    })?;
    Decoder::new(BufReader::new(file)).map_err(|err| AudioError::Load {
        name,
        reason: err.to_string(),
    })
}
