use std::sync::{Arc, Mutex};

use crate::error::AudioError;

/// Background music volume until the player changes it.
pub const DEFAULT_MUSIC_VOLUME: f32 = 0.3;

/// Volume of answer sound effects.
pub const EFFECT_VOLUME: f32 = 0.8;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MusicTrack {
    Quiz,
    Results,
}

impl MusicTrack {
    #[must_use]
    pub fn file_name(self) -> &'static str {
        match self {
            MusicTrack::Quiz => "quiz-music.mp3",
            MusicTrack::Results => "results-music.mp3",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SoundEffect {
    Correct,
    Incorrect,
}

impl SoundEffect {
    #[must_use]
    pub fn file_name(self) -> &'static str {
        match self {
            SoundEffect::Correct => "correct.mp3",
            SoundEffect::Incorrect => "incorrect.mp3",
        }
    }
}

/// Playback device contract.
///
/// Calls are fire-and-forget. A backend keeps at most one music track and one
/// effect loaded, and must stop the previous one before loading a replacement.
pub trait AudioBackend: Send + Sync {
    /// # Errors
    ///
    /// Returns `AudioError` if the track cannot be loaded or played.
    fn play_music(&self, track: MusicTrack, volume: f32, looping: bool) -> Result<(), AudioError>;

    /// # Errors
    ///
    /// Returns `AudioError` if the backend is unreachable.
    fn stop_music(&self) -> Result<(), AudioError>;

    /// Change the volume of the active music track.
    ///
    /// # Errors
    ///
    /// Returns `AudioError` if the backend is unreachable.
    fn set_music_volume(&self, volume: f32) -> Result<(), AudioError>;

    /// # Errors
    ///
    /// Returns `AudioError` if the effect cannot be loaded or played.
    fn play_effect(&self, effect: SoundEffect, volume: f32) -> Result<(), AudioError>;
}

/// Backend that plays nothing. Used when no output device is available.
#[derive(Clone, Copy, Debug, Default)]
pub struct SilentAudio;

impl AudioBackend for SilentAudio {
    fn play_music(&self, _track: MusicTrack, _volume: f32, _looping: bool) -> Result<(), AudioError> {
        Ok(())
    }

    fn stop_music(&self) -> Result<(), AudioError> {
        Ok(())
    }

    fn set_music_volume(&self, _volume: f32) -> Result<(), AudioError> {
        Ok(())
    }

    fn play_effect(&self, _effect: SoundEffect, _volume: f32) -> Result<(), AudioError> {
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AudioCall {
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

/// In-memory backend that records every call, for tests and prototyping.
///
/// With `failing()` every call is recorded and then reported as a failure.
#[derive(Clone, Default)]
pub struct RecordingAudio {
    calls: Arc<Mutex<Vec<AudioCall>>>,
    fail: bool,
}

impl RecordingAudio {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn failing() -> Self {
        Self {
            calls: Arc::default(),
            fail: true,
        }
    }

    #[must_use]
    pub fn calls(&self) -> Vec<AudioCall> {
        self.calls.lock().map(|calls| calls.clone()).unwrap_or_default()
    }

    pub fn clear(&self) {
        if let Ok(mut calls) = self.calls.lock() {
            calls.clear();
        }
    }

    fn record(&self, call: AudioCall) -> Result<(), AudioError> {
        self.calls
            .lock()
            .map_err(|_| AudioError::Disconnected)?
            .push(call);
        if self.fail {
            return Err(AudioError::Playback("recording backend set to fail".into()));
        }
        Ok(())
    }
}

impl AudioBackend for RecordingAudio {
    fn play_music(&self, track: MusicTrack, volume: f32, looping: bool) -> Result<(), AudioError> {
        self.record(AudioCall::PlayMusic {
            track,
            volume,
            looping,
        })
    }

    fn stop_music(&self) -> Result<(), AudioError> {
        self.record(AudioCall::StopMusic)
    }

    fn set_music_volume(&self, volume: f32) -> Result<(), AudioError> {
        self.record(AudioCall::SetMusicVolume(volume))
    }

    fn play_effect(&self, effect: SoundEffect, volume: f32) -> Result<(), AudioError> {
        self.record(AudioCall::PlayEffect { effect, volume })
    }
}

/// Player-facing audio state on top of a backend: volume, mute and the
/// active background track.
#[derive(Clone)]
pub struct AudioMixer {
    backend: Arc<dyn AudioBackend>,
    music_volume: f32,
    muted: bool,
    current_track: Option<MusicTrack>,
}

impl AudioMixer {
    #[must_use]
    pub fn new(backend: Arc<dyn AudioBackend>) -> Self {
        Self {
            backend,
            music_volume: DEFAULT_MUSIC_VOLUME,
            muted: false,
            current_track: None,
        }
    }

    #[must_use]
    pub fn silent() -> Self {
        Self::new(Arc::new(SilentAudio))
    }

    #[must_use]
    pub fn with_muted(mut self, muted: bool) -> Self {
        self.muted = muted;
        self
    }

    #[must_use]
    pub fn music_volume(&self) -> f32 {
        self.music_volume
    }

    #[must_use]
    pub fn is_muted(&self) -> bool {
        self.muted
    }

    #[must_use]
    pub fn current_track(&self) -> Option<MusicTrack> {
        self.current_track
    }

    fn effective_music_volume(&self) -> f32 {
        if self.muted { 0.0 } else { self.music_volume }
    }

    /// Replace the background track with `track`, looping.
    pub fn play_music(&mut self, track: MusicTrack) {
        let result = self
            .backend
            .play_music(track, self.effective_music_volume(), true);
        self.current_track = report("play music", result).then_some(track);
    }

    pub fn stop_music(&mut self) {
        if self.current_track.take().is_some() {
            report("stop music", self.backend.stop_music());
        }
    }

    pub fn play_effect(&self, effect: SoundEffect) {
        let volume = if self.muted { 0.0 } else { EFFECT_VOLUME };
        report("play effect", self.backend.play_effect(effect, volume));
    }

    pub fn toggle_mute(&mut self) {
        self.muted = !self.muted;
        self.apply_music_volume();
    }

    /// Set the music volume (clamped to `0.0..=1.0`). Changing the volume unmutes.
    pub fn set_music_volume(&mut self, volume: f32) {
        if volume.is_nan() {
            return;
        }
        self.music_volume = volume.clamp(0.0, 1.0);
        self.muted = false;
        self.apply_music_volume();
    }

    fn apply_music_volume(&self) {
        if self.current_track.is_some() {
            report(
                "set volume",
                self.backend.set_music_volume(self.effective_music_volume()),
            );
        }
    }
}

fn report(action: &str, result: Result<(), AudioError>) -> bool {
    match result {
        Ok(()) => true,
        Err(err) => {
            log::warn!("audio: {action} failed: {err}");
            false
        }
    }
}
