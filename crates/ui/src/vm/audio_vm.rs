use services::AudioMixer;

#[derive(Clone, Debug, PartialEq)]
pub struct AudioVm {
    pub muted: bool,
    pub volume: f32,
    pub volume_label: String,
    pub mute_label: &'static str,
}

impl From<&AudioMixer> for AudioVm {
    fn from(mixer: &AudioMixer) -> Self {
        let muted = mixer.is_muted();
        // The slider sits at zero while muted; the stored level comes back on unmute.
        let volume = if muted { 0.0 } else { mixer.music_volume() };
        Self {
            muted,
            volume,
            volume_label: format!("{:.0}%", volume * 100.0),
            mute_label: if muted { "Unmute" } else { "Mute" },
        }
    }
}
