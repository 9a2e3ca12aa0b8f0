//! Sound cues
//!
//! The simulation only says *that* something happened; this module turns
//! those moments into sounds. Playback is fire-and-forget.

use std::cell::RefCell;

use crate::settings::Settings;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundCue {
    /// Enemy fired a projectile
    Shoot,
    /// Last life lost
    GameOver,
}

impl SoundCue {
    pub const ALL: [SoundCue; 2] = [SoundCue::Shoot, SoundCue::GameOver];

    /// Path relative to the page
    pub fn path(&self) -> &'static str {
        match self {
            SoundCue::Shoot => "audio/bullet-shoot.mp3",
            SoundCue::GameOver => "audio/stitch-cry.mp3",
        }
    }

    /// Mix level before master/sfx volume
    pub fn base_volume(&self) -> f32 {
        match self {
            SoundCue::Shoot => 0.5,
            SoundCue::GameOver => 0.8,
        }
    }
}

/// Substituted for any cue whose own file fails to load
pub const FALLBACK_SOUND: &str = "audio/default-sound.mp3";

/// Anything that can play a cue
pub trait CuePlayer {
    fn play(&self, cue: SoundCue);
}

/// Discards every cue
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentAudio;

impl CuePlayer for SilentAudio {
    fn play(&self, cue: SoundCue) {
        log::trace!("(silent) {:?}", cue);
    }
}

/// Remembers every cue it was asked to play
#[derive(Debug, Default)]
pub struct RecordingAudio {
    played: RefCell<Vec<SoundCue>>,
}

impl RecordingAudio {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn played(&self) -> Vec<SoundCue> {
        self.played.borrow().clone()
    }

    pub fn count(&self, cue: SoundCue) -> usize {
        self.played.borrow().iter().filter(|&&c| c == cue).count()
    }
}

impl CuePlayer for RecordingAudio {
    fn play(&self, cue: SoundCue) {
        self.played.borrow_mut().push(cue);
    }
}

/// Audio manager for the game
pub struct AudioManager {
    #[cfg(target_arch = "wasm32")]
    clips: std::collections::HashMap<SoundCue, web_sys::HtmlAudioElement>,
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
}

impl AudioManager {
    /// Create the manager and start loading every cue
    pub fn new(settings: &Settings) -> Self {
        let mut audio = Self {
            #[cfg(target_arch = "wasm32")]
            clips: web::load_clips(),
            master_volume: 1.0,
            sfx_volume: 1.0,
            muted: false,
        };
        audio.apply_settings(settings);
        audio
    }

    /// Take volumes and mute from the settings. Volumes are clamped to 0.0 - 1.0.
    pub fn apply_settings(&mut self, settings: &Settings) {
        self.master_volume = settings.master_volume.clamp(0.0, 1.0);
        self.sfx_volume = settings.sfx_volume.clamp(0.0, 1.0);
        self.muted = settings.muted;
    }

    /// Final playback volume for a cue
    pub fn cue_volume(&self, cue: SoundCue) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume * cue.base_volume()
        }
    }
}

impl CuePlayer for AudioManager {
    fn play(&self, cue: SoundCue) {
        let vol = self.cue_volume(cue);
        if vol <= 0.0 {
            return;
        }

        #[cfg(target_arch = "wasm32")]
        {
            if let Some(clip) = self.clips.get(&cue) {
                web::play_clip(clip, vol);
            }
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            log::debug!("Play {:?} at volume {:.2}", cue, vol);
        }
    }
}

#[cfg(target_arch = "wasm32")]
mod web {
    use std::collections::HashMap;

    use wasm_bindgen::JsCast;
    use wasm_bindgen::closure::Closure;
    use web_sys::HtmlAudioElement;

    use super::{FALLBACK_SOUND, SoundCue};

    pub fn load_clips() -> HashMap<SoundCue, HtmlAudioElement> {
        SoundCue::ALL
            .iter()
            .filter_map(|&cue| match load_clip(cue) {
                Some(clip) => Some((cue, clip)),
                None => {
                    log::warn!("Failed to create audio element for {:?} - cue disabled", cue);
                    None
                }
            })
            .collect()
    }

    /// Create the element; on a load error swap in the fallback file once
    fn load_clip(cue: SoundCue) -> Option<HtmlAudioElement> {
        let clip = HtmlAudioElement::new_with_src(cue.path()).ok()?;

        {
            let target = clip.clone();
            let on_error = Closure::<dyn FnMut()>::new(move || {
                log::error!("{} failed to load, using fallback", cue.path());
                target.set_onerror(None);
                target.set_src(FALLBACK_SOUND);
            });
            clip.set_onerror(Some(on_error.as_ref().unchecked_ref()));
            on_error.forget();
        }

        {
            let on_ready = Closure::<dyn FnMut()>::new(move || {
                log::info!("Sound loaded: {}", cue.path());
            });
            clip.set_oncanplaythrough(Some(on_ready.as_ref().unchecked_ref()));
            on_ready.forget();
        }

        Some(clip)
    }

    pub fn play_clip(clip: &HtmlAudioElement, vol: f32) {
        clip.set_volume(vol as f64);
        clip.set_current_time(0.0);
        // Autoplay rejections are expected before the first key press
        let _ = clip.play();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cue_volume_scales_and_mutes() {
        let settings = Settings {
            master_volume: 0.5,
            sfx_volume: 1.0,
            ..Settings::default()
        };
        let mut audio = AudioManager::new(&settings);
        assert!((audio.cue_volume(SoundCue::Shoot) - 0.25).abs() < 1e-6);
        assert!((audio.cue_volume(SoundCue::GameOver) - 0.4).abs() < 1e-6);

        let mut muted = settings.clone();
        muted.toggle_muted();
        audio.apply_settings(&muted);
        assert_eq!(audio.cue_volume(SoundCue::Shoot), 0.0);

        audio.apply_settings(&settings);
        assert!((audio.cue_volume(SoundCue::Shoot) - 0.25).abs() < 1e-6);
    }

    #[test]
    fn test_volume_clamped() {
        let mut settings = Settings {
            master_volume: 3.0,
            sfx_volume: -1.0,
            ..Settings::default()
        };
        let mut audio = AudioManager::new(&settings);
        assert_eq!(audio.cue_volume(SoundCue::Shoot), 0.0);

        settings.sfx_volume = 1.0;
        audio.apply_settings(&settings);
        assert!((audio.cue_volume(SoundCue::Shoot) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_silent_audio_accepts_every_cue() {
        let audio = SilentAudio;
        for cue in SoundCue::ALL {
            audio.play(cue);
        }
    }

    #[test]
    fn test_recording_audio() {
        let audio = RecordingAudio::new();
        audio.play(SoundCue::Shoot);
        audio.play(SoundCue::Shoot);
        audio.play(SoundCue::GameOver);
        assert_eq!(audio.count(SoundCue::Shoot), 2);
        assert_eq!(audio.played().last(), Some(&SoundCue::GameOver));
    }
}
