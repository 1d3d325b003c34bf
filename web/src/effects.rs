use followtheorder_core::{
    EffectLibrary, LOSE_EXPLOSION, ParticleEffect, SoundCue, VICTORY_EXPLOSION,
};

/// Particle effects available as CSS animations.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub(crate) struct CssEffects;

impl CssEffects {
    pub(crate) fn class_for(name: &str) -> Option<&'static str> {
        match name {
            VICTORY_EXPLOSION => Some("victory-explosion"),
            LOSE_EXPLOSION => Some("lose-explosion"),
            _ => None,
        }
    }
}

impl EffectLibrary for CssEffects {
    fn particle_effect(&self, name: &str) -> Option<ParticleEffect> {
        Self::class_for(name).map(|_| ParticleEffect::new(name))
    }
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct SoundBoard {
    muted: bool,
}

impl SoundBoard {
    pub(crate) const fn new(muted: bool) -> Self {
        Self { muted }
    }

    pub(crate) fn source_for(cue: SoundCue) -> String {
        format!("sounds/{}.wav", cue.resource_name())
    }

    pub(crate) fn play(&self, cue: SoundCue) {
        if self.muted {
            return;
        }

        let src = Self::source_for(cue);
        match web_sys::HtmlAudioElement::new_with_src(&src) {
            Ok(audio) => {
                if let Err(err) = audio.play() {
                    log::warn!("failed to play {}: {:?}", src, err);
                }
            }
            Err(err) => log::error!("failed to load {}: {:?}", src, err),
        }
    }
}
