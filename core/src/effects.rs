use alloc::collections::BTreeSet;
use alloc::string::{String, ToString};
use serde::{Deserialize, Serialize};

pub const VICTORY_EXPLOSION: &str = "VictoryExplosion";
pub const LOSE_EXPLOSION: &str = "LoseExplosion";

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SoundCue {
    Deal,
    DealLast,
    Select,
}

impl SoundCue {
    pub const fn resource_name(self) -> &'static str {
        use SoundCue::*;
        match self {
            Deal => "deal",
            DealLast => "deal_last",
            Select => "select",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticleEffect {
    pub name: String,
}

impl ParticleEffect {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
        }
    }
}

/// Resolves named particle effects; `None` means the effect is simply not spawned.
pub trait EffectLibrary {
    fn particle_effect(&self, name: &str) -> Option<ParticleEffect>;
}

/// Library that knows a fixed set of effect names.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NamedEffects {
    names: BTreeSet<String>,
}

impl NamedEffects {
    pub fn new<'a>(names: impl IntoIterator<Item = &'a str>) -> Self {
        Self {
            names: names.into_iter().map(ToString::to_string).collect(),
        }
    }

    pub fn empty() -> Self {
        Self::new(core::iter::empty())
    }
}

impl Default for NamedEffects {
    fn default() -> Self {
        Self::new([VICTORY_EXPLOSION, LOSE_EXPLOSION])
    }
}

impl EffectLibrary for NamedEffects {
    fn particle_effect(&self, name: &str) -> Option<ParticleEffect> {
        if self.names.contains(name) {
            Some(ParticleEffect::new(name))
        } else {
            log::debug!("no particle effect named {:?}", name);
            None
        }
    }
}
