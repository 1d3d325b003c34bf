use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct IconId(pub u32);

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IconKind {
    Apple,
    Avocado,
    Banana,
    Carrot,
    Cherry,
    Coconut,
    Grapes,
    Kiwi,
    Lemon,
    Mushroom,
    Peach,
    Pear,
    Pineapple,
    Strawberry,
    Tomato,
    Watermelon,
}

impl IconKind {
    pub const ALL: [IconKind; 16] = {
        use IconKind::*;
        [
            Apple, Avocado, Banana, Carrot, Cherry, Coconut, Grapes, Kiwi, Lemon, Mushroom, Peach,
            Pear, Pineapple, Strawberry, Tomato, Watermelon,
        ]
    };

    pub const fn glyph(self) -> &'static str {
        use IconKind::*;
        match self {
            Apple => "🍎",
            Avocado => "🥑",
            Banana => "🍌",
            Carrot => "🥕",
            Cherry => "🍒",
            Coconut => "🥥",
            Grapes => "🍇",
            Kiwi => "🥝",
            Lemon => "🍋",
            Mushroom => "🍄",
            Peach => "🍑",
            Pear => "🍐",
            Pineapple => "🍍",
            Strawberry => "🍓",
            Tomato => "🍅",
            Watermelon => "🍉",
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Icon {
    pub id: IconId,
    pub kind: IconKind,
}

impl Icon {
    pub const fn new(id: IconId, kind: IconKind) -> Self {
        Self { id, kind }
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    #[default]
    Progressing,
    Won,
    Lost,
}

impl GameStatus {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// Rules engine the scene talks to. The scene never decides validity or outcome itself.
pub trait OrderGame {
    fn number_of_items(&self) -> usize;

    /// Icons in game order, which is also the order they get dealt in.
    fn icons(&self) -> &[Icon];

    fn status(&self) -> GameStatus;

    /// `None` when the engine cannot tell, the scene then labels with a sentinel.
    fn number_of_selected_items(&self) -> Option<usize>;

    /// Returns whether the tap was accepted.
    fn tapped_icon(&mut self, id: IconId) -> bool;
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    pub items: u8,
}

impl GameConfig {
    pub const MAX_ITEMS: u8 = IconKind::ALL.len() as u8;

    pub const fn new_unchecked(items: u8) -> Self {
        Self { items }
    }

    pub fn new(items: u8) -> Self {
        Self::new_unchecked(items.clamp(1, Self::MAX_ITEMS))
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new_unchecked(8)
    }
}

/// Remember the order icons were dealt in, then tap them back in that order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FollowTheOrderGame {
    icons: Vec<Icon>,
    selected: usize,
    status: GameStatus,
}

impl FollowTheOrderGame {
    pub fn from_icons(icons: Vec<Icon>) -> Result<Self> {
        if icons.is_empty() {
            return Err(GameError::NoIcons);
        }
        for (i, icon) in icons.iter().enumerate() {
            if icons[..i].iter().any(|other| other.id == icon.id) {
                return Err(GameError::DuplicateIcon(icon.id.0));
            }
        }
        Ok(Self {
            icons,
            selected: 0,
            status: GameStatus::Progressing,
        })
    }

    pub fn generate(seed: u64, config: GameConfig) -> Self {
        use rand::prelude::*;

        let config = GameConfig::new(config.items);
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut kinds = IconKind::ALL;
        kinds.shuffle(&mut rng);

        let icons = kinds
            .iter()
            .take(config.items.into())
            .zip(0..)
            .map(|(&kind, id)| Icon::new(IconId(id), kind))
            .collect();
        log::debug!("generated game with {} icons", config.items);

        Self {
            icons,
            selected: 0,
            status: GameStatus::Progressing,
        }
    }
}

impl OrderGame for FollowTheOrderGame {
    fn number_of_items(&self) -> usize {
        self.icons.len()
    }

    fn icons(&self) -> &[Icon] {
        &self.icons
    }

    fn status(&self) -> GameStatus {
        self.status
    }

    fn number_of_selected_items(&self) -> Option<usize> {
        Some(self.selected)
    }

    fn tapped_icon(&mut self, id: IconId) -> bool {
        if self.status.is_finished() {
            return false;
        }

        let Some(index) = self.icons.iter().position(|icon| icon.id == id) else {
            log::warn!("tap on unknown icon {:?}", id);
            return false;
        };

        match index.cmp(&self.selected) {
            core::cmp::Ordering::Less => false,
            core::cmp::Ordering::Equal => {
                self.selected += 1;
                if self.selected == self.icons.len() {
                    self.status = GameStatus::Won;
                }
                true
            }
            core::cmp::Ordering::Greater => {
                log::debug!("expected icon #{} but got #{}", self.selected, index);
                self.status = GameStatus::Lost;
                true
            }
        }
    }
}
