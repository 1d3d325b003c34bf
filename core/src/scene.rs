use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::mem;
use core::time::Duration;
use rand::prelude::*;
use serde::{Deserialize, Serialize};

use crate::*;

/// Scale applied to an icon when a tap on it is accepted.
pub const TAP_SCALE: f32 = 0.9;
pub const TAP_SCALE_DURATION: Duration = Duration::from_millis(150);
pub const PARTICLE_LIFETIME: Duration = Duration::from_secs(1);
pub const LOSE_PRESENT_DELAY: Duration = Duration::from_secs(1);
/// Indicator label used when the game cannot report how many icons are selected.
pub const SELECTION_SENTINEL: &str = "-1";

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Transition {
    DoorsOpenHorizontal,
    DoorsCloseHorizontal,
}

impl Transition {
    pub const fn duration(self) -> Duration {
        Duration::from_millis(500)
    }
}

/// Everything the end-of-game view needs, handed over instead of swapping a global scene.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EndGameSummary {
    pub status: GameStatus,
    pub text: String,
    pub transition: Transition,
}

/// Identifies the scene a fortune request was made for.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct FortuneTicket {
    generation: u32,
}

#[derive(Clone, Debug, PartialEq)]
pub enum SceneEvent {
    PlaySound(SoundCue),
    RequestFortune(FortuneTicket),
    PresentEndGame(EndGameSummary),
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScenePhase {
    #[default]
    Idle,
    Dealing,
    Playing,
    AwaitingFortune,
    Finishing,
    Presented,
    TornDown,
}

#[derive(Clone, Debug, PartialEq)]
enum SceneTask {
    RevealIcon { index: usize, position: Point },
    RemoveParticle(NodeId),
    PresentLoss,
}

#[derive(Debug)]
struct ScheduledTask {
    generation: u32,
    task: SceneTask,
}

/// Owns the visual nodes of one game round and bridges input to the rules engine.
///
/// Nothing here blocks or spawns: delayed work lives on a [`Timeline`] that the host drives with
/// [`Self::advance`], and everything the host has to act on comes out of [`Self::drain_events`].
#[derive(Debug)]
pub struct SceneController<G, E> {
    size: Size,
    layout: DealLayout,
    game: Option<G>,
    effects: E,
    rng: SmallRng,
    nodes: SceneGraph,
    dealing: bool,
    deal_total: usize,
    phase: ScenePhase,
    finished_with: Option<GameStatus>,
    generation: u32,
    timeline: Timeline<ScheduledTask>,
    events: Vec<SceneEvent>,
}

impl<G: OrderGame, E: EffectLibrary> SceneController<G, E> {
    pub fn new(size: Size, game: Option<G>, effects: E, seed: u64) -> Self {
        Self {
            size,
            layout: DealLayout::default(),
            game,
            effects,
            rng: SmallRng::seed_from_u64(seed),
            nodes: SceneGraph::new(),
            dealing: false,
            deal_total: 0,
            phase: ScenePhase::Idle,
            finished_with: None,
            generation: 0,
            timeline: Timeline::new(),
            events: Vec::new(),
        }
    }

    pub fn with_layout(mut self, layout: DealLayout) -> Self {
        self.layout = layout;
        self
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn layout(&self) -> &DealLayout {
        &self.layout
    }

    pub fn game(&self) -> Option<&G> {
        self.game.as_ref()
    }

    pub fn nodes(&self) -> &SceneGraph {
        &self.nodes
    }

    pub fn phase(&self) -> ScenePhase {
        self.phase
    }

    pub fn is_dealing(&self) -> bool {
        self.dealing
    }

    /// Input is only taken between the last dealt icon and the end of the game.
    pub fn is_user_interaction_enabled(&self) -> bool {
        !self.dealing && self.phase == ScenePhase::Playing
    }

    pub fn now(&self) -> Duration {
        self.timeline.now()
    }

    pub fn pending_tasks(&self) -> usize {
        self.timeline.pending_len()
    }

    pub fn drain_events(&mut self) -> Vec<SceneEvent> {
        mem::take(&mut self.events)
    }

    /// Scene became visible: compute placements and start dealing.
    pub fn did_move_to_view(&mut self) {
        if self.phase != ScenePhase::Idle {
            log::debug!("scene already started ({:?})", self.phase);
            return;
        }
        self.create_icons();
    }

    /// Runs every delayed task that falls due within `elapsed`.
    pub fn advance(&mut self, elapsed: Duration) {
        let target = self.timeline.now() + elapsed;
        while let Some(ScheduledTask { generation, task }) = self.timeline.pop_due(target) {
            if generation != self.generation {
                log::trace!("dropping {:?} scheduled by a torn down scene", task);
                continue;
            }
            self.run_task(task);
        }
        self.timeline.settle(target);
    }

    /// Every released touch is resolved to the topmost icon and forwarded to the game.
    pub fn touches_ended(&mut self, touches: &[Point]) {
        if !self.is_user_interaction_enabled() {
            log::trace!("ignoring {} touches, interaction disabled", touches.len());
            return;
        }

        for &location in touches {
            if !self.is_user_interaction_enabled() {
                log::trace!("game over, ignoring remaining touches");
                break;
            }
            let Some(node) = self.nodes.icon_at(location) else {
                continue;
            };
            let (node_id, icon_id) = (node.id, node.icon.id);

            let accepted = self
                .game
                .as_mut()
                .is_some_and(|game| game.tapped_icon(icon_id));
            if !accepted {
                log::debug!("tap on {:?} rejected", icon_id);
                continue;
            }

            if let Some(node) = self.nodes.icon_mut(node_id) {
                node.scale *= TAP_SCALE;
            }
            self.emit(SceneEvent::PlaySound(SoundCue::Select));
            self.add_selection_indicator(location);

            if let Some(status) = self.game.as_ref().map(|game| game.status()) {
                if status.is_finished() {
                    self.finish_game(status);
                }
            }
        }
    }

    /// Continuation of a [`SceneEvent::RequestFortune`], to be called back on the main context.
    pub fn fortune_resolved(
        &mut self,
        ticket: FortuneTicket,
        result: core::result::Result<String, FortuneError>,
    ) {
        if ticket.generation != self.generation {
            log::debug!("ignoring fortune for a torn down scene");
            return;
        }
        if self.phase != ScenePhase::AwaitingFortune {
            log::warn!("unexpected fortune while {:?}", self.phase);
            return;
        }

        let text = fortune_or_fallback(result);
        self.present(text, Transition::DoorsOpenHorizontal);
    }

    /// Drops all nodes; anything still scheduled will fire into nothing.
    pub fn teardown(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        self.nodes.clear();
        self.dealing = false;
        self.phase = ScenePhase::TornDown;
        log::debug!(
            "scene torn down with {} tasks still pending",
            self.timeline.pending_len()
        );
    }

    fn emit(&mut self, event: SceneEvent) {
        log::trace!("scene event: {:?}", event);
        self.events.push(event);
    }

    fn schedule(&mut self, delay: Duration, task: SceneTask) {
        let generation = self.generation;
        self.timeline
            .schedule_after(delay, ScheduledTask { generation, task });
    }

    fn run_task(&mut self, task: SceneTask) {
        match task {
            SceneTask::RevealIcon { index, position } => self.reveal_icon(index, position),
            SceneTask::RemoveParticle(id) => {
                if !self.nodes.remove_particle(id) {
                    log::trace!("particle {:?} already gone", id);
                }
            }
            SceneTask::PresentLoss => {
                self.present(LOSE_MESSAGE.to_string(), Transition::DoorsCloseHorizontal)
            }
        }
    }

    fn create_icons(&mut self) {
        let Some(game) = self.game.as_ref() else {
            log::warn!("no game attached, nothing to deal");
            return;
        };

        let item_count = game.icons().len();
        if item_count != game.number_of_items() {
            log::warn!(
                "game reports {} items but has {} icons, dealing the icons",
                game.number_of_items(),
                item_count
            );
        }

        self.dealing = true;
        self.phase = ScenePhase::Dealing;
        self.deal_total = item_count;

        let positions = self
            .layout
            .scatter_positions(&mut self.rng, self.size, item_count);
        if positions.is_empty() {
            log::debug!("nothing to deal");
            self.finish_dealing();
            return;
        }

        log::debug!("dealing {} icons", positions.len());
        for (index, position) in positions.into_iter().enumerate() {
            let delay = self.layout.reveal_delay(index);
            self.schedule(delay, SceneTask::RevealIcon { index, position });
        }
    }

    fn reveal_icon(&mut self, index: usize, position: Point) {
        let Some(icon) = self
            .game
            .as_ref()
            .and_then(|game| game.icons().get(index).copied())
        else {
            log::warn!("no icon #{} to reveal", index);
            return;
        };

        self.nodes.add_icon(icon, position, self.layout.icon_size());

        if index + 1 == self.deal_total {
            self.finish_dealing();
            self.emit(SceneEvent::PlaySound(SoundCue::DealLast));
        } else {
            self.emit(SceneEvent::PlaySound(SoundCue::Deal));
        }
    }

    fn finish_dealing(&mut self) {
        self.dealing = false;
        if self.phase == ScenePhase::Dealing {
            self.phase = ScenePhase::Playing;
        }
        log::debug!("dealing done, input enabled");
    }

    fn add_selection_indicator(&mut self, location: Point) {
        let label = self
            .game
            .as_ref()
            .and_then(|game| game.number_of_selected_items())
            .map_or_else(|| SELECTION_SENTINEL.to_string(), |count| count.to_string());
        let radius = self.layout.icon_side as f32 / 4.0;
        self.nodes.add_indicator(location, radius, label);
    }

    fn finish_game(&mut self, status: GameStatus) {
        if self.finished_with.is_some() {
            return;
        }

        match status {
            GameStatus::Won => {
                self.finished_with = Some(status);
                self.remove_with_particles(VICTORY_EXPLOSION);
                self.phase = ScenePhase::AwaitingFortune;
                let ticket = FortuneTicket {
                    generation: self.generation,
                };
                self.emit(SceneEvent::RequestFortune(ticket));
            }
            GameStatus::Lost => {
                self.finished_with = Some(status);
                self.remove_with_particles(LOSE_EXPLOSION);
                self.phase = ScenePhase::Finishing;
                self.schedule(LOSE_PRESENT_DELAY, SceneTask::PresentLoss);
            }
            GameStatus::Progressing => {}
        }
    }

    fn remove_with_particles(&mut self, effect_name: &str) {
        self.nodes.clear_indicators();
        for icon in self.nodes.take_icons() {
            if let Some(effect) = self.effects.particle_effect(effect_name) {
                let id = self.nodes.add_particle(effect, icon.position);
                self.schedule(PARTICLE_LIFETIME, SceneTask::RemoveParticle(id));
            }
        }
    }

    fn present(&mut self, text: String, transition: Transition) {
        let Some(status) = self
            .game
            .as_ref()
            .map(|game| game.status())
            .or(self.finished_with)
        else {
            log::warn!("nothing to present, game never finished");
            return;
        };

        log::debug!("presenting end of game: {:?}", status);
        self.phase = ScenePhase::Presented;
        self.emit(SceneEvent::PresentEndGame(EndGameSummary {
            status,
            text,
            transition,
        }));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::collections::VecDeque;
    use alloc::vec;
    use core::cell::Cell;

    const SCREEN: Size = Size::new(390.0, 844.0);

    /// Rules engine that answers taps from a script.
    #[derive(Debug)]
    struct ScriptedGame {
        icons: Vec<Icon>,
        replies: VecDeque<(bool, GameStatus)>,
        status: GameStatus,
        selected: Option<usize>,
        taps: Vec<IconId>,
        status_reads: Cell<usize>,
    }

    impl ScriptedGame {
        fn new(items: u32, replies: &[(bool, GameStatus)]) -> Self {
            Self {
                icons: (0..items)
                    .map(|id| Icon::new(IconId(id), IconKind::ALL[id as usize % 16]))
                    .collect(),
                replies: replies.iter().copied().collect(),
                status: GameStatus::Progressing,
                selected: Some(0),
                taps: Vec::new(),
                status_reads: Cell::new(0),
            }
        }
    }

    impl OrderGame for ScriptedGame {
        fn number_of_items(&self) -> usize {
            self.icons.len()
        }

        fn icons(&self) -> &[Icon] {
            &self.icons
        }

        fn status(&self) -> GameStatus {
            self.status_reads.set(self.status_reads.get() + 1);
            self.status
        }

        fn number_of_selected_items(&self) -> Option<usize> {
            self.selected
        }

        fn tapped_icon(&mut self, id: IconId) -> bool {
            self.taps.push(id);
            let (accepted, status) = self.replies.pop_front().unwrap_or((false, self.status));
            if accepted {
                self.selected = self.selected.map(|n| n + 1);
            }
            self.status = status;
            accepted
        }
    }

    type Scene = SceneController<ScriptedGame, NamedEffects>;

    fn scene(game: ScriptedGame) -> Scene {
        SceneController::new(SCREEN, Some(game), NamedEffects::default(), 7)
    }

    fn dealt(game: ScriptedGame) -> Scene {
        let mut scene = scene(game);
        scene.did_move_to_view();
        scene.advance(Duration::from_secs(30));
        scene.drain_events();
        scene
    }

    fn position_of(scene: &Scene, id: u32) -> Point {
        scene
            .nodes()
            .icons()
            .iter()
            .find(|node| node.icon.id == IconId(id))
            .unwrap()
            .position
    }

    fn sounds(events: &[SceneEvent]) -> Vec<SoundCue> {
        events
            .iter()
            .filter_map(|event| match event {
                SceneEvent::PlaySound(cue) => Some(*cue),
                _ => None,
            })
            .collect()
    }

    fn summaries(events: &[SceneEvent]) -> Vec<EndGameSummary> {
        events
            .iter()
            .filter_map(|event| match event {
                SceneEvent::PresentEndGame(summary) => Some(summary.clone()),
                _ => None,
            })
            .collect()
    }

    fn tickets(events: &[SceneEvent]) -> Vec<FortuneTicket> {
        events
            .iter()
            .filter_map(|event| match event {
                SceneEvent::RequestFortune(ticket) => Some(*ticket),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn deals_one_icon_per_step_and_cues_the_last_one() {
        let mut scene = scene(ScriptedGame::new(6, &[]));
        scene.did_move_to_view();

        assert!(scene.is_dealing());
        assert!(!scene.is_user_interaction_enabled());
        assert_eq!(scene.pending_tasks(), 6);

        scene.advance(Duration::from_millis(799));
        assert!(scene.nodes().icons().is_empty());

        let mut cues = Vec::new();
        for step in 1..=6 {
            scene.advance(if step == 1 {
                Duration::from_millis(1)
            } else {
                Duration::from_millis(800)
            });
            assert_eq!(scene.nodes().icons().len(), step);
            assert_eq!(scene.now(), Duration::from_millis(800 * step as u64));
            cues.extend(sounds(&scene.drain_events()));
        }

        use SoundCue::*;
        assert_eq!(cues, [Deal, Deal, Deal, Deal, Deal, DealLast]);
        assert!(!scene.is_dealing());
        assert!(scene.is_user_interaction_enabled());
        assert_eq!(scene.phase(), ScenePhase::Playing);

        let dealt: Vec<_> = scene.nodes().icons().iter().map(|n| n.icon.id.0).collect();
        assert_eq!(dealt, [0, 1, 2, 3, 4, 5]);
        assert!(scene
            .nodes()
            .icons()
            .iter()
            .all(|n| n.size == Size::square(80.0)));
    }

    #[test]
    fn taps_are_ignored_while_dealing() {
        let mut scene = scene(ScriptedGame::new(3, &[(true, GameStatus::Progressing)]));
        scene.did_move_to_view();
        scene.advance(Duration::from_millis(800));

        let location = position_of(&scene, 0);
        scene.touches_ended(&[location]);

        assert!(scene.game().unwrap().taps.is_empty());
        assert!(scene.nodes().indicators().is_empty());
    }

    #[test]
    fn rejected_tap_changes_nothing() {
        let mut scene = dealt(ScriptedGame::new(4, &[(false, GameStatus::Progressing)]));
        let reads_before = scene.game().unwrap().status_reads.get();

        let location = position_of(&scene, 2);
        scene.touches_ended(&[location]);

        let game = scene.game().unwrap();
        assert_eq!(game.taps, [IconId(2)]);
        assert_eq!(game.status_reads.get(), reads_before);
        assert!(scene.nodes().indicators().is_empty());
        assert!(scene.drain_events().is_empty());
        assert!(scene.nodes().icons().iter().all(|n| n.scale == 1.0));
    }

    #[test]
    fn taps_outside_icons_are_ignored() {
        let mut scene = dealt(ScriptedGame::new(4, &[(true, GameStatus::Progressing)]));

        scene.touches_ended(&[Point::new(-500.0, -500.0)]);

        assert!(scene.game().unwrap().taps.is_empty());
        assert!(scene.drain_events().is_empty());
    }

    #[test]
    fn accepted_tap_marks_selection_without_ending() {
        let mut scene = dealt(ScriptedGame::new(4, &[(true, GameStatus::Progressing)]));

        let location = position_of(&scene, 0);
        scene.touches_ended(&[location]);

        let events = scene.drain_events();
        assert_eq!(events, [SceneEvent::PlaySound(SoundCue::Select)]);
        assert_eq!(scene.phase(), ScenePhase::Playing);

        let indicators = scene.nodes().indicators();
        assert_eq!(indicators.len(), 1);
        assert_eq!(indicators[0].label, "1");
        assert_eq!(indicators[0].position, location);
        assert_eq!(indicators[0].radius, 20.0);

        let tapped = scene.nodes().icons().iter().find(|n| n.icon.id == IconId(0)).unwrap();
        assert_eq!(tapped.scale, TAP_SCALE);
    }

    #[test]
    fn indicator_uses_sentinel_when_count_is_unknown() {
        let mut game = ScriptedGame::new(4, &[(true, GameStatus::Progressing)]);
        game.selected = None;
        let mut scene = dealt(game);

        let location = position_of(&scene, 1);
        scene.touches_ended(&[location]);

        assert_eq!(scene.nodes().indicators()[0].label, SELECTION_SENTINEL);
    }

    #[test]
    fn every_touch_in_one_event_is_forwarded() {
        let replies = [
            (true, GameStatus::Progressing),
            (true, GameStatus::Progressing),
        ];
        let mut scene = dealt(ScriptedGame::new(6, &replies));

        let touches = [position_of(&scene, 0), position_of(&scene, 1)];
        scene.touches_ended(&touches);

        assert_eq!(scene.game().unwrap().taps, [IconId(0), IconId(1)]);
        let labels: Vec<_> = scene
            .nodes()
            .indicators()
            .iter()
            .map(|n| n.label.as_str())
            .collect();
        assert_eq!(labels, ["1", "2"]);
    }

    #[test]
    fn winning_requests_one_fortune_and_presents_it() {
        let mut scene = dealt(ScriptedGame::new(4, &[(true, GameStatus::Won)]));

        let location = position_of(&scene, 0);
        scene.touches_ended(&[location]);

        let events = scene.drain_events();
        let requested = tickets(&events);
        assert_eq!(requested.len(), 1);
        assert!(summaries(&events).is_empty());
        assert_eq!(scene.phase(), ScenePhase::AwaitingFortune);
        assert!(scene.nodes().icons().is_empty());
        assert!(scene.nodes().indicators().is_empty());
        assert_eq!(scene.nodes().particles().len(), 4);
        assert!(scene
            .nodes()
            .particles()
            .iter()
            .all(|n| n.effect.name == VICTORY_EXPLOSION));

        scene.fortune_resolved(requested[0], Ok("Fortune favors the bold".to_string()));
        scene.fortune_resolved(requested[0], Ok("Too late".to_string()));

        let presented = summaries(&scene.drain_events());
        assert_eq!(
            presented,
            [EndGameSummary {
                status: GameStatus::Won,
                text: "Fortune favors the bold".to_string(),
                transition: Transition::DoorsOpenHorizontal,
            }]
        );
        assert_eq!(scene.phase(), ScenePhase::Presented);
    }

    #[test]
    fn fortune_failure_falls_back() {
        let mut scene = dealt(ScriptedGame::new(3, &[(true, GameStatus::Won)]));
        let location = position_of(&scene, 0);
        scene.touches_ended(&[location]);
        let ticket = tickets(&scene.drain_events())[0];

        scene.fortune_resolved(ticket, Err(FortuneError::Request("offline".to_string())));

        let presented = summaries(&scene.drain_events());
        assert_eq!(presented.len(), 1);
        assert_eq!(presented[0].text, FALLBACK_FORTUNE);
    }

    #[test]
    fn losing_presents_after_a_delay_without_fortune() {
        let mut scene = dealt(ScriptedGame::new(4, &[(true, GameStatus::Lost)]));

        let location = position_of(&scene, 3);
        scene.touches_ended(&[location]);

        let events = scene.drain_events();
        assert!(tickets(&events).is_empty());
        assert_eq!(scene.phase(), ScenePhase::Finishing);
        assert!(scene
            .nodes()
            .particles()
            .iter()
            .all(|n| n.effect.name == LOSE_EXPLOSION));

        scene.advance(Duration::from_millis(999));
        assert!(summaries(&scene.drain_events()).is_empty());

        scene.advance(Duration::from_millis(1));
        let presented = summaries(&scene.drain_events());
        assert_eq!(
            presented,
            [EndGameSummary {
                status: GameStatus::Lost,
                text: LOSE_MESSAGE.to_string(),
                transition: Transition::DoorsCloseHorizontal,
            }]
        );
    }

    #[test]
    fn particles_expire_on_their_own() {
        let mut scene = dealt(ScriptedGame::new(3, &[(true, GameStatus::Won)]));
        let location = position_of(&scene, 0);
        scene.touches_ended(&[location]);
        assert_eq!(scene.nodes().particles().len(), 3);

        scene.advance(PARTICLE_LIFETIME);

        assert!(scene.nodes().particles().is_empty());
        assert_eq!(scene.phase(), ScenePhase::AwaitingFortune);
    }

    #[test]
    fn missing_effect_is_skipped() {
        let game = ScriptedGame::new(3, &[(true, GameStatus::Lost)]);
        let mut scene = SceneController::new(SCREEN, Some(game), NamedEffects::empty(), 7);
        scene.did_move_to_view();
        scene.advance(Duration::from_secs(30));

        let location = position_of(&scene, 0);
        scene.touches_ended(&[location]);
        assert!(scene.nodes().is_empty());

        scene.advance(LOSE_PRESENT_DELAY);
        assert_eq!(summaries(&scene.drain_events()).len(), 1);
    }

    #[test]
    fn touches_after_the_end_are_ignored() {
        let replies = [(true, GameStatus::Won), (true, GameStatus::Won)];
        let mut scene = dealt(ScriptedGame::new(4, &replies));

        let touches = [position_of(&scene, 0), position_of(&scene, 1)];
        scene.touches_ended(&touches);

        assert_eq!(scene.game().unwrap().taps.len(), 1);
        assert_eq!(tickets(&scene.drain_events()).len(), 1);
    }

    #[test]
    fn input_is_disabled_once_the_game_ends() {
        let game = FollowTheOrderGame::generate(5, GameConfig::new(3));
        let mut scene = SceneController::new(SCREEN, Some(game), NamedEffects::default(), 11);
        scene.did_move_to_view();
        scene.advance(Duration::from_secs(5));
        scene.drain_events();
        assert!(scene.is_user_interaction_enabled());

        let second = scene.game().unwrap().icons()[2].id;
        let location = scene
            .nodes()
            .icons()
            .iter()
            .find(|node| node.icon.id == second)
            .map(|node| node.position)
            .unwrap();
        scene.touches_ended(&[location]);

        assert_eq!(scene.game().unwrap().status(), GameStatus::Lost);
        assert_eq!(scene.phase(), ScenePhase::Finishing);
        assert!(!scene.is_user_interaction_enabled());

        scene.advance(LOSE_PRESENT_DELAY);
        assert_eq!(scene.phase(), ScenePhase::Presented);
        assert!(!scene.is_user_interaction_enabled());
    }

    #[test]
    fn winning_disables_input_while_the_fortune_loads() {
        let mut scene = dealt(ScriptedGame::new(2, &[(true, GameStatus::Won)]));
        let location = position_of(&scene, 0);
        scene.touches_ended(&[location]);

        assert_eq!(scene.phase(), ScenePhase::AwaitingFortune);
        assert!(!scene.is_user_interaction_enabled());
    }

    #[test]
    fn custom_layout_changes_timing_and_sizes() {
        let layout = DealLayout {
            icon_side: 40,
            deal_delay: Duration::from_millis(100),
            ..DealLayout::default()
        };
        let game = ScriptedGame::new(4, &[(true, GameStatus::Progressing)]);
        let mut scene = scene(game).with_layout(layout);
        scene.did_move_to_view();

        scene.advance(Duration::from_millis(99));
        assert!(scene.nodes().icons().is_empty());
        for shown in 1..=4 {
            scene.advance(Duration::from_millis(if shown == 1 { 1 } else { 100 }));
            assert_eq!(scene.nodes().icons().len(), shown);
        }
        assert_eq!(scene.now(), Duration::from_millis(400));
        assert!(scene.is_user_interaction_enabled());
        assert!(
            scene
                .nodes()
                .icons()
                .iter()
                .all(|node| node.size == Size::square(40.0))
        );

        let location = position_of(&scene, 0);
        scene.touches_ended(&[location]);
        assert_eq!(scene.nodes().indicators()[0].radius, 10.0);
    }

    #[test]
    fn teardown_turns_pending_work_into_no_ops() {
        let mut scene = scene(ScriptedGame::new(5, &[]));
        scene.did_move_to_view();
        scene.advance(Duration::from_millis(1600));
        scene.drain_events();

        scene.teardown();
        scene.advance(Duration::from_secs(30));

        assert!(scene.nodes().is_empty());
        assert!(scene.drain_events().is_empty());
        assert_eq!(scene.pending_tasks(), 0);
        assert!(!scene.is_user_interaction_enabled());
    }

    #[test]
    fn stale_fortune_is_ignored() {
        let mut scene = dealt(ScriptedGame::new(3, &[(true, GameStatus::Won)]));
        let location = position_of(&scene, 0);
        scene.touches_ended(&[location]);
        let ticket = tickets(&scene.drain_events())[0];

        scene.teardown();
        scene.fortune_resolved(ticket, Ok("Nobody is watching".to_string()));

        assert!(scene.drain_events().is_empty());
        assert_eq!(scene.phase(), ScenePhase::TornDown);
    }

    #[test]
    fn empty_game_finishes_dealing_immediately() {
        let mut scene = scene(ScriptedGame::new(0, &[]));
        scene.did_move_to_view();

        assert!(!scene.is_dealing());
        assert!(scene.is_user_interaction_enabled());
        assert_eq!(scene.pending_tasks(), 0);
        assert!(scene.drain_events().is_empty());
    }

    #[test]
    fn single_icon_is_dealt_with_final_cue() {
        let mut scene = scene(ScriptedGame::new(1, &[]));
        scene.did_move_to_view();
        scene.advance(Duration::from_millis(800));

        assert_eq!(scene.nodes().icons().len(), 1);
        assert_eq!(sounds(&scene.drain_events()), [SoundCue::DealLast]);
        assert!(scene.is_user_interaction_enabled());
    }

    #[test]
    fn scene_without_game_does_nothing() {
        let mut scene: Scene = SceneController::new(SCREEN, None, NamedEffects::default(), 7);
        scene.did_move_to_view();
        scene.advance(Duration::from_secs(5));

        assert_eq!(scene.phase(), ScenePhase::Idle);
        assert!(scene.nodes().is_empty());
        assert!(scene.drain_events().is_empty());
    }

    #[test]
    fn follow_the_order_round_can_be_won() {
        let game = FollowTheOrderGame::generate(99, GameConfig::new(6));
        let mut scene = SceneController::new(SCREEN, Some(game), NamedEffects::default(), 3);
        scene.did_move_to_view();
        scene.advance(Duration::from_secs(10));
        scene.drain_events();

        let order: Vec<_> = scene
            .game()
            .unwrap()
            .icons()
            .iter()
            .map(|icon| icon.id)
            .collect();
        for id in order {
            let location = scene
                .nodes()
                .icons()
                .iter()
                .find(|node| node.icon.id == id)
                .map(|node| node.position)
                .unwrap();
            scene.touches_ended(&[location]);
        }

        let events = scene.drain_events();
        assert_eq!(sounds(&events), vec![SoundCue::Select; 6]);
        let ticket = tickets(&events)[0];
        scene.fortune_resolved(ticket, Err(FortuneError::Empty));

        let presented = summaries(&scene.drain_events());
        assert_eq!(presented[0].status, GameStatus::Won);
        assert_eq!(presented[0].text, FALLBACK_FORTUNE);
    }
}
