use crate::effects::{CssEffects, SoundBoard};
use crate::end_game::EndGameView;
use crate::utils::*;
use clap::Args;
use followtheorder_core as game;
use game::{FortuneError, FortuneTicket, OrderGame, SceneEvent};
use gloo::timers::callback::Interval;
use web_time::Instant;
use yew::prelude::*;

const TICK_MILLIS: u32 = 30;

type Controller = game::SceneController<game::FollowTheOrderGame, CssEffects>;

#[derive(Args, Properties, Debug, Clone, PartialEq)]
pub(crate) struct SceneProps {
    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,

    /// How many icons to deal
    #[arg(short, long, default_value_t = 8)]
    items: u8,

    /// Where to fetch the fortune shown after a win
    #[arg(long, default_value = "fortune")]
    fortune_url: String,

    /// Do not play sounds
    #[arg(long)]
    mute: bool,
}

#[derive(Debug)]
pub(crate) enum Msg {
    Tick,
    PointerUp(game::Point),
    FortuneResolved(FortuneTicket, Result<String, FortuneError>),
    PlayAgain,
}

pub(crate) struct SceneView {
    scene: Controller,
    summary: Option<game::EndGameSummary>,
    seed: u64,
    sounds: SoundBoard,
    last_tick: Instant,
    _ticker: Interval,
}

impl SceneView {
    fn create_scene(seed: u64, items: u8) -> Controller {
        let config = game::GameConfig::new(items);
        let rules = game::FollowTheOrderGame::generate(seed, config);
        log::debug!("new scene, seed: {}, items: {}", seed, rules.number_of_items());

        let mut scene = game::SceneController::new(window_size(), Some(rules), CssEffects, seed);
        scene.did_move_to_view();
        scene
    }

    fn create_ticker(ctx: &Context<Self>) -> Interval {
        let link = ctx.link().clone();
        Interval::new(TICK_MILLIS, move || link.send_message(Msg::Tick))
    }

    fn handle_events(&mut self, ctx: &Context<Self>) -> bool {
        let events = self.scene.drain_events();
        let updated = !events.is_empty();

        for event in events {
            match event {
                SceneEvent::PlaySound(cue) => self.sounds.play(cue),
                SceneEvent::RequestFortune(ticket) => {
                    let link = ctx.link().clone();
                    let url = ctx.props().fortune_url.clone();
                    wasm_bindgen_futures::spawn_local(async move {
                        let result = crate::fortune::request_fortune(&url).await;
                        link.send_message(Msg::FortuneResolved(ticket, result));
                    });
                }
                SceneEvent::PresentEndGame(summary) => {
                    log::debug!("end of game: {:?}", summary);
                    self.summary = Some(summary);
                }
            }
        }

        updated
    }

    fn view_scene(&self, ctx: &Context<Self>) -> Html {
        let height = self.scene.size().height;
        let nodes = self.scene.nodes();

        let onpointerup = ctx.link().callback(move |e: PointerEvent| {
            Msg::PointerUp(to_scene_point(e.offset_x(), e.offset_y(), height))
        });
        let class = classes!("scene", self.scene.is_dealing().then_some("dealing"));

        html! {
            <div {class} {onpointerup}>
                {
                    for nodes.icons().iter().map(|node| {
                        let style = format!(
                            "{} transform: scale({}); transition-duration: {}ms;",
                            node_style(node.position, node.size, height),
                            node.scale,
                            game::TAP_SCALE_DURATION.as_millis()
                        );
                        html! {
                            <div key={node.id.0} class="icon" {style}>{node.icon.kind.glyph()}</div>
                        }
                    })
                }
                {
                    for nodes.indicators().iter().map(|node| {
                        let size = game::Size::square(node.radius * 2.);
                        let style = node_style(node.position, size, height);
                        let label = node.label.clone();
                        html! {
                            <div key={node.id.0} class="indicator" {style}>{label}</div>
                        }
                    })
                }
                {
                    for nodes.particles().iter().map(|node| {
                        let size = self.scene.layout().icon_size();
                        let style = node_style(node.position, size, height);
                        let class = classes!("particles", CssEffects::class_for(&node.effect.name));
                        html! {
                            <div key={node.id.0} {class} {style}/>
                        }
                    })
                }
            </div>
        }
    }
}

impl Component for SceneView {
    type Message = Msg;
    type Properties = SceneProps;

    fn create(ctx: &Context<Self>) -> Self {
        let props = ctx.props();
        let seed = props.seed.unwrap_or_else(js_random_seed);

        Self {
            scene: Self::create_scene(seed, props.items),
            summary: None,
            seed,
            sounds: SoundBoard::new(props.mute),
            last_tick: Instant::now(),
            _ticker: SceneView::create_ticker(ctx),
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        use Msg::*;

        match msg {
            Tick => {
                let now = Instant::now();
                let elapsed = now.duration_since(self.last_tick);
                self.last_tick = now;

                let before = self.scene.nodes().clone();
                self.scene.advance(elapsed);
                let events = self.handle_events(ctx);
                events || before != *self.scene.nodes()
            }
            PointerUp(location) => {
                log::trace!("pointer up at {:?}", location);
                self.scene.touches_ended(&[location]);
                self.handle_events(ctx);
                true
            }
            FortuneResolved(ticket, result) => {
                self.scene.fortune_resolved(ticket, result);
                self.handle_events(ctx)
            }
            PlayAgain => {
                self.scene.teardown();
                self.seed = js_random_seed();
                self.scene = Self::create_scene(self.seed, ctx.props().items);
                self.summary = None;
                self.last_tick = Instant::now();
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        html! {
            <main class="followtheorder">
                if let Some(summary) = self.summary.clone() {
                    <EndGameView {summary} on_play_again={ctx.link().callback(|_| Msg::PlayAgain)}/>
                } else {
                    { self.view_scene(ctx) }
                }
            </main>
        }
    }
}
