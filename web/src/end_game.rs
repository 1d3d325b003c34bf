use followtheorder_core::{EndGameSummary, GameStatus, Transition};
use yew::prelude::*;

#[derive(Properties, Clone, PartialEq)]
pub(crate) struct EndGameProps {
    pub summary: EndGameSummary,
    pub on_play_again: Callback<()>,
}

fn transition_class(transition: Transition) -> &'static str {
    match transition {
        Transition::DoorsOpenHorizontal => "doors-open",
        Transition::DoorsCloseHorizontal => "doors-close",
    }
}

fn status_class(status: GameStatus) -> &'static str {
    match status {
        GameStatus::Progressing => "progressing",
        GameStatus::Won => "won",
        GameStatus::Lost => "lost",
    }
}

#[function_component(EndGameView)]
pub(crate) fn end_game_view(props: &EndGameProps) -> Html {
    let EndGameProps {
        summary,
        on_play_again,
    } = props.clone();

    let class = classes!(
        "end-game",
        status_class(summary.status),
        transition_class(summary.transition)
    );
    let style = format!(
        "animation-duration: {}ms;",
        summary.transition.duration().as_millis()
    );
    let onclick = Callback::from(move |e: MouseEvent| {
        e.stop_propagation();
        on_play_again.emit(());
    });

    html! {
        <section {class} {style}>
            <p>{summary.text}</p>
            <button {onclick}>{"Play again"}</button>
        </section>
    }
}
