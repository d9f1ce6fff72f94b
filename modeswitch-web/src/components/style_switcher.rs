//! The two-button switcher as a `yew` component, for apps that render their
//! own markup instead of letting the controller inject it.
//!
//! Wire `on_select` to [`ModeController::select`](modeswitch_core::ModeController::select)
//! and feed the resulting mode back through the `mode` prop.

use modeswitch_core::{Emphasis, Mode, ToggleConfig, WidgetSpec};
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub mode: Mode,
    #[prop_or_else(ToggleConfig::style_switcher)]
    pub config: ToggleConfig,
    #[prop_or_default]
    pub on_select: Callback<Mode>,
}

#[function_component(StyleSwitcher)]
pub fn style_switcher(props: &Props) -> Html {
    let widget = WidgetSpec::build(&props.config);
    let buttons = widget.buttons.into_iter().map(|button| {
        let emphasis = Emphasis::from_config(&props.config, button.mode == props.mode);
        let mut class = Classes::new();
        if let (true, Some(highlight)) = (emphasis.active, emphasis.class.clone()) {
            class.push(highlight);
        }
        let onclick = {
            let cb = props.on_select.clone();
            let mode = button.mode;
            Callback::from(move |_: MouseEvent| cb.emit(mode))
        };
        html! {
            <button
                id={button.id}
                type="button"
                class={class}
                style={format!("opacity: {}", emphasis.opacity)}
                data-mode={button.mode.name()}
                {onclick}
            >
                { button.label }
            </button>
        }
    });
    html! {
        <div class={widget.class}>
            { for buttons }
        </div>
    }
}
