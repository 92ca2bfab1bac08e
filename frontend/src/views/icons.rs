use yew::prelude::*;

fn icon_base(path: &'static str) -> Html {
    html! {
        <svg width="20" height="20" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round">
            <path d={path}></path>
        </svg>
    }
}

pub fn layout_grid() -> Html {
    icon_base("M3 3h8v8H3zM13 3h8v8h-8zM3 13h8v8H3zM13 13h8v8h-8z")
}
pub fn wallet() -> Html {
    icon_base("M3 7h18v10H3zM16 7V5H5v2")
}
pub fn credit_card() -> Html {
    icon_base("M3 7h18v10H3zM3 11h18")
}
pub fn arrows_left_right() -> Html {
    icon_base("M7 7h14M17 3l4 4-4 4M17 17H3M7 13l-4 4 4 4")
}
pub fn log_out() -> Html {
    icon_base("M9 21H5a2 2 0 01-2-2V5a2 2 0 012-2h4M16 17l5-5-5-5M21 12H9")
}
pub fn plus() -> Html {
    icon_base("M12 5v14M5 12h14")
}
pub fn arrow_up_right() -> Html {
    icon_base("M7 17L17 7M7 7h10v10")
}
pub fn arrow_down_left() -> Html {
    icon_base("M17 7L7 17M17 17H7V7")
}
pub fn close() -> Html {
    icon_base("M18 6L6 18M6 6l12 12")
}
