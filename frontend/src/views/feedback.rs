use gloo_timers::callback::Timeout;
use yew::prelude::*;

use super::icons;
use crate::{
    context::use_app,
    notify::{Notice, NoticeKind},
};

#[derive(Properties, PartialEq)]
struct NoticeBannerProps {
    notice: Notice,
    ttl_ms: u32,
    on_dismiss: Callback<u32>,
}

#[function_component(NoticeBanner)]
fn notice_banner(props: &NoticeBannerProps) -> Html {
    {
        let on_dismiss = props.on_dismiss.clone();
        use_effect_with_deps(
            move |&(id, ttl_ms): &(u32, u32)| {
                let timeout = Timeout::new(ttl_ms, move || on_dismiss.emit(id));
                move || drop(timeout)
            },
            (props.notice.id, props.ttl_ms),
        );
    }

    let class_name = match props.notice.kind {
        NoticeKind::Success => "flex items-start gap-3 px-4 py-3 rounded-xl shadow-lg text-sm bg-emerald-50 border border-emerald-200 text-emerald-800",
        NoticeKind::Error => "flex items-start gap-3 px-4 py-3 rounded-xl shadow-lg text-sm bg-red-50 border border-red-200 text-red-700",
    };
    let on_close = {
        let on_dismiss = props.on_dismiss.clone();
        let id = props.notice.id;
        Callback::from(move |_| on_dismiss.emit(id))
    };

    html! {
        <div class={class_name} role="status">
            <p class="flex-1">{ props.notice.message.clone() }</p>
            <button type="button" class="shrink-0 opacity-60 hover:opacity-100" aria-label="Dismiss" onclick={on_close}>
                { icons::close() }
            </button>
        </div>
    }
}

/// The visible notices, newest at the bottom.
#[function_component(NoticeStack)]
pub fn notice_stack() -> Html {
    let app = use_app();
    let ttl_ms = app.config().notice_ttl_ms;
    let on_dismiss = {
        let notifier = app.notifier.clone();
        Callback::from(move |id: u32| notifier.dismiss(id))
    };

    html! {
        <div class="fixed top-4 right-4 z-50 w-80 space-y-2">
            { for app.notifier.queue().notices().iter().map(|notice| html! {
                <NoticeBanner key={notice.id} notice={notice.clone()} ttl_ms={ttl_ms} on_dismiss={on_dismiss.clone()} />
            }) }
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct BusyOverlayProps {
    pub busy: bool,
}

#[function_component(BusyOverlay)]
pub fn busy_overlay(props: &BusyOverlayProps) -> Html {
    if !props.busy {
        return html! {};
    }

    html! {
        <div class="fixed inset-0 z-40 flex items-center justify-center bg-black/10 pointer-events-none">
            <div class="w-10 h-10 border-4 border-[#B2CBDE] border-t-[#173E63] rounded-full animate-spin"></div>
        </div>
    }
}
