use yew::prelude::*;

use super::icons;
use crate::context::use_app;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Page {
    Dashboard,
    Accounts,
    Transactions,
}

struct NavItem {
    label: &'static str,
    page: Page,
    icon: fn() -> Html,
}

const NAV_ITEMS: [NavItem; 3] = [
    NavItem {
        label: "Dashboard",
        page: Page::Dashboard,
        icon: icons::layout_grid,
    },
    NavItem {
        label: "Accounts",
        page: Page::Accounts,
        icon: icons::wallet,
    },
    NavItem {
        label: "Transactions",
        page: Page::Transactions,
        icon: icons::arrows_left_right,
    },
];

#[derive(Properties, PartialEq)]
pub struct LayoutProps {
    pub children: Children,
    pub active_page: Page,
    pub on_select: Callback<Page>,
    pub on_logout: Callback<()>,
}

#[function_component(Layout)]
pub fn layout(props: &LayoutProps) -> Html {
    html! {
        <div class="flex h-screen bg-background">
            <div class="hidden md:flex">
                <Sidebar
                    active_page={props.active_page}
                    on_select={props.on_select.clone()}
                    on_logout={props.on_logout.clone()}
                />
            </div>

            <div class="flex-1 flex flex-col overflow-hidden">
                <Header on_logout={props.on_logout.clone()} />
                <main class="flex-1 overflow-y-auto">
                    { for props.children.iter() }
                </main>
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct HeaderProps {
    on_logout: Callback<()>,
}

#[function_component(Header)]
fn header(props: &HeaderProps) -> Html {
    let app = use_app();
    let (name, email) = app
        .user()
        .map(|user| (user.full_name(), user.email.clone()))
        .unwrap_or_default();
    let on_logout = props.on_logout.reform(|_: MouseEvent| ());

    html! {
        <header class="bg-[#D8E1E8] border-b border-border h-16 flex items-center justify-between px-6">
            <span class="md:hidden text-[#173E63] text-xl font-black tracking-tight">{"XBank"}</span>
            <div class="flex-1"></div>
            <div class="flex items-center gap-4">
                <div class="text-right">
                    <p class="text-sm font-bold text-[#173E63]">{ name }</p>
                    <p class="text-xs text-slate-500">{ email }</p>
                </div>
                <button class="md:hidden p-2 hover:bg-secondary rounded-full transition-colors" aria-label="Log out" onclick={on_logout}>
                    { icons::log_out() }
                </button>
            </div>
        </header>
    }
}

#[derive(Properties, PartialEq)]
struct SidebarProps {
    active_page: Page,
    on_select: Callback<Page>,
    on_logout: Callback<()>,
}

#[function_component(Sidebar)]
fn sidebar(props: &SidebarProps) -> Html {
    let on_logout = props.on_logout.reform(|_: MouseEvent| ());

    html! {
        <div class="w-[220px] h-screen bg-[#D8E1E8] p-4 flex flex-col">
            <div class="flex items-center gap-3 px-2 mb-8">
                <div class="w-12 h-12 bg-[#173E63] rounded-full flex items-center justify-center text-white font-black">
                    {"X"}
                </div>
                <span class="text-[#173E63] text-2xl font-black tracking-tight">{"XBank"}</span>
            </div>

            <div class="flex-1 bg-[#173E63] rounded-[24px] flex flex-col py-6 px-3 shadow-lg">
                <nav class="flex-1 space-y-2">
                    { for NAV_ITEMS.iter().map(|item| {
                        let class_name = if item.page == props.active_page {
                            "flex items-center gap-3 px-4 py-3 rounded-xl transition-all text-[13px] font-medium bg-[#B2CBDE] text-[#173E63] w-full"
                        } else {
                            "flex items-center gap-3 px-4 py-3 rounded-xl transition-all text-[13px] font-medium text-slate-300 hover:bg-white/5 hover:text-white w-full"
                        };
                        let on_select = props.on_select.clone();
                        let page = item.page;

                        html! {
                            <button type="button" class={class_name} onclick={Callback::from(move |_| on_select.emit(page))}>
                                <span class="shrink-0">{ (item.icon)() }</span>
                                <span class="truncate whitespace-nowrap text-left">{ item.label }</span>
                            </button>
                        }
                    }) }
                </nav>

                <div class="mt-auto pt-4">
                    <button onclick={on_logout} class="flex items-center gap-3 w-full px-4 py-3 rounded-xl hover:bg-white/10 transition-colors text-[13px] font-medium text-slate-300">
                        { icons::log_out() }
                        <span>{"Log Out"}</span>
                    </button>
                </div>
            </div>
        </div>
    }
}

pub fn page_shell(title: &'static str, actions: Html, children: Html) -> Html {
    html! {
        <div class="p-6 max-w-7xl mx-auto">
            <div class="flex items-center justify-between pb-4 border-b border-border">
                <h1 class="text-2xl font-bold text-foreground">{ title }</h1>
                { actions }
            </div>
            <div class="pt-5 space-y-6">
                { children }
            </div>
        </div>
    }
}
