use std::rc::Rc;

use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::{
    auth::AuthState,
    config::Config,
    context::{AppContext, Notifier, Services},
    http::GlooTransport,
    notify::NoticeQueue,
    storage::browser_storage,
    views::{
        AccountsPage, AuthScreen, BusyOverlay, DashboardPage, Layout, NoticeStack, Page,
        TransactionsPage,
    },
};

#[derive(Properties, PartialEq)]
pub struct AppProps {
    pub config: Config,
}

#[function_component(App)]
pub fn app(props: &AppProps) -> Html {
    let services = use_memo(
        |config: &Config| Services::new(config.clone(), Rc::new(GlooTransport), browser_storage()),
        props.config.clone(),
    );
    let auth_state = use_state(|| AuthState::Anonymous);
    let restored = use_state(|| false);
    let busy = use_state(|| false);
    let notices = use_reducer(NoticeQueue::default);
    let active_page = use_state(|| Page::Dashboard);
    let opened_account = use_state(|| None::<String>);

    {
        let services = services.clone();
        let auth_state = auth_state.clone();
        let restored = restored.clone();
        let busy = busy.clone();
        use_effect_with_deps(
            move |_| {
                services.client.loading().on_change(move |loading| busy.set(loading));
                services.auth.on_change(move |state| auth_state.set(state));

                let auth = services.auth.clone();
                spawn_local(async move {
                    if auth.restore().await.is_some() {
                        tracing::info!("resumed stored session");
                    }
                    restored.set(true);
                });
                || ()
            },
            (),
        );
    }

    let notifier = Notifier::new(notices);

    let on_select = {
        let active_page = active_page.clone();
        let opened_account = opened_account.clone();
        Callback::from(move |page: Page| {
            opened_account.set(None);
            active_page.set(page);
        })
    };

    let on_open_account = {
        let active_page = active_page.clone();
        let opened_account = opened_account.clone();
        Callback::from(move |account_id: String| {
            opened_account.set(Some(account_id));
            active_page.set(Page::Transactions);
        })
    };

    let on_new_account = {
        let active_page = active_page.clone();
        Callback::from(move |_: ()| active_page.set(Page::Accounts))
    };

    let on_logout = {
        let auth = services.auth.clone();
        let notifier = notifier.clone();
        let active_page = active_page.clone();
        Callback::from(move |_: ()| {
            auth.logout();
            notifier.clear();
            active_page.set(Page::Dashboard);
        })
    };

    let context = AppContext {
        services: services.clone(),
        auth_state: (*auth_state).clone(),
        notifier,
    };

    let content = if !*restored {
        html! {
            <div class="min-h-screen flex items-center justify-center bg-background text-muted-foreground">
                {"Checking session..."}
            </div>
        }
    } else if auth_state.is_authenticated() {
        let page = match *active_page {
            Page::Dashboard => html! {
                <DashboardPage on_open_account={on_open_account.clone()} on_new_account={on_new_account} />
            },
            Page::Accounts => html! { <AccountsPage on_open_account={on_open_account.clone()} /> },
            Page::Transactions => html! {
                <TransactionsPage key={(*opened_account).clone().unwrap_or_default()} initial_account={(*opened_account).clone()} />
            },
        };
        html! {
            <Layout active_page={*active_page} on_select={on_select} on_logout={on_logout}>
                { page }
            </Layout>
        }
    } else {
        html! { <AuthScreen /> }
    };

    html! {
        <ContextProvider<AppContext> context={context}>
            { content }
            <NoticeStack />
            <BusyOverlay busy={*busy} />
        </ContextProvider<AppContext>>
    }
}
