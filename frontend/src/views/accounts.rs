use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlSelectElement;
use yew::prelude::*;

use super::{dashboard::AccountCard, layout::page_shell};
use crate::{
    context::use_app,
    models::{AccountType, Currency, NewAccount},
};

const SELECT_CLASS: &str = "w-full px-4 py-2 bg-input border border-input rounded-lg text-foreground focus:outline-none focus:ring-2 focus:ring-primary";

#[derive(Properties, PartialEq)]
pub struct AccountsPageProps {
    pub on_open_account: Callback<String>,
}

#[function_component(AccountsPage)]
pub fn accounts_page(props: &AccountsPageProps) -> Html {
    let app = use_app();
    let draft = use_state(NewAccount::default);
    let saving = use_state(|| false);

    let on_currency = {
        let draft = draft.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            if let Some(currency) = Currency::from_code(&select.value()) {
                draft.set(NewAccount {
                    currency,
                    ..*draft
                });
            }
        })
    };

    let on_account_type = {
        let draft = draft.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            if let Some(account_type) = AccountType::from_code(&select.value()) {
                draft.set(NewAccount {
                    account_type,
                    ..*draft
                });
            }
        })
    };

    let on_submit = {
        let client = app.client().clone();
        let auth = app.auth();
        let notifier = app.notifier.clone();
        let draft = draft.clone();
        let saving = saving.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if *saving {
                return;
            }
            saving.set(true);

            let client = client.clone();
            let auth = auth.clone();
            let notifier = notifier.clone();
            let request = *draft;
            let draft = draft.clone();
            let saving = saving.clone();
            spawn_local(async move {
                match client.accounts().create(&request).await {
                    Ok(account) => {
                        notifier.success(format!(
                            "{} {} account opened",
                            account.currency.code(),
                            account.account_type.label().to_lowercase()
                        ));
                        draft.set(NewAccount::default());
                        if let Err(error) = auth.refresh_user().await {
                            tracing::warn!(%error, "failed to refresh the profile");
                        }
                    }
                    Err(error) => notifier.error(error.to_string()),
                }
                saving.set(false);
            });
        })
    };

    let accounts = app
        .user()
        .map(|user| user.accounts.clone())
        .unwrap_or_default();

    page_shell(
        "Accounts",
        html! {},
        html! {
            <>
                <form class="bg-card p-6 rounded-[10px] shadow-sm border border-border grid grid-cols-1 md:grid-cols-3 gap-4 items-end" onsubmit={on_submit}>
                    <div class="space-y-1">
                        <label class="text-sm font-medium text-foreground">{"Currency"}</label>
                        <select class={SELECT_CLASS} onchange={on_currency}>
                            { for Currency::ALL.iter().map(|currency| html! {
                                <option value={currency.code()} selected={*currency == draft.currency}>
                                    { format!("{} ({})", currency.name(), currency.symbol()) }
                                </option>
                            }) }
                        </select>
                    </div>
                    <div class="space-y-1">
                        <label class="text-sm font-medium text-foreground">{"Type"}</label>
                        <select class={SELECT_CLASS} onchange={on_account_type}>
                            { for AccountType::ALL.iter().map(|account_type| html! {
                                <option value={account_type.code()} selected={*account_type == draft.account_type}>
                                    { account_type.label() }
                                </option>
                            }) }
                        </select>
                    </div>
                    <button
                        type="submit"
                        class="w-full bg-[#173E63] text-white py-2 rounded-lg font-semibold hover:opacity-90 transition-opacity disabled:opacity-50"
                        disabled={*saving}
                    >
                        { if *saving { "Opening..." } else { "Open account" } }
                    </button>
                </form>

                if accounts.is_empty() {
                    <p class="text-sm text-muted-foreground">{"No accounts yet."}</p>
                } else {
                    <div class="grid grid-cols-1 md:grid-cols-3 gap-4">
                        { for accounts.iter().map(|account| html! {
                            <AccountCard
                                key={account.account_id.clone()}
                                account={account.clone()}
                                on_open={Some(props.on_open_account.clone())}
                            />
                        }) }
                    </div>
                }
            </>
        },
    )
}
