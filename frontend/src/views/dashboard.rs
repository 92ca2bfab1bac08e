use std::{cell::Cell, rc::Rc};

use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use super::{icons, layout::page_shell, transactions::history_row};
use crate::{
    context::use_app,
    format::{format_money, indicative_total_rub, mask_account_id},
    models::{AccountSummary, Currency, TransactionEntry},
};

#[derive(Properties, PartialEq)]
pub struct AccountCardProps {
    pub account: AccountSummary,
    #[prop_or_default]
    pub on_open: Option<Callback<String>>,
}

#[function_component(AccountCard)]
pub fn account_card(props: &AccountCardProps) -> Html {
    let account = &props.account;
    let onclick = props.on_open.clone().map(|on_open| {
        let account_id = account.account_id.clone();
        Callback::from(move |_: MouseEvent| on_open.emit(account_id.clone()))
    });

    html! {
        <div class="bg-card p-6 rounded-[10px] shadow-sm border border-border flex justify-between items-start cursor-pointer hover:shadow-md transition-shadow" onclick={onclick}>
            <div>
                <p class="text-muted-foreground text-[10px] font-bold mb-1 tracking-widest uppercase">
                    { format!("{} · {}", account.account_type.label(), account.currency.code()) }
                </p>
                <h3 class="text-2xl font-bold text-[#1D617A] tracking-tight">{ format_money(account.balance, account.currency) }</h3>
                <p class="text-xs text-slate-400 mt-2 font-mono">{ mask_account_id(&account.account_id) }</p>
            </div>
            <div class="p-3 bg-[#eef4f9] rounded-[10px]">
                { icons::credit_card() }
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct DashboardPageProps {
    pub on_open_account: Callback<String>,
    pub on_new_account: Callback<()>,
}

#[function_component(DashboardPage)]
pub fn dashboard_page(props: &DashboardPageProps) -> Html {
    let app = use_app();
    let accounts = app
        .user()
        .map(|user| user.accounts.clone())
        .unwrap_or_default();
    let first_account = accounts.first().map(|account| account.account_id.clone());
    let recent = use_state(Vec::<TransactionEntry>::new);

    {
        let client = app.client().clone();
        let notifier = app.notifier.clone();
        let size = app.config().preview_page_size;
        let recent = recent.clone();

        use_effect_with_deps(
            move |first_account: &Option<String>| {
                let cancelled = Rc::new(Cell::new(false));
                match first_account.clone() {
                    Some(account_id) => {
                        let cancelled = cancelled.clone();
                        spawn_local(async move {
                            let result = client.transactions().recent(&account_id, 0, size).await;
                            if cancelled.get() {
                                return;
                            }
                            match result {
                                Ok(page) => recent.set(page.transactions),
                                Err(error) => {
                                    tracing::warn!(%error, "failed to load recent transactions");
                                    notifier.error(error.to_string());
                                }
                            }
                        });
                    }
                    None => recent.set(Vec::new()),
                }
                move || cancelled.set(true)
            },
            first_account,
        );
    }

    let total = indicative_total_rub(&accounts);
    let new_account_button = html! {
        <button
            class="flex items-center gap-2 px-4 py-2 bg-[#173E63] text-white rounded-lg text-sm font-semibold hover:opacity-90"
            onclick={props.on_new_account.reform(|_: MouseEvent| ())}
        >
            { icons::plus() }
            <span>{"New account"}</span>
        </button>
    };

    page_shell(
        "Dashboard",
        new_account_button,
        html! {
            <>
                <div class="bg-[#173E63] text-white p-6 rounded-[16px] shadow-lg">
                    <p class="text-[10px] font-bold tracking-widest uppercase text-slate-300">{"Total balance (indicative)"}</p>
                    <h2 class="text-3xl font-black tracking-tight mt-1">{ format_money(total, Currency::Rub) }</h2>
                    <p class="text-xs text-slate-300 mt-2">{"Converted at fixed display rates. Your accounts keep their own currencies."}</p>
                </div>

                if accounts.is_empty() {
                    <div class="bg-card p-6 rounded-[10px] border border-dashed border-border text-center text-sm text-muted-foreground">
                        {"You have no accounts yet. Open one to start banking."}
                    </div>
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

                <div class="bg-card rounded-[10px] shadow-sm border border-border">
                    <div class="px-6 py-4 border-b border-border flex items-center justify-between">
                        <h3 class="text-sm font-bold text-[#173E63]">{"Recent activity"}</h3>
                        if let Some(account) = accounts.first() {
                            <span class="text-xs text-slate-400 font-mono">{ mask_account_id(&account.account_id) }</span>
                        }
                    </div>
                    if recent.is_empty() {
                        <p class="px-6 py-4 text-sm text-muted-foreground">{"No transactions yet."}</p>
                    } else {
                        <div class="divide-y divide-border">
                            { for recent.iter().map(history_row) }
                        </div>
                    }
                </div>
            </>
        },
    )
}
