use std::{cell::Cell, rc::Rc};

use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlSelectElement;
use yew::prelude::*;

use super::{auth_screen::input_field, icons, layout::page_shell};
use crate::{
    context::use_app,
    format::{format_money, mask_account_id, short_date},
    forms::TransactionForm,
    models::{RecentTransactions, TransactionEntry, TransactionType},
};

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum Tab {
    History,
    Operation(TransactionType),
}

impl Tab {
    const ALL: [Tab; 4] = [
        Tab::History,
        Tab::Operation(TransactionType::Transfer),
        Tab::Operation(TransactionType::Deposit),
        Tab::Operation(TransactionType::Payment),
    ];

    fn label(self) -> &'static str {
        match self {
            Tab::History => "History",
            Tab::Operation(kind) => kind.label(),
        }
    }
}

pub(super) fn history_row(entry: &TransactionEntry) -> Html {
    let incoming = entry.transaction_type == TransactionType::Deposit;
    let (icon, amount_class, sign) = if incoming {
        (icons::arrow_down_left(), "text-sm font-bold text-emerald-600", "+")
    } else {
        (icons::arrow_up_right(), "text-sm font-bold text-[#173E63]", "")
    };
    let detail = entry
        .comment
        .as_deref()
        .or_else(|| entry.counterparty())
        .unwrap_or_default()
        .to_string();

    html! {
        <div class="px-6 py-3 flex items-center gap-4 hover:bg-slate-50">
            <div class="p-2 bg-[#eef4f9] rounded-[10px]">{ icon }</div>
            <div class="flex-1 min-w-0">
                <p class="text-sm font-bold text-[#173E63]">{ entry.transaction_type.label() }</p>
                <p class="text-xs text-slate-500 truncate">{ detail }</p>
            </div>
            <div class="text-right">
                <p class={amount_class}>{ format!("{sign}{}", format_money(entry.amount, entry.currency)) }</p>
                <p class="text-[10px] text-slate-400 font-bold uppercase tracking-tighter">{ short_date(&entry.transaction_date) }</p>
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct TransactionsPageProps {
    #[prop_or_default]
    pub initial_account: Option<String>,
}

#[function_component(TransactionsPage)]
pub fn transactions_page(props: &TransactionsPageProps) -> Html {
    let app = use_app();
    let user = app.user().cloned().unwrap_or_default();
    let accounts = user.accounts.clone();

    let selected = use_state(|| props.initial_account.clone());
    let tab = use_state(|| Tab::History);
    let page = use_state(|| 0u32);
    let reload = use_state(|| 0u32);
    let history = use_state(|| None::<RecentTransactions>);

    let amount = use_state(String::new);
    let recipient = use_state(String::new);
    let comment = use_state(String::new);
    let submitting = use_state(|| false);

    // fall back to the first account when nothing (or a vanished account) is selected
    let account = selected
        .as_deref()
        .and_then(|id| user.account(id))
        .or_else(|| accounts.first())
        .cloned();
    let account_id = account.as_ref().map(|account| account.account_id.clone());

    {
        let client = app.client().clone();
        let notifier = app.notifier.clone();
        let size = app.config().history_page_size;
        let history = history.clone();

        use_effect_with_deps(
            move |(account_id, page, tab, _): &(Option<String>, u32, Tab, u32)| {
                let cancelled = Rc::new(Cell::new(false));
                if let (Some(account_id), Tab::History) = (account_id.clone(), *tab) {
                    let page = *page;
                    let cancelled = cancelled.clone();
                    spawn_local(async move {
                        let result = client.transactions().recent(&account_id, page, size).await;
                        if cancelled.get() {
                            tracing::debug!(page, "dropping superseded history response");
                            return;
                        }
                        match result {
                            Ok(recent) => history.set(Some(recent)),
                            Err(error) => {
                                tracing::warn!(%error, "failed to load history");
                                notifier.error(error.to_string());
                            }
                        }
                    });
                }
                move || cancelled.set(true)
            },
            (account_id.clone(), *page, *tab, *reload),
        );
    }

    let on_account = {
        let selected = selected.clone();
        let page = page.clone();
        let history = history.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            selected.set(Some(select.value()));
            page.set(0);
            history.set(None);
        })
    };

    let on_submit = {
        let client = app.client().clone();
        let auth = app.auth();
        let notifier = app.notifier.clone();
        let account = account.clone();
        let tab = tab.clone();
        let amount = amount.clone();
        let recipient = recipient.clone();
        let comment = comment.clone();
        let submitting = submitting.clone();
        let reload = reload.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let Tab::Operation(kind) = *tab else {
                return;
            };
            if *submitting {
                return;
            }

            let form = TransactionForm {
                amount: (*amount).clone(),
                recipient: (*recipient).clone(),
                comment: (*comment).clone(),
            };
            let request = match form.validate(kind, account.as_ref()) {
                Ok(request) => request,
                Err(invalid) => return notifier.error(invalid.to_string()),
            };

            submitting.set(true);
            let client = client.clone();
            let auth = auth.clone();
            let notifier = notifier.clone();
            let amount = amount.clone();
            let recipient = recipient.clone();
            let comment = comment.clone();
            let submitting = submitting.clone();
            let reload = reload.clone();
            spawn_local(async move {
                match client.transactions().submit(&request).await {
                    Ok(done) => {
                        notifier.success(format!(
                            "{} of {} completed",
                            kind.label(),
                            format_money(done.amount, done.currency)
                        ));
                        amount.set(String::new());
                        recipient.set(String::new());
                        comment.set(String::new());
                        if let Err(error) = auth.refresh_user().await {
                            tracing::warn!(%error, "failed to refresh the profile");
                        }
                        reload.set(reload.wrapping_add(1));
                    }
                    Err(error) => notifier.error(error.to_string()),
                }
                submitting.set(false);
            });
        })
    };

    let tabs = html! {
        <div class="flex gap-2">
            { for Tab::ALL.iter().map(|&item| {
                let class_name = if item == *tab {
                    "px-4 py-2 rounded-lg text-sm font-semibold bg-[#173E63] text-white"
                } else {
                    "px-4 py-2 rounded-lg text-sm font-semibold text-[#173E63] hover:bg-[#eef4f9]"
                };
                let tab = tab.clone();
                html! {
                    <button type="button" class={class_name} onclick={Callback::from(move |_| tab.set(item))}>
                        { item.label() }
                    </button>
                }
            }) }
        </div>
    };

    if accounts.is_empty() {
        return page_shell(
            "Transactions",
            html! {},
            html! {
                <p class="text-sm text-muted-foreground">{"Open an account first to send and receive money."}</p>
            },
        );
    }

    let selector = html! {
        <select
            class="px-4 py-2 bg-input border border-input rounded-lg text-foreground focus:outline-none focus:ring-2 focus:ring-primary"
            onchange={on_account}
        >
            { for accounts.iter().map(|item| html! {
                <option value={item.account_id.clone()} selected={Some(&item.account_id) == account_id.as_ref()}>
                    { format!("{} · {} · {}", mask_account_id(&item.account_id), item.currency.code(), format_money(item.balance, item.currency)) }
                </option>
            }) }
        </select>
    };

    let body = match *tab {
        Tab::History => history_panel((*history).as_ref(), &page),
        Tab::Operation(kind) => html! {
            <form class="bg-card p-6 rounded-[10px] shadow-sm border border-border space-y-4 max-w-lg" onsubmit={on_submit}>
                if kind == TransactionType::Transfer {
                    { input_field("Recipient account", "text", &recipient) }
                }
                { input_field("Amount", "text", &amount) }
                { input_field("Comment", "text", &comment) }
                <button
                    type="submit"
                    class="w-full bg-[#173E63] text-white py-2 rounded-lg font-semibold hover:opacity-90 transition-opacity disabled:opacity-50"
                    disabled={*submitting}
                >
                    { if *submitting { "Sending..." } else { kind.label() } }
                </button>
            </form>
        },
    };

    page_shell(
        "Transactions",
        selector,
        html! {
            <>
                { tabs }
                { body }
            </>
        },
    )
}

fn history_panel(history: Option<&RecentTransactions>, page: &UseStateHandle<u32>) -> Html {
    let Some(history) = history else {
        return html! { <p class="text-sm text-muted-foreground">{"Loading history..."}</p> };
    };

    let previous = history.previous_page();
    let next = history.next_page();
    let on_previous = {
        let page = page.clone();
        Callback::from(move |_| {
            if let Some(previous) = previous {
                page.set(previous);
            }
        })
    };
    let on_next = {
        let page = page.clone();
        Callback::from(move |_| {
            if let Some(next) = next {
                page.set(next);
            }
        })
    };

    html! {
        <div class="bg-card rounded-[10px] shadow-sm border border-border">
            if history.transactions.is_empty() {
                <p class="px-6 py-4 text-sm text-muted-foreground">{"No transactions yet."}</p>
            } else {
                <div class="divide-y divide-border">
                    { for history.transactions.iter().map(history_row) }
                </div>
            }
            <div class="px-6 py-3 border-t border-border flex items-center justify-between text-sm">
                <button class="font-semibold text-[#173E63] disabled:opacity-30" disabled={previous.is_none()} onclick={on_previous}>
                    {"Previous"}
                </button>
                <span class="text-slate-500">
                    { format!("Page {} of {}", history.page + 1, history.total_pages().max(1)) }
                </span>
                <button class="font-semibold text-[#173E63] disabled:opacity-30" disabled={next.is_none()} onclick={on_next}>
                    {"Next"}
                </button>
            </div>
        </div>
    }
}
