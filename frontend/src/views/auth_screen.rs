use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::{
    context::use_app,
    forms::{LoginForm, RegisterForm},
};

const INPUT_CLASS: &str = "w-full px-4 py-2 bg-input border border-input rounded-lg text-foreground focus:outline-none focus:ring-2 focus:ring-primary";

pub(super) fn input_field(
    label: &'static str,
    input_type: &'static str,
    state: &UseStateHandle<String>,
) -> Html {
    let oninput = {
        let state = state.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            state.set(input.value());
        })
    };

    html! {
        <div class="space-y-1">
            <label class="text-sm font-medium text-foreground">{ label }</label>
            <input type={input_type} class={INPUT_CLASS} value={(**state).clone()} oninput={oninput} />
        </div>
    }
}

#[function_component(AuthScreen)]
pub fn auth_screen() -> Html {
    let app = use_app();
    let is_login = use_state(|| true);
    let first_name = use_state(String::new);
    let last_name = use_state(String::new);
    let email = use_state(String::new);
    let birthdate = use_state(String::new);
    let password = use_state(String::new);
    let confirm_password = use_state(String::new);
    let error = use_state(|| None::<String>);
    let loading = use_state(|| false);

    let on_submit = {
        let auth = app.auth();
        let notifier = app.notifier.clone();
        let is_login = is_login.clone();
        let first_name = first_name.clone();
        let last_name = last_name.clone();
        let email = email.clone();
        let birthdate = birthdate.clone();
        let password = password.clone();
        let confirm_password = confirm_password.clone();
        let error = error.clone();
        let loading = loading.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if *loading {
                return;
            }

            let auth = auth.clone();
            let notifier = notifier.clone();
            let error_async = error.clone();
            let loading_async = loading.clone();

            if *is_login {
                let form = LoginForm {
                    email: (*email).clone(),
                    password: (*password).clone(),
                };
                let credentials = match form.validate() {
                    Ok(credentials) => credentials,
                    Err(invalid) => return error.set(Some(invalid.to_string())),
                };

                loading.set(true);
                error.set(None);
                spawn_local(async move {
                    match auth.login(&credentials).await {
                        Ok(user) => notifier.success(format!("Welcome back, {}!", user.first_name)),
                        Err(e) => {
                            notifier.error(e.to_string());
                            error_async.set(Some(e.to_string()));
                        }
                    }
                    loading_async.set(false);
                });
            } else {
                let form = RegisterForm {
                    first_name: (*first_name).clone(),
                    last_name: (*last_name).clone(),
                    email: (*email).clone(),
                    birthdate: (*birthdate).clone(),
                    password: (*password).clone(),
                    confirm_password: (*confirm_password).clone(),
                };
                let new_user = match form.validate() {
                    Ok(new_user) => new_user,
                    Err(invalid) => return error.set(Some(invalid.to_string())),
                };

                loading.set(true);
                error.set(None);
                spawn_local(async move {
                    match auth.register(&new_user).await {
                        Ok(_) => notifier.success("Your account has been created"),
                        Err(e) => {
                            notifier.error(e.to_string());
                            error_async.set(Some(e.to_string()));
                        }
                    }
                    loading_async.set(false);
                });
            }
        })
    };

    let toggle_mode = {
        let is_login = is_login.clone();
        let error = error.clone();
        Callback::from(move |_| {
            error.set(None);
            is_login.set(!*is_login);
        })
    };

    html! {
        <div class="min-h-screen flex items-center justify-center bg-background">
            <div class="w-full max-w-md bg-card border border-border rounded-2xl shadow-lg p-8">
                <div class="text-center mb-6">
                    <h1 class="text-2xl font-bold text-foreground">{ if *is_login { "Welcome back" } else { "Open an account" } }</h1>
                    <p class="text-sm text-muted-foreground mt-2">
                        { if *is_login { "Sign in to XBank." } else { "It takes less than a minute." } }
                    </p>
                </div>

                <form class="space-y-4" onsubmit={on_submit}>
                    if !*is_login {
                        <div class="grid grid-cols-2 gap-3">
                            { input_field("First name", "text", &first_name) }
                            { input_field("Last name", "text", &last_name) }
                        </div>
                    }
                    { input_field("Email", "email", &email) }
                    if !*is_login {
                        { input_field("Date of birth", "date", &birthdate) }
                    }
                    { input_field("Password", "password", &password) }
                    if !*is_login {
                        { input_field("Confirm Password", "password", &confirm_password) }
                    }

                    if let Some(msg) = &*error {
                        <div class="text-sm text-red-500">{ msg.clone() }</div>
                    }

                    <button
                        type="submit"
                        class="w-full bg-primary text-primary-foreground py-2 rounded-lg font-semibold hover:opacity-90 transition-opacity disabled:opacity-50"
                        disabled={*loading}
                    >
                        { if *loading { "Please wait..." } else if *is_login { "Login" } else { "Sign up" } }
                    </button>
                </form>

                <div class="mt-6 text-center text-sm text-muted-foreground">
                    { if *is_login { "No account?" } else { "Already have an account?" } }
                    <button class="ml-2 text-primary font-semibold" onclick={toggle_mode}>
                        { if *is_login { "Sign up" } else { "Login" } }
                    </button>
                </div>
            </div>
        </div>
    }
}
