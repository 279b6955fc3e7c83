use std::collections::{HashMap, HashSet};

use chrono::Local;
use classdesk_shared::filters::{apply_filters, SortKey, TimeWindow, ViewOptions};
use classdesk_shared::flow::{
    bulk_approve_request, confirm_intent, outcome_notice, ActionIntent, ActionKind, DashboardFlow,
};
use classdesk_shared::wire::ActionRequest;
use classdesk_shared::{PendingSet, Registration, Role};
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;
use yew_hooks::prelude::use_interval;

use crate::api;
use crate::components::confirm_modal::ConfirmModal;
use crate::components::registration_table::RegistrationTable;
use crate::components::toast::Toast;
use crate::utils;

const SERVER_ERROR_NOTICE: &str = "Server error. Please try again.";

/// Seed the per-row role choice from roles requested at sign-up.
fn seed_roles(records: &[Registration]) -> HashMap<String, Role> {
    records
        .iter()
        .filter_map(|r| r.role.map(|role| (r.id.clone(), role)))
        .collect()
}

/// Acquire the lock and fire the request.
///
/// The flow is moved to `Submitting` before the async call is spawned, so
/// every trigger is disabled by the time any other event can run. Both
/// resolution paths drop back to `Idle` and re-enable the controls; only
/// the success path touches the canonical set.
fn spawn_submission(
    request: ActionRequest,
    pending: UseStateHandle<PendingSet>,
    selected: UseStateHandle<HashSet<String>>,
    select_all: UseStateHandle<bool>,
    reason: UseStateHandle<String>,
    flow: UseStateHandle<DashboardFlow>,
    toast: UseStateHandle<String>,
) {
    flow.set(DashboardFlow::Submitting(request.clone()));

    wasm_bindgen_futures::spawn_local(async move {
        let success = api::update_user_status(&request).await;

        if success {
            let affected = request.affected_ids();
            let mut next = (*pending).clone();
            next.remove_ids(&affected);
            pending.set(next);

            let mut still_selected = (*selected).clone();
            still_selected.retain(|id| !affected.contains(id));
            selected.set(still_selected);
            select_all.set(false);
            reason.set(String::new());

            toast.set(outcome_notice(affected.len(), request.action));
        } else {
            toast.set(SERVER_ERROR_NOTICE.to_string());
        }

        flow.set(DashboardFlow::Idle);
    });
}

/// Admin view of the pending registration queue: search/filter/sort,
/// per-row and bulk approve/reject with confirmation, and a live clock.
#[function_component(DashboardPage)]
pub fn dashboard_page() -> Html {
    let pending = use_state(utils::hydrate_pending);
    let roles = {
        let pending = pending.clone();
        use_state(move || seed_roles(pending.records()))
    };
    let options = use_state(ViewOptions::default);
    let selected = use_state(HashSet::<String>::new);
    let select_all = use_state(|| false);
    let reason = use_state(String::new);
    let flow = use_state(DashboardFlow::default);
    let toast = use_state(String::new);
    let bulk_menu_open = use_state(|| false);

    // Independent one-second clock; shares no state with the action flow.
    let clock = use_state(|| Local::now());
    {
        let clock = clock.clone();
        use_interval(move || clock.set(Local::now()), 1000);
    }

    // Derived view, recomputed from the canonical set on every render
    // (hence on every keystroke and control change).
    let view = apply_filters(pending.records(), &options, utils::local_midnight());
    let view_ids: Vec<String> = view.iter().map(|r| r.id.clone()).collect();
    // Selected ids in canonical order, captured for the bulk gestures.
    let selection: Vec<String> = pending
        .records()
        .iter()
        .filter(|r| selected.contains(&r.id))
        .map(|r| r.id.clone())
        .collect();

    let on_search_input = {
        let options = options.clone();
        Callback::from(move |event: InputEvent| {
            if let Some(target) = event.target_dyn_into::<HtmlInputElement>() {
                options.set(ViewOptions {
                    search: target.value(),
                    ..(*options).clone()
                });
            }
        })
    };

    let on_window_change = {
        let options = options.clone();
        Callback::from(move |event: Event| {
            if let Some(target) = event.target_dyn_into::<HtmlSelectElement>() {
                options.set(ViewOptions {
                    window: TimeWindow::parse(&target.value()),
                    ..(*options).clone()
                });
            }
        })
    };

    let on_sort_change = {
        let options = options.clone();
        Callback::from(move |event: Event| {
            if let Some(target) = event.target_dyn_into::<HtmlSelectElement>() {
                options.set(ViewOptions {
                    sort: SortKey::parse(&target.value()),
                    ..(*options).clone()
                });
            }
        })
    };

    let on_toggle_select = {
        let selected = selected.clone();
        Callback::from(move |(id, checked): (String, bool)| {
            let mut next = (*selected).clone();
            if checked {
                next.insert(id);
            } else {
                next.remove(&id);
            }
            selected.set(next);
        })
    };

    // Select-all applies to the rows currently visible through the filter.
    let on_select_all = {
        let selected = selected.clone();
        let select_all = select_all.clone();
        let view_ids = view_ids.clone();
        Callback::from(move |checked: bool| {
            select_all.set(checked);
            if checked {
                selected.set(view_ids.iter().cloned().collect());
            } else {
                selected.set(HashSet::new());
            }
        })
    };

    let on_role_change = {
        let roles = roles.clone();
        Callback::from(move |(id, role): (String, Option<Role>)| {
            let mut next = (*roles).clone();
            match role {
                Some(role) => next.insert(id, role),
                None => next.remove(&id),
            };
            roles.set(next);
        })
    };

    // Row approve/reject: capture the intent, open the modal. No locking
    // here; the lock is taken only when a request actually starts.
    let on_row_action = {
        let flow = flow.clone();
        let reason = reason.clone();
        Callback::from(move |(id, action): (String, ActionKind)| {
            if flow.is_locked() {
                return;
            }
            reason.set(String::new());
            flow.set(DashboardFlow::Confirming(ActionIntent::Single { action, id }));
        })
    };

    let on_bulk_reject = {
        let flow = flow.clone();
        let reason = reason.clone();
        let toast = toast.clone();
        let bulk_menu_open = bulk_menu_open.clone();
        let selection = selection.clone();
        Callback::from(move |_| {
            if flow.is_locked() {
                return;
            }
            bulk_menu_open.set(false);
            if selection.is_empty() {
                toast.set("Select at least one user.".to_string());
                return;
            }
            reason.set(String::new());
            flow.set(DashboardFlow::Confirming(ActionIntent::BulkReject {
                ids: selection.clone(),
            }));
        })
    };

    // Bulk approve skips the modal: validate and submit immediately.
    let on_bulk_approve = {
        let flow = flow.clone();
        let toast = toast.clone();
        let bulk_menu_open = bulk_menu_open.clone();
        let selection = selection.clone();
        let roles = roles.clone();
        let pending = pending.clone();
        let selected = selected.clone();
        let select_all = select_all.clone();
        let reason = reason.clone();
        Callback::from(move |_| {
            if flow.is_locked() {
                return;
            }
            bulk_menu_open.set(false);
            match bulk_approve_request(&selection, &roles) {
                Ok(request) => spawn_submission(
                    request,
                    pending.clone(),
                    selected.clone(),
                    select_all.clone(),
                    reason.clone(),
                    flow.clone(),
                    toast.clone(),
                ),
                Err(err) => toast.set(err.to_string()),
            }
        })
    };

    let on_confirm = {
        let flow = flow.clone();
        let roles = roles.clone();
        let reason = reason.clone();
        let toast = toast.clone();
        let pending = pending.clone();
        let selected = selected.clone();
        let select_all = select_all.clone();
        Callback::from(move |_| {
            let DashboardFlow::Confirming(intent) = (*flow).clone() else {
                return;
            };
            match confirm_intent(&intent, &roles, &reason) {
                Ok(request) => spawn_submission(
                    request,
                    pending.clone(),
                    selected.clone(),
                    select_all.clone(),
                    reason.clone(),
                    flow.clone(),
                    toast.clone(),
                ),
                Err(err) => {
                    // Lock was never acquired; just surface the notice and
                    // reset the transient modal state.
                    toast.set(err.to_string());
                    reason.set(String::new());
                    flow.set(DashboardFlow::Idle);
                },
            }
        })
    };

    let on_cancel = {
        let flow = flow.clone();
        let reason = reason.clone();
        Callback::from(move |_| {
            reason.set(String::new());
            flow.set(DashboardFlow::Idle);
        })
    };

    let on_toast_close = {
        let toast = toast.clone();
        Callback::from(move |_| toast.set(String::new()))
    };

    let on_bulk_menu_toggle = {
        let bulk_menu_open = bulk_menu_open.clone();
        Callback::from(move |_| bulk_menu_open.set(!*bulk_menu_open))
    };

    let (modal_message, modal_label, modal_danger, modal_show_reason) = match &*flow {
        DashboardFlow::Idle => (String::new(), "", false, false),
        DashboardFlow::Confirming(intent) => (
            intent.prompt(),
            intent.action().label(),
            intent.action() == ActionKind::Reject,
            intent.needs_reason(),
        ),
        DashboardFlow::Submitting(request) => (
            String::from("Applying changes..."),
            request.action.label(),
            request.action == ActionKind::Reject,
            request.action == ActionKind::Reject,
        ),
    };

    html! {
        <div class="mx-auto max-w-6xl p-6">
            <header class="mb-6 flex flex-wrap items-end justify-between gap-4">
                <div>
                    <h1 class="text-xl font-semibold">{ "Pending registrations" }</h1>
                    <p class="text-sm text-gray-500">
                        { format!("{} awaiting review", pending.len()) }
                    </p>
                </div>
                <div class="text-right">
                    <p id="current-time" class="text-lg font-medium">
                        { utils::format_clock_time(&clock) }
                    </p>
                    <p id="current-date" class="text-xs text-gray-500">
                        { utils::format_clock_date(&clock) }
                    </p>
                </div>
            </header>

            <div class="mb-4 flex flex-wrap items-center gap-3">
                <input
                    id="search-input"
                    type="search"
                    class="w-64 rounded-lg border border-gray-300 px-3 py-2 text-sm dark:border-gray-700 dark:bg-gray-800"
                    placeholder="Search name, email or phone"
                    oninput={on_search_input}
                />
                <select
                    class="rounded-lg border border-gray-300 px-2 py-2 text-sm dark:border-gray-700 dark:bg-gray-800"
                    onchange={on_window_change}
                >
                    <option value="all">{ "All time" }</option>
                    <option value="today">{ "Today" }</option>
                    <option value="week">{ "Past week" }</option>
                </select>
                <select
                    class="rounded-lg border border-gray-300 px-2 py-2 text-sm dark:border-gray-700 dark:bg-gray-800"
                    onchange={on_sort_change}
                >
                    <option value="">{ "Original order" }</option>
                    <option value="recent">{ "Newest first" }</option>
                    <option value="oldest">{ "Oldest first" }</option>
                    <option value="name_asc">{ "Name A-Z" }</option>
                    <option value="name_desc">{ "Name Z-A" }</option>
                </select>

                <div class="relative ml-auto">
                    <button
                        type="button"
                        class="rounded-lg border border-gray-300 px-3 py-2 text-sm dark:border-gray-700"
                        onclick={on_bulk_menu_toggle}
                    >
                        { "Bulk actions" }
                    </button>
                    if *bulk_menu_open {
                        <div class="absolute right-0 z-30 mt-1 w-44 rounded-xl border border-gray-200 bg-white p-1 shadow-lg dark:border-gray-700 dark:bg-gray-900">
                            <button
                                type="button"
                                class="block w-full rounded-lg px-3 py-2 text-left text-sm hover:bg-gray-100 dark:hover:bg-gray-800"
                                disabled={flow.is_locked()}
                                onclick={on_bulk_approve}
                            >
                                { "Approve selected" }
                            </button>
                            <button
                                type="button"
                                class="block w-full rounded-lg px-3 py-2 text-left text-sm text-red-600 hover:bg-gray-100 dark:hover:bg-gray-800"
                                disabled={flow.is_locked()}
                                onclick={on_bulk_reject}
                            >
                                { "Reject selected" }
                            </button>
                        </div>
                    }
                </div>
            </div>

            <RegistrationTable
                records={view}
                selected={(*selected).clone()}
                roles={(*roles).clone()}
                select_all={*select_all}
                locked={flow.is_locked()}
                roles_disabled={flow.roles_disabled()}
                on_select_all={on_select_all}
                on_toggle_select={on_toggle_select}
                on_role_change={on_role_change}
                on_action={on_row_action}
            />

            <ConfirmModal
                open={flow.modal_open()}
                message={modal_message}
                confirm_label={modal_label.to_string()}
                danger={modal_danger}
                show_reason={modal_show_reason}
                reason={(*reason).clone()}
                busy={flow.is_locked()}
                on_reason_input={Callback::from({
                    let reason = reason.clone();
                    move |value: String| reason.set(value)
                })}
                on_confirm={on_confirm}
                on_cancel={on_cancel}
            />

            <Toast message={(*toast).clone()} on_close={on_toast_close} />
        </div>
    }
}
