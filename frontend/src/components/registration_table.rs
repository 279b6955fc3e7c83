use std::collections::{HashMap, HashSet};

use classdesk_shared::flow::ActionKind;
use classdesk_shared::{Registration, Role};
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

use crate::utils::format_joined;

#[derive(Properties, PartialEq)]
pub struct RegistrationTableProps {
    /// Rows to render, already filtered and sorted by the page.
    pub records: Vec<Registration>,
    /// Ids with a checked selection box.
    pub selected: HashSet<String>,
    /// Operator's current role choice per id; absent means none picked yet.
    pub roles: HashMap<String, Role>,
    /// State of the select-all checkbox in the header.
    pub select_all: bool,
    /// In-flight lock: disables every approve/reject trigger.
    pub locked: bool,
    /// Disables role selectors while a reject confirmation is pending.
    pub roles_disabled: bool,
    pub on_select_all: Callback<bool>,
    pub on_toggle_select: Callback<(String, bool)>,
    pub on_role_change: Callback<(String, Option<Role>)>,
    pub on_action: Callback<(String, ActionKind)>,
}

/// The pending-registrations table, or an explicit empty-state panel when
/// there is nothing to decide.
#[function_component(RegistrationTable)]
pub fn registration_table(props: &RegistrationTableProps) -> Html {
    if props.records.is_empty() {
        return html! {
            <div
                id="no-requests-message"
                class="rounded-2xl border border-dashed border-gray-300 p-10 text-center text-sm text-gray-500 dark:border-gray-700"
            >
                { "No pending registration requests." }
            </div>
        };
    }

    let on_select_all = {
        let callback = props.on_select_all.clone();
        Callback::from(move |event: Event| {
            if let Some(target) = event.target_dyn_into::<HtmlInputElement>() {
                callback.emit(target.checked());
            }
        })
    };

    html! {
        <table class="w-full text-left text-sm">
            <thead>
                <tr class="text-xs uppercase tracking-wide text-gray-500">
                    <th class="py-2">
                        <input
                            type="checkbox"
                            id="select-all"
                            checked={props.select_all}
                            onchange={on_select_all}
                        />
                    </th>
                    <th class="py-2">{ "Name" }</th>
                    <th class="py-2">{ "Email" }</th>
                    <th class="py-2">{ "Phone" }</th>
                    <th class="py-2">{ "Role" }</th>
                    <th class="py-2">{ "Requested" }</th>
                    <th class="py-2">{ "Actions" }</th>
                </tr>
            </thead>
            <tbody>
                { for props.records.iter().map(|record| self::row(props, record)) }
            </tbody>
        </table>
    }
}

fn row(props: &RegistrationTableProps, record: &Registration) -> Html {
    let id = record.id.clone();
    let chosen_role = props.roles.get(&id).copied();

    let on_toggle = {
        let callback = props.on_toggle_select.clone();
        let id = id.clone();
        Callback::from(move |event: Event| {
            if let Some(target) = event.target_dyn_into::<HtmlInputElement>() {
                callback.emit((id.clone(), target.checked()));
            }
        })
    };

    let on_role = {
        let callback = props.on_role_change.clone();
        let id = id.clone();
        Callback::from(move |event: Event| {
            if let Some(target) = event.target_dyn_into::<HtmlSelectElement>() {
                callback.emit((id.clone(), Role::parse(&target.value())));
            }
        })
    };

    let on_approve = {
        let callback = props.on_action.clone();
        let id = id.clone();
        Callback::from(move |_| callback.emit((id.clone(), ActionKind::Approve)))
    };

    let on_reject = {
        let callback = props.on_action.clone();
        let id = id.clone();
        Callback::from(move |_| callback.emit((id.clone(), ActionKind::Reject)))
    };

    html! {
        <tr key={record.id.clone()} class="border-t dark:border-gray-800">
            <td class="py-3">
                <input
                    type="checkbox"
                    checked={props.selected.contains(&record.id)}
                    onchange={on_toggle}
                />
            </td>
            <td class="py-3 font-medium">
                { record.full_name.clone().unwrap_or_default() }
            </td>
            <td class="py-3">{ record.email.clone().unwrap_or_default() }</td>
            <td class="py-3">{ record.phone_number.clone().unwrap_or_default() }</td>
            <td class="py-3">
                <select
                    class="rounded-lg border border-gray-300 px-2 py-1 text-xs dark:border-gray-700 dark:bg-gray-800"
                    disabled={props.roles_disabled}
                    onchange={on_role}
                >
                    <option value="" selected={chosen_role.is_none()}>
                        { "Select role" }
                    </option>
                    { for Role::ALL.iter().map(|role| html! {
                        <option
                            value={role.as_str()}
                            selected={chosen_role == Some(*role)}
                        >
                            { role.label() }
                        </option>
                    }) }
                </select>
            </td>
            <td class="py-3 text-xs text-gray-500">{ format_joined(&record.date_joined) }</td>
            <td class="py-3">
                <div class="flex gap-2">
                    <button
                        type="button"
                        class={classes!(
                            "px-3", "py-1", "rounded-lg", "bg-green-600", "text-white", "text-xs",
                            props.locked.then_some("opacity-50"),
                        )}
                        disabled={props.locked}
                        onclick={on_approve}
                    >
                        { "Approve" }
                    </button>
                    <button
                        type="button"
                        class={classes!(
                            "px-3", "py-1", "rounded-lg", "border", "border-gray-200", "text-xs",
                            props.locked.then_some("opacity-50"),
                        )}
                        disabled={props.locked}
                        onclick={on_reject}
                    >
                        { "Reject" }
                    </button>
                </div>
            </td>
        </tr>
    }
}
