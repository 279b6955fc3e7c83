use web_sys::HtmlInputElement;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct ConfirmModalProps {
    /// Whether the modal is visible at all.
    pub open: bool,
    /// Body copy describing the pending action.
    pub message: String,
    /// Confirm-button label ("Approve"/"Reject").
    pub confirm_label: String,
    /// Red confirm button for destructive (reject) flows.
    pub danger: bool,
    /// Whether the rejection-reason field is shown.
    pub show_reason: bool,
    /// Current reason text (owned by the page).
    pub reason: String,
    /// True while the submission is on the wire; both buttons lock and the
    /// confirm button relabels.
    pub busy: bool,
    pub on_reason_input: Callback<String>,
    pub on_confirm: Callback<()>,
    pub on_cancel: Callback<()>,
}

/// Confirmation dialog shared by the single-row and bulk-reject flows.
#[function_component(ConfirmModal)]
pub fn confirm_modal(props: &ConfirmModalProps) -> Html {
    if !props.open {
        return Html::default();
    }

    let on_reason_input = {
        let callback = props.on_reason_input.clone();
        Callback::from(move |event: InputEvent| {
            if let Some(target) = event.target_dyn_into::<HtmlInputElement>() {
                callback.emit(target.value());
            }
        })
    };

    let on_confirm = {
        let callback = props.on_confirm.clone();
        Callback::from(move |_| callback.emit(()))
    };

    let on_cancel = {
        let callback = props.on_cancel.clone();
        Callback::from(move |_| callback.emit(()))
    };

    let confirm_classes = classes!(
        "px-4",
        "py-2",
        "rounded-xl",
        "text-white",
        if props.danger { "bg-red-600" } else { "bg-green-600" },
        props.busy.then_some("opacity-50"),
    );

    html! {
        <div class="fixed inset-0 z-40 flex items-center justify-center bg-black/40">
            <div class="w-full max-w-md rounded-2xl bg-white p-6 shadow-2xl dark:bg-gray-900">
                <p class="mb-4 text-sm text-gray-800 dark:text-gray-100">
                    { props.message.clone() }
                </p>
                if props.show_reason {
                    <div class="mb-4">
                        <label
                            for="reject-reason"
                            class="mb-1 block text-xs font-medium text-gray-500"
                        >
                            { "Reason for rejection" }
                        </label>
                        <input
                            id="reject-reason"
                            type="text"
                            class="w-full rounded-lg border border-gray-300 px-3 py-2 text-sm dark:border-gray-700 dark:bg-gray-800"
                            placeholder="Shared with the applicant"
                            value={props.reason.clone()}
                            disabled={props.busy}
                            oninput={on_reason_input}
                        />
                    </div>
                }
                <div class="flex justify-end gap-2">
                    <button
                        type="button"
                        class="px-4 py-2 rounded-xl border border-gray-200 text-sm dark:border-gray-700"
                        disabled={props.busy}
                        onclick={on_cancel}
                    >
                        { "Cancel" }
                    </button>
                    <button
                        type="button"
                        class={confirm_classes}
                        disabled={props.busy}
                        onclick={on_confirm}
                    >
                        { if props.busy { "Processing...".to_string() } else { props.confirm_label.clone() } }
                    </button>
                </div>
            </div>
        </div>
    }
}
