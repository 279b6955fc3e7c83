use yew::prelude::*;
use yew_hooks::prelude::use_timeout;

#[derive(Properties, PartialEq)]
pub struct ToastProps {
    /// Current notice; an empty string renders nothing.
    pub message: String,
    /// Fired when the toast dismisses itself or is clicked away.
    pub on_close: Callback<()>,
}

/// Transient notice for validation errors, server errors and action
/// confirmations. Auto-dismisses after three seconds; a new message resets
/// the timer.
#[function_component(Toast)]
pub fn toast(props: &ToastProps) -> Html {
    let timeout = {
        let on_close = props.on_close.clone();
        use_timeout(move || on_close.emit(()), 3000)
    };

    {
        let timeout = timeout.clone();
        use_effect_with(props.message.clone(), move |message| {
            if message.trim().is_empty() {
                timeout.cancel();
            } else {
                timeout.reset();
            }
        });
    }

    if props.message.trim().is_empty() {
        return Html::default();
    }

    let dismiss = {
        let on_close = props.on_close.clone();
        Callback::from(move |_| on_close.emit(()))
    };

    html! {
        <div
            class={classes!(
                "fixed",
                "bottom-6",
                "right-6",
                "z-50",
                "rounded-xl",
                "bg-gray-900",
                "text-white",
                "px-4",
                "py-3",
                "text-sm",
                "shadow-xl",
            )}
            role="status"
            aria-live="polite"
            onclick={dismiss}
        >
            { props.message.clone() }
        </div>
    }
}
