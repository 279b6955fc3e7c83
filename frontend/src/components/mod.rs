// Reusable components live here.

pub mod confirm_modal;
pub mod registration_table;
pub mod toast;
