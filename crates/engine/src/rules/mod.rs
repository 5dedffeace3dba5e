//! Pure portal rules: window phases, eligibility alerts and view selection

pub mod eligibility;
pub mod view;
pub mod window;

pub use eligibility::eligibility_alert;
pub use view::{displayed_window_order, select_view, View, ViewInputs};
pub use window::{relevant_deadline, select_active_window, ActiveWindow};
