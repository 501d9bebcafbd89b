mod events;
mod reconcile;
mod view;

pub use events::{Key, Subscriptions, UiEvent};
pub use view::Dashboard;
