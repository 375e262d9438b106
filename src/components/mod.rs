//! UI Components
//!
//! Reusable Leptos components.

mod child_card;
mod confirm_button;
pub mod map_view;
mod nav;
mod toast;
mod visit_dialog;

pub use child_card::ChildCard;
pub use confirm_button::ConfirmButton;
pub use map_view::{MapMarker, MapView, DEFAULT_ZOOM};
pub use nav::NavBar;
pub use toast::Toast;
pub use visit_dialog::VisitDialog;
