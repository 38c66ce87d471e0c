//! Leptos コンポーネント

mod loading_overlay;
mod toasts;

pub use loading_overlay::LoadingOverlay;
pub use toasts::{ToastEntry, Toasts};
