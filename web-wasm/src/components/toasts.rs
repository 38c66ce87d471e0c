//! トースト通知

use leptos::prelude::*;
use lingo_common::ToastKind;

#[derive(Debug, Clone, PartialEq)]
pub struct ToastEntry {
    pub id: u64,
    pub kind: ToastKind,
    pub title: String,
    pub message: String,
}

impl ToastEntry {
    pub fn class(&self) -> String {
        format!("toast {}", self.kind.as_str())
    }

    pub fn icon_class(&self) -> String {
        format!("fas {} toast-icon", self.kind.icon())
    }
}

/// 表示中のトースト一覧。追加と削除は `DomView` が行う。
#[component]
pub fn Toasts(toasts: RwSignal<Vec<ToastEntry>>) -> impl IntoView {
    view! {
        <For
            each=move || toasts.get()
            key=|toast| toast.id
            children=move |toast| {
                view! {
                    <div class=toast.class()>
                        <i class=toast.icon_class()></i>
                        <div class="toast-content">
                            <div class="toast-title">{toast.title.clone()}</div>
                            <div class="toast-message">{toast.message.clone()}</div>
                        </div>
                    </div>
                }
            }
        />
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classes_follow_kind() {
        let toast = ToastEntry {
            id: 1,
            kind: ToastKind::Warning,
            title: "请填写必填项".into(),
            message: "单词不能为空".into(),
        };
        assert_eq!(toast.class(), "toast warning");
        assert_eq!(toast.icon_class(), "fas fa-exclamation-triangle toast-icon");
    }
}
