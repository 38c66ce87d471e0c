use super::escape_html;
use crate::form::{Control, FieldSpec, FormTemplate};

fn field_markup(field: &FieldSpec, value: &str) -> String {
    let label = if field.required {
        format!("{} *", field.label)
    } else {
        field.label.to_string()
    };
    let required = if field.required { " required" } else { "" };
    let input = match field.control {
        Control::Text { placeholder } => {
            let placeholder = if placeholder.is_empty() {
                String::new()
            } else {
                format!(r#" placeholder="{}""#, escape_html(placeholder))
            };
            format!(
                r#"<input type="text" name="{}" value="{}"{}{}>"#,
                field.name,
                escape_html(value),
                placeholder,
                required
            )
        }
        Control::TextArea { rows } => format!(
            r#"<textarea name="{}" rows="{}"{}>{}</textarea>"#,
            field.name,
            rows,
            required,
            escape_html(value)
        ),
        Control::Select { options } => {
            let options: String = options
                .iter()
                .map(|(option, text)| {
                    format!(
                        r#"<option value="{}"{}>{}</option>"#,
                        option,
                        if *option == value { " selected" } else { "" },
                        text
                    )
                })
                .collect();
            format!(r#"<select name="{}">{}</select>"#, field.name, options)
        }
    };
    format!(
        r#"<div class="form-group"><label>{}</label>{}</div>"#,
        label, input
    )
}

/// モーダルフォームの中身（`#modalForm` に流し込む）
pub fn form_fields(template: &FormTemplate) -> String {
    template
        .values
        .iter()
        .map(|(field, value)| field_markup(field, value))
        .collect()
}
