//! Rendering of CDP console and exception payloads into diagnostic text.

use chromiumoxide::cdp::js_protocol::runtime::{
    ConsoleApiCalledType, ExceptionDetails, RemoteObject,
};

/// True for console calls the checker counts as errors.
pub(crate) fn is_error_level(kind: &ConsoleApiCalledType) -> bool {
    matches!(kind, ConsoleApiCalledType::Error)
}

/// Formats the arguments of a console call the way DevTools prints them:
/// one rendered value per argument, joined with spaces.
pub(crate) fn format_console_args(args: &[RemoteObject]) -> String {
    args.iter()
        .map(render_remote_object)
        .collect::<Vec<_>>()
        .join(" ")
}

fn render_remote_object(obj: &RemoteObject) -> String {
    render_value(obj.value.as_ref(), obj.description.as_deref())
}

/// Renders a CDP value: strings verbatim, other primitives and structured
/// values through their JSON form, otherwise the remote object's
/// description (Error objects, DOM nodes, functions).
fn render_value(value: Option<&serde_json::Value>, description: Option<&str>) -> String {
    if let Some(value) = value {
        if let Some(s) = value.as_str() {
            return s.to_owned();
        }
        if value.is_null() {
            return "null".to_owned();
        }
        if let Ok(rendered) = serde_json::to_string(value) {
            return rendered;
        }
    }
    description.unwrap_or("<object>").to_owned()
}

/// Renders exception details the way the page reported them: the thrown
/// object's description (message plus stack) when present, otherwise the
/// detail text with the source position.
pub(crate) fn format_exception(details: &ExceptionDetails) -> String {
    if let Some(exception) = &details.exception {
        if let Some(description) = &exception.description {
            if !description.is_empty() {
                return description.clone();
            }
        }
        if let Some(value) = &exception.value {
            return render_value(Some(value), None);
        }
    }

    let mut text = details.text.clone();
    if let Some(url) = &details.url {
        text.push_str(&format!(
            " ({url}:{}:{})",
            details.line_number, details.column_number
        ));
    }
    text
}
