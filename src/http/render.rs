//! Minimal server-side HTML pages.
//!
//! The listing and detail views are rendered generically from the backend's
//! JSON, so a backend may grow fields without gateway changes; the forms are
//! driven by the same field specs the translator uses. Every interpolated
//! value is escaped.

use serde_json::Value;

use crate::registry::ServiceKind;
use crate::translate;

/// Landing page listing the registered services.
pub fn index<'a>(services: impl Iterator<Item = &'a str>) -> String {
    let mut items = String::new();
    for name in services {
        items.push_str(&format!(
            "<li><a href=\"/{name}/\">{name}</a></li>\n"
        ));
    }
    page("Services", &format!("<h1>Services</h1>\n<ul>\n{items}</ul>"))
}

/// Listing view for one service's collection.
pub fn listing(kind: ServiceKind, items: &Value) -> String {
    let specs = translate::fields(kind);

    let mut head = String::from("<tr><th>id</th>");
    for spec in specs {
        head.push_str(&format!("<th>{}</th>", spec.name));
    }
    head.push_str("<th></th></tr>");

    let mut rows = String::new();
    for item in items.as_array().map(Vec::as_slice).unwrap_or_default() {
        let id = cell(item.get("id"));
        let mut row = format!("<tr><td>{id}</td>");
        for spec in specs {
            row.push_str(&format!("<td>{}</td>", cell(item.get(spec.name))));
        }
        row.push_str(&format!(
            "<td><a href=\"/{kind}/{id}\">view</a> \
             <a href=\"/{kind}/edit/{id}\">edit</a> \
             <a href=\"/{kind}/delete/{id}\">delete</a></td></tr>\n"
        ));
        rows.push_str(&row);
    }

    page(
        kind.as_str(),
        &format!(
            "<h1>{kind}</h1>\n<p><a href=\"/{kind}/create\">Create new</a> \
             <a href=\"/\">All services</a></p>\n\
             <table border=\"1\">\n{head}\n{rows}</table>"
        ),
    )
}

/// Creation form for one service.
pub fn create_form(kind: ServiceKind) -> String {
    form_page(kind, &format!("/{kind}/create"), "Create", &Value::Null)
}

/// Edit form for one item, prefilled from the backend's representation.
pub fn edit_form(kind: ServiceKind, id: i64, item: &Value) -> String {
    form_page(kind, &format!("/{kind}/edit/{id}"), "Update", item)
}

/// Detail view for one item.
pub fn detail(kind: ServiceKind, item: &Value) -> String {
    let id = cell(item.get("id"));
    let mut rows = format!("<tr><th>id</th><td>{id}</td></tr>\n");
    for spec in translate::fields(kind) {
        rows.push_str(&format!(
            "<tr><th>{}</th><td>{}</td></tr>\n",
            spec.name,
            cell(item.get(spec.name))
        ));
    }
    page(
        kind.as_str(),
        &format!(
            "<h1>{kind} {id}</h1>\n<table border=\"1\">\n{rows}</table>\n\
             <p><a href=\"/{kind}/\">Back to listing</a></p>"
        ),
    )
}

fn form_page(kind: ServiceKind, action: &str, verb: &str, item: &Value) -> String {
    let mut inputs = String::new();
    for spec in translate::fields(kind) {
        let input_type = if spec.numeric { "number" } else { "text" };
        let required = if spec.required { " required" } else { "" };
        let value = cell(item.get(spec.name));
        inputs.push_str(&format!(
            "<label>{name} <input type=\"{input_type}\" name=\"{name}\" \
             value=\"{value}\"{required}></label><br>\n",
            name = spec.name,
        ));
    }
    page(
        kind.as_str(),
        &format!(
            "<h1>{verb} {kind}</h1>\n\
             <form method=\"post\" action=\"{action}\">\n{inputs}\
             <button type=\"submit\">{verb}</button>\n</form>\n\
             <p><a href=\"/{kind}/\">Back to listing</a></p>"
        ),
    )
}

fn page(title: &str, body: &str) -> String {
    format!(
        "<!doctype html>\n<html>\n<head><title>{}</title></head>\n\
         <body>\n{body}\n</body>\n</html>\n",
        escape(title)
    )
}

/// Render one JSON value as escaped cell text. Null renders empty.
fn cell(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => escape(s),
        Some(other) => escape(&other.to_string()),
    }
}

fn escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_values_are_escaped() {
        let item = json!({"id": 1, "name": "<b>bold</b>", "email": null});
        let html = detail(ServiceKind::Users, &item);
        assert!(html.contains("&lt;b&gt;bold&lt;/b&gt;"));
        assert!(!html.contains("<b>bold</b>"));
    }

    #[test]
    fn test_listing_renders_rows_and_links() {
        let items = json!([{"id": 3, "name": "Villa", "address": "12 Rue"}]);
        let html = listing(ServiceKind::Maisons, &items);
        assert!(html.contains("Villa"));
        assert!(html.contains("/maisons/edit/3"));
        assert!(html.contains("/maisons/delete/3"));
    }

    #[test]
    fn test_forms_carry_the_translated_field_names() {
        let html = create_form(ServiceKind::Locations);
        assert!(html.contains("name=\"maison_id\""));
        assert!(html.contains("name=\"description\""));
        assert!(html.contains("type=\"number\""));
    }

    #[test]
    fn test_edit_form_is_prefilled() {
        let item = json!({"id": 2, "name": "A", "email": "a@x.com"});
        let html = edit_form(ServiceKind::Users, 2, &item);
        assert!(html.contains("value=\"a@x.com\""));
        assert!(html.contains("action=\"/users/edit/2\""));
    }
}
