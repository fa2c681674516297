//! Page, section, row and notice markup
//!
//! All text arguments are expected translated but not escaped.

use crate::host::Escaper;
use std::fmt::Write;

/// Kind of an admin notice, mapped to its CSS class
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    /// Success acknowledgment
    Updated,
    /// Failure report
    Error,
}

impl NoticeKind {
    fn class(self) -> &'static str {
        match self {
            NoticeKind::Updated => "notice-success",
            NoticeKind::Error => "notice-error",
        }
    }
}

/// One admin notice shown above the settings form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    /// Identifier; a domain holds at most one notice per code
    pub code: String,
    /// Translated message
    pub message: String,
    /// Notice kind
    pub kind: NoticeKind,
}

/// Markup for a list of notices
pub fn notices(esc: &dyn Escaper, notices: &[Notice]) -> String {
    let mut html = String::new();
    for notice in notices {
        let _ = writeln!(
            html,
            "<div id=\"setting-error-{}\" class=\"notice {} settings-error is-dismissible\"><p><strong>{}</strong></p></div>",
            esc.attr(&notice.code),
            notice.kind.class(),
            esc.html(&notice.message)
        );
    }
    html
}

/// One table row: label cell and widget cell
///
/// `name` is the widget's id, used for the label's `for` attribute and the row class.
pub fn field_row(esc: &dyn Escaper, name: &str, label: &str, widget: &str) -> String {
    let name = esc.attr(name);
    format!(
        "<tr class=\"{name}_row\"><th scope=\"row\"><label for=\"{name}\">{}</label></th><td>\n{widget}\n</td></tr>\n",
        esc.html(label)
    )
}

/// A section heading, its optional description and a table of rows
pub fn section(
    esc: &dyn Escaper,
    id: &str,
    label: &str,
    description: Option<&str>,
    rows: &str,
) -> String {
    let mut html = format!("<h2>{}</h2>\n", esc.html(label));
    if let Some(description) = description {
        let _ = writeln!(
            html,
            "<p id=\"{}\">{}</p>",
            esc.attr(id),
            esc.html(description)
        );
    }
    let _ = write!(
        html,
        "<table class=\"form-table\" role=\"presentation\">\n{rows}</table>\n"
    );
    html
}

/// The surrounding page: title, form posting to `action`, hidden group fields, body, submit
pub fn page(
    esc: &dyn Escaper,
    title: &str,
    action: &str,
    option_page: &str,
    body: &str,
    submit_label: &str,
) -> String {
    format!(
        "<div class=\"wrap\">\n<h1>{}</h1>\n<form action=\"{}\" method=\"post\">\n\
         <input type=\"hidden\" name=\"option_page\" value=\"{}\" />\n\
         <input type=\"hidden\" name=\"action\" value=\"update\" />\n\
         {body}\
         <p class=\"submit\"><input type=\"submit\" name=\"submit\" id=\"submit\" class=\"button button-primary\" value=\"{}\" /></p>\n\
         </form>\n</div>\n",
        esc.html(title),
        esc.attr(action),
        esc.attr(option_page),
        esc.attr(submit_label)
    )
}
