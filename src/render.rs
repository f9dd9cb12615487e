use std::fmt::Write;

use crate::blockchain::record::{AcademicRecord, RecordForm};
use crate::viewer::{Phase, ResultsView};

pub const EMPTY_STATE: &str = r#"<p class="no-blocks">Department not found.</p>"#;

const STYLE: &str = r#"
body { font-family: sans-serif; margin: 2rem; }
.container { max-width: 960px; margin: 0 auto; }
.input-container input { display: block; width: 100%; margin-bottom: .5rem; padding: .4rem; }
.button-container button { margin-right: .5rem; padding: .5rem 1rem; }
.banner { padding: .5rem; margin: 1rem 0; }
.banner.error { background: #fde2e2; }
.banner.success { background: #e2f5e2; }
table { border-collapse: collapse; width: 100%; margin-top: 1rem; }
th, td { border: 1px solid #ccc; padding: .3rem .5rem; text-align: left; }
.no-blocks { color: #888; }
"#;

/// (name, placeholder) for each input, in form order.
const INPUTS: [(&str, &str); 7] = [
    ("department", "Department Name"),
    ("student_name", "Student Name"),
    ("usn", "USN"),
    ("dob", "Date of Birth"),
    ("semester", "Semester"),
    ("cgpa", "CGPA"),
    ("student_address", "Student Address"),
];

const COLUMNS: [&str; 7] = [
    "Department",
    "Student Name",
    "USN",
    "Date of Birth",
    "Semester",
    "CGPA",
    "Student Address",
];

/// Buttons as (label, form action).
pub const ACTIONS: [(&str, &str); 3] = [
    ("Create Genesis Block", "/actions/create-genesis-block"),
    ("Add Block", "/actions/add-block"),
    ("Get Department Blocks", "/actions/get-department-blocks"),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Banner {
    Success(String),
    Error(String),
}

#[derive(Debug, Clone)]
pub struct PageView {
    pub form: RecordForm,
    pub phase: Phase,
    pub banner: Option<Banner>,
    pub results: ResultsView,
}

pub fn escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

/// The table when there are rows, otherwise the empty-state message.
/// Empty, failed and unqueried results render the same.
pub fn render_results(results: &ResultsView) -> String {
    let records = results.records();
    if records.is_empty() {
        return EMPTY_STATE.to_string();
    }
    render_table(records)
}

fn render_table(records: &[AcademicRecord]) -> String {
    let mut html = String::from("<table class=\"blocks-table\">\n<thead><tr>");
    for column in COLUMNS {
        let _ = write!(html, "<th>{}</th>", column);
    }
    html.push_str("</tr></thead>\n<tbody>\n");
    for record in records {
        html.push_str("<tr>");
        for value in record.contract_args() {
            let _ = write!(html, "<td>{}</td>", escape(value));
        }
        html.push_str("</tr>\n");
    }
    html.push_str("</tbody>\n</table>");
    html
}

fn form_values(form: &RecordForm) -> [&str; 7] {
    [
        &form.department,
        &form.student_name,
        &form.usn,
        &form.dob,
        &form.semester,
        &form.cgpa,
        &form.student_address,
    ]
}

pub fn render_page(view: &PageView) -> String {
    let mut html = String::new();
    let _ = write!(
        html,
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n\
         <title>College Blockchain Viewer</title>\n<style>{}</style>\n</head>\n<body>\n\
         <div class=\"container\">\n<h1>College Blockchain Viewer</h1>\n",
        STYLE
    );

    if view.phase == Phase::Disconnected {
        html.push_str(
            "<p class=\"banner error\">Ethereum provider not found. \
             Contract actions are disabled.</p>\n",
        );
    }

    html.push_str("<form method=\"post\" action=\"/actions/get-department-blocks\">\n");
    html.push_str("<div class=\"input-container\">\n");
    for ((name, placeholder), value) in INPUTS.iter().zip(form_values(&view.form)) {
        let _ = writeln!(
            html,
            "<input type=\"text\" name=\"{}\" placeholder=\"{}\" value=\"{}\">",
            name,
            placeholder,
            escape(value)
        );
    }
    html.push_str("</div>\n<div class=\"button-container\">\n");
    for (label, action) in ACTIONS {
        let _ = writeln!(
            html,
            "<button type=\"submit\" formaction=\"{}\">{}</button>",
            action, label
        );
    }
    html.push_str("</div>\n</form>\n");

    match &view.banner {
        Some(Banner::Success(message)) => {
            let _ = writeln!(html, "<p class=\"banner success\">{}</p>", escape(message));
        }
        Some(Banner::Error(message)) => {
            let _ = writeln!(html, "<p class=\"banner error\">{}</p>", escape(message));
        }
        None => {}
    }

    html.push_str("<div class=\"results\">\n");
    html.push_str(&render_results(&view.results));
    html.push_str("\n</div>\n</div>\n</body>\n</html>\n");
    html
}
