use crate::config::{Config, DEFAULT_DATE_FORMAT, DEFAULT_ODOO_URL, DEFAULT_RTIME_URL};
use crate::page::{Cell, Input, PageSnapshot, Row, Table};
use std::path::PathBuf;

/// Test helper to create a default `Config` for testing purposes.
///
/// This is the single source of truth for test configuration.
/// If you add a field to `Config`, you only need to update it here.
pub fn mk_config(data_dir: PathBuf) -> Config {
    Config {
        odoo_url: DEFAULT_ODOO_URL.to_string(),
        rtime_url: DEFAULT_RTIME_URL.to_string(),
        browser: None,
        data_dir,
        date_format: DEFAULT_DATE_FORMAT.to_string(),
    }
}

fn input(class: &str, readonly: bool) -> Input {
    Input {
        classes: vec![class.to_string()],
        value: String::new(),
        readonly,
    }
}

/// A workday row labelled `label` with empty hours and text inputs.
pub fn mk_row(label: &str) -> Row {
    Row {
        classes: Vec::new(),
        cells: vec![Cell {
            classes: vec!["datelabel".to_string()],
            text: label.to_string(),
        }],
        inputs: vec![input("hoursinput", false), input("textinput", false)],
        events: Vec::new(),
    }
}

pub fn mk_weekend_row(label: &str, hours_readonly: bool) -> Row {
    let mut row = mk_row(label);
    row.classes.push("weekend".to_string());
    row.inputs[0].readonly = hours_readonly;
    row
}

/// An Odoo page whose timesheet table has one workday row per label.
pub fn mk_page(labels: &[&str]) -> PageSnapshot {
    PageSnapshot {
        url: format!("{DEFAULT_ODOO_URL}42"),
        tables: vec![Table {
            classes: vec![
                "table".to_string(),
                "table-hover".to_string(),
                "table-light".to_string(),
            ],
            rows: labels.iter().map(|l| mk_row(l)).collect(),
        }],
    }
}
