//! Snapshot of the host page: the parts of the DOM a fill pass reads and
//! writes, exchanged as JSON with the page adapter.
//!
//! Selectors mirror the host page:
//! - timesheet table: `table.table-hover.table-light`
//! - day label: `td.datelabel`, text like `"01 Do - Tag"`
//! - inputs: `input.hoursinput`, `input.textinput`
//! - non-editable day: `tr.weekend`

use crate::error::ImportError;
use crate::row::{FieldKind, InputField, RowFields, TimesheetRow};
use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const TABLE_CLASSES: [&str; 2] = ["table-hover", "table-light"];
pub const DATE_LABEL_CLASS: &str = "datelabel";
pub const HOURS_INPUT_CLASS: &str = "hoursinput";
pub const TEXT_INPUT_CLASS: &str = "textinput";
pub const WEEKEND_CLASS: &str = "weekend";
pub const HIGHLIGHT_CLASS: &str = "sheetfill-highlight";

static DAY_LABEL: Lazy<Regex> = Lazy::new(|| Regex::new(r"^([0-9]{2})").expect("valid label regex"));

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageSnapshot {
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub tables: Vec<Table>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    #[serde(default)]
    pub classes: Vec<String>,
    #[serde(default)]
    pub rows: Vec<Row>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Row {
    #[serde(default)]
    pub classes: Vec<String>,
    #[serde(default)]
    pub cells: Vec<Cell>,
    #[serde(default)]
    pub inputs: Vec<Input>,
    /// Change notifications raised since the snapshot was taken, in order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub events: Vec<ChangeEvent>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    #[serde(default)]
    pub classes: Vec<String>,
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Input {
    #[serde(default)]
    pub classes: Vec<String>,
    #[serde(default)]
    pub value: String,
    #[serde(default)]
    pub readonly: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeEvent {
    pub field: FieldKind,
    pub value: String,
}

fn has_class(classes: &[String], class: &str) -> bool {
    classes.iter().any(|c| c == class)
}

impl PageSnapshot {
    pub fn load(path: &Path) -> Result<Self> {
        let s = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
        serde_json::from_str(&s).with_context(|| format!("parsing page {}", path.display()))
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let s = serde_json::to_string_pretty(self)?;
        fs::write(path, s).with_context(|| format!("writing {}", path.display()))
    }

    /// The first table carrying every timesheet table class.
    pub fn timesheet_table(&self) -> Result<&Table, ImportError> {
        self.tables
            .iter()
            .find(|t| t.is_timesheet())
            .ok_or(ImportError::TableNotFound)
    }

    pub fn timesheet_table_mut(&mut self) -> Result<&mut Table, ImportError> {
        self.tables
            .iter_mut()
            .find(|t| t.is_timesheet())
            .ok_or(ImportError::TableNotFound)
    }
}

impl Table {
    pub fn is_timesheet(&self) -> bool {
        TABLE_CLASSES.iter().all(|c| has_class(&self.classes, c))
    }
}

impl Row {
    pub fn has_class(&self, class: &str) -> bool {
        has_class(&self.classes, class)
    }

    pub fn date_cell(&self) -> Option<&Cell> {
        self.cells.iter().find(|c| has_class(&c.classes, DATE_LABEL_CLASS))
    }

    pub fn hours_input(&self) -> Option<&Input> {
        self.input_index(HOURS_INPUT_CLASS).map(|i| &self.inputs[i])
    }

    pub fn text_input(&self) -> Option<&Input> {
        self.input_index(TEXT_INPUT_CLASS).map(|i| &self.inputs[i])
    }

    fn input_index(&self, class: &str) -> Option<usize> {
        self.inputs.iter().position(|i| i.has_class(class))
    }
}

impl Input {
    pub fn has_class(&self, class: &str) -> bool {
        has_class(&self.classes, class)
    }
}

impl InputField for Input {
    fn value(&self) -> &str {
        &self.value
    }

    fn set_value(&mut self, value: &str) {
        self.value = value.to_string();
    }

    fn is_readonly(&self) -> bool {
        self.readonly
    }

    fn set_highlight(&mut self, on: bool) {
        let present = self.has_class(HIGHLIGHT_CLASS);
        if on && !present {
            self.classes.push(HIGHLIGHT_CLASS.to_string());
        } else if !on && present {
            self.classes.retain(|c| c != HIGHLIGHT_CLASS);
        }
    }

    fn is_highlighted(&self) -> bool {
        self.has_class(HIGHLIGHT_CLASS)
    }
}

impl TimesheetRow for Row {
    type Field = Input;

    fn day_label(&self) -> Option<String> {
        let cell = self.date_cell()?;
        DAY_LABEL
            .captures(cell.text.trim())
            .map(|caps| caps[1].to_string())
    }

    fn is_locked(&self) -> bool {
        self.has_class(WEEKEND_CLASS) && self.hours_input().is_some_and(|i| i.readonly)
    }

    fn has_editable_fields(&self) -> bool {
        self.hours_input().is_some() && self.text_input().is_some()
    }

    fn fields_mut(&mut self) -> Option<RowFields<'_, Input>> {
        let h = self.input_index(HOURS_INPUT_CLASS)?;
        let t = self.input_index(TEXT_INPUT_CLASS)?;
        if h == t {
            return None;
        }
        let (hours, text) = if h < t {
            let (left, right) = self.inputs.split_at_mut(t);
            (&mut left[h], &mut right[0])
        } else {
            let (left, right) = self.inputs.split_at_mut(h);
            (&mut right[0], &mut left[t])
        };
        Some(RowFields { hours, text })
    }

    fn notify_change(&mut self, field: FieldKind, value: &str) {
        self.events.push(ChangeEvent {
            field,
            value: value.to_string(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::{mk_page, mk_row, mk_weekend_row};

    #[test]
    fn finds_table_by_both_classes() {
        let mut page = mk_page(&["01", "02"]);
        assert_eq!(page.timesheet_table().unwrap().rows.len(), 2);

        page.tables[0].classes.retain(|c| c != "table-light");
        assert_eq!(page.timesheet_table(), Err(ImportError::TableNotFound));
    }

    #[test]
    fn day_label_takes_leading_two_digits() {
        assert_eq!(mk_row("  07 Mi - Tag 7 ").day_label().as_deref(), Some("07"));
        assert_eq!(mk_row("7 Mi").day_label(), None);
        assert_eq!(mk_row("Summe").day_label(), None);

        assert_eq!(mk_row("٠٢ So").day_label(), None);
        assert_eq!(mk_row("０２ So").day_label(), None);

        let mut row = mk_row("07");
        row.cells.clear();
        assert_eq!(row.day_label(), None);
    }

    #[test]
    fn lock_needs_weekend_and_readonly_hours() {
        assert!(mk_weekend_row("06", true).is_locked());
        assert!(!mk_weekend_row("06", false).is_locked());

        let mut row = mk_row("06");
        row.inputs[0].readonly = true;
        assert!(!row.is_locked());
    }

    #[test]
    fn fields_mut_handles_any_input_order() {
        let mut row = mk_row("03");
        row.inputs.reverse();
        let fields = row.fields_mut().unwrap();
        fields.hours.set_value("8");
        fields.text.set_value("Docs");
        assert_eq!(row.hours_input().unwrap().value, "8");
        assert_eq!(row.text_input().unwrap().value, "Docs");
    }

    #[test]
    fn highlight_is_a_class_toggle() {
        let mut input = Input::default();
        input.set_highlight(true);
        input.set_highlight(true);
        assert_eq!(input.classes, vec![HIGHLIGHT_CLASS.to_string()]);
        input.set_highlight(false);
        assert!(input.classes.is_empty());
    }

    #[test]
    fn snapshot_round_trips_through_disk() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("page.json");
        let page = mk_page(&["01"]);
        page.save(&path).unwrap();
        assert_eq!(PageSnapshot::load(&path).unwrap(), page);
    }

    #[test]
    fn snapshot_json_uses_minimal_shape() {
        let json = r#"{
            "url": "https://odoo.innoq.io/innoq/users/42",
            "tables": [{
                "classes": ["table", "table-hover", "table-light"],
                "rows": [{
                    "cells": [{"classes": ["datelabel"], "text": "01 Mo - Tag"}],
                    "inputs": [
                        {"classes": ["hoursinput"]},
                        {"classes": ["textinput"], "value": "old"}
                    ]
                }]
            }]
        }"#;
        let page: PageSnapshot = serde_json::from_str(json).unwrap();
        let row = &page.timesheet_table().unwrap().rows[0];
        assert_eq!(row.day_label().as_deref(), Some("01"));
        assert_eq!(row.text_input().unwrap().value, "old");
        assert!(row.has_editable_fields());
    }
}
