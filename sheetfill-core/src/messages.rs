//! Request/response vocabulary between the UI surface, the background
//! coordinator and the page-embedded core.
//!
//! Wire shape (JSON):
//! - `{"action": "openOdooPage"}` → `{"success": true, "tabId": 4711}`
//! - `{"action": "openRTimePage"}` → `{"success": true}`
//! - `{"action": "fillTimesheet", "data": [...]}` →
//!   `{"success": true, "total": 3, "succeeded": 1, "failed": 0}`

use crate::config::{Config, PageTarget};
use crate::error::ImportError;
use crate::page::PageSnapshot;
use crate::progress::ProgressSink;
use crate::schedule::Clock;
use crate::timesheet::{fill_timesheet, settle};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, warn};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum Request {
    OpenOdooPage,
    OpenRTimePage,
    FillTimesheet {
        #[serde(default)]
        data: Value,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenPageResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tab_id: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FillResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub succeeded: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failed: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl FillResponse {
    fn from_error(err: &ImportError) -> Self {
        Self {
            success: false,
            error: Some(err.to_string()),
            ..Default::default()
        }
    }
}

/// Answer to a request that could not be dispatched at all.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RejectedResponse {
    pub success: bool,
    pub error: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Response {
    OpenPage(OpenPageResponse),
    Fill(FillResponse),
    Rejected(RejectedResponse),
}

impl Response {
    pub fn rejected(error: impl Into<String>) -> Self {
        Response::Rejected(RejectedResponse {
            success: false,
            error: error.into(),
        })
    }
}

/// Opens a URL in a new browsing context and returns its handle, if any.
pub trait Launcher {
    fn open(&self, url: &str) -> Result<Option<u32>>;
}

/// Answers requests synchronously. Settings are injected once; no URL is
/// read from ambient state.
pub struct Coordinator<L: Launcher> {
    pub config: Config,
    launcher: L,
}

impl<L: Launcher> Coordinator<L> {
    pub fn new(config: Config, launcher: L) -> Self {
        Self { config, launcher }
    }

    /// Dispatches one request. `page` is the page the core is embedded in;
    /// without one, a fill request reports a missing table.
    pub fn handle(
        &self,
        request: Request,
        page: Option<&mut PageSnapshot>,
        clock: &dyn Clock,
        sink: &mut dyn ProgressSink,
    ) -> Response {
        match request {
            Request::OpenOdooPage => Response::OpenPage(self.open_page(PageTarget::Odoo)),
            Request::OpenRTimePage => Response::OpenPage(self.open_page(PageTarget::RTime)),
            Request::FillTimesheet { data } => match page {
                Some(page) => Response::Fill(fill(&data, page, clock, sink)),
                None => Response::Fill(FillResponse::from_error(&ImportError::TableNotFound)),
            },
        }
    }

    pub fn open_page(&self, target: PageTarget) -> OpenPageResponse {
        let url = self.config.url(target);
        match self.launcher.open(url) {
            Ok(tab_id) => {
                info!(page = %target, url, "opened page");
                OpenPageResponse {
                    success: true,
                    tab_id,
                    error: None,
                }
            }
            Err(err) => {
                warn!(page = %target, url, error = %err, "could not open page");
                OpenPageResponse {
                    success: false,
                    tab_id: None,
                    error: Some(format!("Could not open the {} page: {err}", target.label())),
                }
            }
        }
    }
}

/// Page-side handler for `fillTimesheet`. Errors become `success: false`.
pub fn fill(
    data: &Value,
    page: &mut PageSnapshot,
    clock: &dyn Clock,
    sink: &mut dyn ProgressSink,
) -> FillResponse {
    match fill_timesheet(data, page, clock, sink) {
        Ok(mut report) => {
            settle(page, &mut report.deferred);
            FillResponse {
                success: true,
                total: Some(report.outcome.total),
                succeeded: Some(report.outcome.succeeded),
                failed: Some(report.outcome.failed),
                error: None,
            }
        }
        Err(err) => FillResponse::from_error(&err),
    }
}
