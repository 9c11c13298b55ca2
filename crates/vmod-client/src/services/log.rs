//! Audit log service

use tracing::{debug, instrument};
use vmod_common::ConsoleResult;
use vmod_core::{LogFilter, LogPage, LogRecord};

use super::context::ServiceContext;

const LOGS_PATH: &str = "/api/logs";

/// One fetched page of audit records
#[derive(Debug, Clone, PartialEq)]
pub struct LogPageResult {
    pub records: Vec<LogRecord>,
    /// Window the records were fetched with
    pub page: LogPage,
}

impl LogPageResult {
    /// "Next" is offered only after a full page
    pub fn has_next(&self) -> bool {
        self.page.has_next(self.records.len())
    }

    pub fn has_prev(&self) -> bool {
        self.page.has_prev()
    }

    pub fn next_page(&self) -> Option<LogPage> {
        self.has_next().then(|| self.page.next())
    }

    pub fn prev_page(&self) -> Option<LogPage> {
        self.has_prev().then(|| self.page.prev())
    }
}

/// Log service
pub struct LogService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> LogService<'a> {
    /// Create a new LogService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    #[instrument(skip(self))]
    pub async fn query_logs(&self, filter: &LogFilter) -> ConsoleResult<LogPageResult> {
        let records: Vec<LogRecord> = self
            .ctx
            .api()
            .get_with_query(LOGS_PATH, &filter.to_query())
            .await?;
        debug!(count = records.len(), offset = filter.page.offset, "Log page fetched");

        Ok(LogPageResult {
            records,
            page: filter.page,
        })
    }
}
