mod log_filter;

pub use log_filter::{
    parse_timestamp_in, LogFilter, LogFilterDraft, LogPage, DEFAULT_LOG_LIMIT, MAX_LOG_LIMIT,
};
