pub(crate) mod sliding_time_frame;
pub(crate) mod throttled_logger;
pub(crate) mod time_throttled_logger;
