//! Logging macros for ergonomic log calls.
//!
//! `taglog!` builds the population callback from a format string (the
//! description) and optional `key = value` variables.
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//! use taglog::{taglog, tags, Logger, MemorySink};
//!
//! let sink = Arc::new(MemorySink::new());
//! let logger = Logger::builder("app").sink(sink.clone()).build().unwrap();
//!
//! let port = 8080;
//! taglog!(logger, [tags::INFO], "listening on {}", port).unwrap();
//! taglog!(logger, [tags::WARN, tags::INFO], "slow request"; path = "/users", millis = 812).unwrap();
//!
//! assert!(sink.messages()[0].ends_with("(listening on 8080) "));
//! assert!(sink.messages()[1].ends_with("(slow request) path=\"/users\" millis=812 "));
//! ```

/// Log with a formatted description and optional variables.
///
/// ```
/// # use taglog::{taglog, tags, Logger};
/// # let logger = Logger::noop();
/// taglog!(logger, [tags::ERROR], "upstream failed"; status = 502).unwrap();
/// taglog!(logger, id = "req-1", [tags::INFO], "done").unwrap();
/// ```
#[macro_export]
macro_rules! taglog {
    ($logger:expr, id = $id:expr, [$($tag:expr),+ $(,)?], $fmt:literal $(, $arg:expr)* ; $($key:ident = $value:expr),+ $(,)?) => {
        $logger.log_with_id($id, &[$($tag),+], |__ctx: &mut $crate::LogContext| {
            __ctx.message(format!($fmt $(, $arg)*));
            $( __ctx.data(stringify!($key), $value); )+
        })
    };
    ($logger:expr, id = $id:expr, [$($tag:expr),+ $(,)?], $fmt:literal $(, $arg:expr)*) => {
        $logger.log_with_id($id, &[$($tag),+], |__ctx: &mut $crate::LogContext| {
            __ctx.message(format!($fmt $(, $arg)*));
        })
    };
    ($logger:expr, [$($tag:expr),+ $(,)?], $fmt:literal $(, $arg:expr)* ; $($key:ident = $value:expr),+ $(,)?) => {
        $logger.log(&[$($tag),+], |__ctx: &mut $crate::LogContext| {
            __ctx.message(format!($fmt $(, $arg)*));
            $( __ctx.data(stringify!($key), $value); )+
        })
    };
    ($logger:expr, [$($tag:expr),+ $(,)?], $fmt:literal $(, $arg:expr)*) => {
        $logger.log(&[$($tag),+], |__ctx: &mut $crate::LogContext| {
            __ctx.message(format!($fmt $(, $arg)*));
        })
    };
}

#[cfg(test)]
mod tests {
    use crate::core::tag::tags;
    use crate::core::Logger;
    use crate::sinks::MemorySink;
    use std::sync::Arc;

    #[test]
    fn test_macro_forms() {
        let sink = Arc::new(MemorySink::new());
        let logger = Logger::builder("m").sink(sink.clone()).build().unwrap();

        taglog!(logger, [tags::INFO], "plain").unwrap();
        taglog!(logger, [tags::INFO], "n={}", 3; ok = true).unwrap();
        taglog!(logger, id = "abc", [tags::DEBUG], "with id").unwrap();
        taglog!(logger, id = "xyz", [tags::DEBUG, tags::ERROR], "both"; k = 1.5).unwrap();

        let messages = sink.messages();
        assert!(messages[0].ends_with("(plain) "));
        assert!(messages[1].ends_with("(n=3) ok=true "));
        assert!(messages[2].ends_with(" abc (with id) "));
        assert!(messages[3].starts_with("[de] "));
        assert!(messages[3].ends_with(" xyz (both) k=1.5 "));
        assert_eq!(sink.entries()[3].0, crate::core::LogLevel::Error);
    }

    #[test]
    fn test_macro_call_site() {
        let sink = Arc::new(MemorySink::new());
        let logger = Logger::builder("m").sink(sink.clone()).build().unwrap();

        let line = line!() + 1;
        taglog!(logger, [tags::INFO], "here").unwrap();
        assert!(sink.messages()[0].starts_with(&format!("[i] {}:{} ", file!(), line)));
    }
}
