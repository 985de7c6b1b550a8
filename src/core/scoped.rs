//! Scoped logging: a logger bound to a parent context

use super::{context::LogContext, error::Result, logger::Logger, tag::Tag};
use std::panic::Location;

/// Decorator over a [`Logger`] holding a parent [`LogContext`].
///
/// Each call starts from a copy of the parent's description, variables and
/// exceptions; the call's own callback then appends to it or overwrites the
/// description.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use taglog::{tags, Logger, MemorySink};
///
/// let sink = Arc::new(MemorySink::new());
/// let logger = Logger::builder("jobs").sink(sink.clone()).build().unwrap();
///
/// let job = logger.with_context(|ctx| {
///     ctx.message("job").data("job_id", 7);
/// });
/// job.log(&[tags::INFO], |ctx| {
///     ctx.data("step", "fetch");
/// })
/// .unwrap();
///
/// assert!(sink.messages()[0].ends_with("(job) job_id=7 step=\"fetch\" "));
/// ```
#[derive(Debug, Clone)]
pub struct ScopedLogger<'a> {
    base: &'a Logger,
    parent: LogContext,
}

impl<'a> ScopedLogger<'a> {
    pub fn new(base: &'a Logger, parent: LogContext) -> Self {
        Self { base, parent }
    }

    pub fn base(&self) -> &'a Logger {
        self.base
    }

    pub fn parent(&self) -> &LogContext {
        &self.parent
    }

    #[track_caller]
    pub fn log<F>(&self, tags: &[Tag], f: F) -> Result<()>
    where
        F: FnOnce(&mut LogContext),
    {
        self.base.emit(None, tags, Location::caller(), |ctx| {
            ctx.inherit(&self.parent);
            f(ctx);
        })
    }

    #[track_caller]
    pub fn log_with_id<F>(&self, id: &str, tags: &[Tag], f: F) -> Result<()>
    where
        F: FnOnce(&mut LogContext),
    {
        self.base.emit(Some(id), tags, Location::caller(), |ctx| {
            ctx.inherit(&self.parent);
            f(ctx);
        })
    }

    /// Nest another scope; its parent context starts from this one's.
    pub fn with_context<F>(&self, f: F) -> ScopedLogger<'a>
    where
        F: FnOnce(&mut LogContext),
    {
        let mut parent = LogContext::new();
        parent.inherit(&self.parent);
        f(&mut parent);
        ScopedLogger::new(self.base, parent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::context::Value;
    use crate::core::enablement::EnablementSet;
    use crate::core::exception::CapturedException;
    use crate::core::tag::tags::{DEBUG, INFO};
    use crate::sinks::MemorySink;
    use std::sync::Arc;

    fn logger() -> (Logger, Arc<MemorySink>) {
        let sink = Arc::new(MemorySink::new());
        let logger = Logger::builder("scoped").sink(sink.clone()).build().unwrap();
        (logger, sink)
    }

    #[test]
    fn test_parent_variables_come_first() {
        let (logger, sink) = logger();
        let scoped = logger.with_context(|ctx| {
            ctx.message("base").data("x", 1);
        });

        scoped
            .log(&[INFO], |ctx| {
                ctx.data("y", 2);
            })
            .unwrap();

        assert!(sink.messages()[0].ends_with("(base) x=1 y=2 "));
    }

    #[test]
    fn test_call_overrides_description() {
        let (logger, sink) = logger();
        let scoped = logger.with_context(|ctx| {
            ctx.message("base");
        });

        scoped
            .log(&[INFO], |ctx| {
                ctx.message("override");
            })
            .unwrap();

        assert!(sink.messages()[0].ends_with("(override) "));
    }

    #[test]
    fn test_parent_unchanged_between_calls() {
        let (logger, sink) = logger();
        let scoped = logger.with_context(|ctx| {
            ctx.data("x", 1);
        });

        scoped.log(&[INFO], |ctx| {
            ctx.data("a", true);
        }).unwrap();
        scoped.log(&[INFO], |_| {}).unwrap();

        assert_eq!(scoped.parent().variables(), &[("x".to_string(), Value::Int(1))]);
        assert!(sink.messages()[1].ends_with(" x=1 "));
    }

    #[test]
    fn test_parent_exceptions_copied() {
        let (logger, sink) = logger();
        let scoped = logger.with_context(|ctx| {
            ctx.exception(CapturedException::new("app::Error", Some("stored".into())));
        });
        scoped.log(&[INFO], |_| {}).unwrap();
        assert!(sink.messages()[0].contains("\napp::Error: stored\n"));
    }

    #[test]
    fn test_nested_scope() {
        let (logger, sink) = logger();
        let outer = logger.with_context(|ctx| {
            ctx.data("a", 1);
        });
        let inner = outer.with_context(|ctx| {
            ctx.data("b", 2);
        });
        inner.log(&[INFO], |ctx| {
            ctx.data("c", 3);
        }).unwrap();
        assert!(sink.messages()[0].ends_with(" a=1 b=2 c=3 "));
    }

    #[test]
    fn test_scoped_call_site_and_filtering() {
        let (logger, sink) = logger();
        logger.set_enabled(EnablementSet::of([INFO]));
        let scoped = logger.with_context(|_| {});

        let mut ran = false;
        scoped.log(&[DEBUG], |_| ran = true).unwrap();
        assert!(!ran);

        let line = line!() + 1;
        scoped.log_with_id("id-1", &[INFO], |_| {}).unwrap();
        assert_eq!(sink.messages()[0], format!("[i] {}:{} id-1 ", file!(), line));
    }
}
