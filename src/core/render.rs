//! Exception-chain rendering with common-frame elision
//!
//! Each node prints a header line and its cleaned frames. A cause or
//! suppressed node prints only the frames it does not share with the tail of
//! its enclosing node, followed by `... N common frames omitted ...`.
//!
//! ```text
//! app::Error: request failed
//!   app::handler::serve(handler.rs:10)
//!   app::main(main.rs:3)
//!   Caused by std::io::Error: timed out
//!     app::net::read(net.rs:77)
//!     ... 2 common frames omitted ...
//! ```

use super::exception::CapturedException;
use super::stack::{StackFrame, StackResolver};
use std::fmt::Write;

pub const LINE_SEPARATOR: &str = "\n";

/// Deepest nesting rendered before the chain is cut off
pub const DEFAULT_MAX_DEPTH: usize = 32;

const INDENT: &str = "  ";

#[derive(Debug, Clone)]
pub struct ExceptionRenderer {
    resolver: StackResolver,
    max_depth: usize,
}

impl Default for ExceptionRenderer {
    fn default() -> Self {
        Self::new(StackResolver::default(), DEFAULT_MAX_DEPTH)
    }
}

impl ExceptionRenderer {
    pub fn new(resolver: StackResolver, max_depth: usize) -> Self {
        Self {
            resolver,
            max_depth,
        }
    }

    /// Append the rendering of `exception` (a root, depth 0) to `out`.
    pub fn render(&self, out: &mut String, exception: &CapturedException) {
        self.render_node(out, "", 0, exception, None);
    }

    pub fn render_to_string(&self, exception: &CapturedException) -> String {
        let mut out = String::new();
        self.render(&mut out, exception);
        out
    }

    fn render_node(
        &self,
        out: &mut String,
        prefix: &str,
        depth: usize,
        node: &CapturedException,
        parent_frames: Option<&[StackFrame]>,
    ) {
        if depth > self.max_depth {
            let _ = write!(
                out,
                "{}... exception chain truncated at depth {} ...{}",
                INDENT.repeat(depth),
                depth,
                LINE_SEPARATOR
            );
            return;
        }

        let _ = write!(
            out,
            "{}{}{}: {}{}",
            INDENT.repeat(depth),
            prefix,
            node.type_name,
            node.message.as_deref().unwrap_or("null"),
            LINE_SEPARATOR
        );

        let frames = self.resolver.trim_noise(&node.frames);
        let frame_indent = INDENT.repeat(depth + 1);

        match parent_frames {
            None => write_frames(out, &frame_indent, frames),
            Some(parent_frames) => {
                let common = common_tail(parent_frames, frames);
                write_frames(out, &frame_indent, &frames[..frames.len() - common]);
                let _ = write!(
                    out,
                    "{}... {} common frames omitted ...{}",
                    frame_indent, common, LINE_SEPARATOR
                );
            }
        }

        if let Some(cause) = node.cause.as_deref() {
            self.render_node(out, "Caused by ", depth + 1, cause, Some(frames));
        }

        if !node.suppressed.is_empty() {
            out.push_str("Suppressed: ");
            for suppressed in &node.suppressed {
                self.render_node(out, "With suppressed ", depth + 1, suppressed, Some(frames));
            }
        }
    }
}

/// Length of the run of equal frames counted from the end of both lists.
pub fn common_tail(parent: &[StackFrame], child: &[StackFrame]) -> usize {
    parent
        .iter()
        .rev()
        .zip(child.iter().rev())
        .take_while(|(a, b)| a == b)
        .count()
}

fn write_frames(out: &mut String, indent: &str, frames: &[StackFrame]) {
    for frame in frames {
        let _ = write!(out, "{}{}{}", indent, frame, LINE_SEPARATOR);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn f(name: &str) -> StackFrame {
        StackFrame::new("app", name).at("app.rs", 1)
    }

    fn frames(names: &[&str]) -> Vec<StackFrame> {
        names.iter().map(|n| f(n)).collect()
    }

    #[test]
    fn test_root_prints_all_frames_without_marker() {
        let root = CapturedException::new("app::Error", Some("boom".into()))
            .with_frames(frames(&["f1", "f2"]));

        let out = ExceptionRenderer::default().render_to_string(&root);
        assert_eq!(
            out,
            "app::Error: boom\n  app::f1(app.rs:1)\n  app::f2(app.rs:1)\n"
        );
        assert!(!out.contains("common frames omitted"));
    }

    #[test]
    fn test_cause_elides_common_frames() {
        let root = CapturedException::new("app::Outer", Some("outer".into()))
            .with_frames(frames(&["f1", "f2", "f3", "f4", "f5"]))
            .with_cause(
                CapturedException::new("app::Inner", Some("inner".into()))
                    .with_frames(frames(&["g1", "g2", "f3", "f4", "f5"])),
            );

        let out = ExceptionRenderer::default().render_to_string(&root);
        let expected = "app::Outer: outer\n\
                        \x20 app::f1(app.rs:1)\n\
                        \x20 app::f2(app.rs:1)\n\
                        \x20 app::f3(app.rs:1)\n\
                        \x20 app::f4(app.rs:1)\n\
                        \x20 app::f5(app.rs:1)\n\
                        \x20 Caused by app::Inner: inner\n\
                        \x20   app::g1(app.rs:1)\n\
                        \x20   app::g2(app.rs:1)\n\
                        \x20   ... 3 common frames omitted ...\n";
        assert_eq!(out, expected);
    }

    #[test]
    fn test_missing_message_renders_null() {
        let root = CapturedException::new("app::Error", None);
        assert_eq!(
            ExceptionRenderer::default().render_to_string(&root),
            "app::Error: null\n"
        );
    }

    #[test]
    fn test_suppressed_marker_written_once() {
        let root = CapturedException::new("app::Error", Some("main".into()))
            .with_frames(frames(&["a", "b"]))
            .with_suppressed(
                CapturedException::new("app::Close", Some("c1".into()))
                    .with_frames(frames(&["close", "b"])),
            )
            .with_suppressed(CapturedException::new("app::Close", Some("c2".into())));

        let out = ExceptionRenderer::default().render_to_string(&root);
        assert_eq!(out.matches("Suppressed: ").count(), 1);
        assert!(out.contains("Suppressed:   With suppressed app::Close: c1\n"));
        assert!(out.contains("    app::close(app.rs:1)\n    ... 1 common frames omitted ...\n"));
        assert!(out.contains("  With suppressed app::Close: c2\n    ... 0 common frames omitted ...\n"));
    }

    #[test]
    fn test_noise_trimmed_before_comparison() {
        let mut outer = frames(&["x", "shared"]);
        outer.push(StackFrame::new("std::rt", "lang_start"));
        let inner = frames(&["y", "shared"]);

        let root = CapturedException::new("app::A", None)
            .with_frames(outer)
            .with_cause(CapturedException::new("app::B", None).with_frames(inner));

        let out = ExceptionRenderer::default().render_to_string(&root);
        assert!(!out.contains("lang_start"));
        assert!(out.contains("    app::y(app.rs:1)\n    ... 1 common frames omitted ...\n"));
    }

    #[test]
    fn test_depth_guard() {
        let mut chain = CapturedException::new("app::E", Some("leaf".into()));
        for _ in 0..5 {
            chain = CapturedException::new("app::E", Some("wrap".into())).with_cause(chain);
        }

        let renderer = ExceptionRenderer::new(StackResolver::default(), 2);
        let out = renderer.render_to_string(&chain);
        assert!(out.contains("      ... exception chain truncated at depth 3 ...\n"));
        assert!(!out.contains("leaf"));
    }

    #[test]
    fn test_common_tail() {
        assert_eq!(common_tail(&frames(&["a", "b", "c"]), &frames(&["x", "b", "c"])), 2);
        assert_eq!(common_tail(&frames(&["a"]), &frames(&["b"])), 0);
        assert_eq!(common_tail(&[], &frames(&["b"])), 0);
        assert_eq!(common_tail(&frames(&["a", "b"]), &frames(&["a", "b"])), 2);
    }
}
