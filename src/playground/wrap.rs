//! Re-execution-safe wrapping of transformed scripts.
//!
//! Every run is injected into the same page, so top-level `let`/`const`/
//! `class` declarations would collide with the previous run's bindings.
//! The wrapper gives each run its own scope:
//!
//! ```text
//! ;(function __livepad_run_7(__livepad) {       // named per run
//!   var React = __livepad.React, ...;           // bridge bindings
//!   try {
//!     (function () {                            // user scope, may shadow
//!       <body>
//!     }).call(this);
//!   } catch (__livepad_error) {
//!     __livepad.displayError(__livepad_error);  // sync throws reported
//!   }
//! })(window.__livepad.bridge(7));
//! ```

use std::fmt::Write;

use super::bridge::Bridge;

/// Name of the per-run invocable unit.
pub fn run_name(run: u64) -> String {
    format!("__livepad_run_{run}")
}

/// Wrap an executable body so it can be injected again and again.
pub fn wrap(body: &str, bridge: &Bridge) -> String {
    let mut out = String::with_capacity(body.len() + 1024);
    let run = bridge.run();

    let _ = writeln!(out, ";(function {}(__livepad) {{", run_name(run));

    let bindings: Vec<_> = bridge
        .names()
        .map(|name| format!("{name} = __livepad.{name}"))
        .collect();
    if !bindings.is_empty() {
        let _ = writeln!(out, "  var {};", bindings.join(", "));
    }

    out.push_str("  try {\n    (function () {\n");
    out.push_str(body);
    if !body.ends_with('\n') {
        out.push('\n');
    }
    out.push_str("    }).call(this);\n");
    out.push_str("  } catch (__livepad_error) {\n");
    out.push_str("    __livepad.displayError(__livepad_error);\n");
    out.push_str("  }\n");
    let _ = writeln!(out, "}})({});", bridge.expression());

    out
}
