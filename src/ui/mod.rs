//! Terminal user interface built on [ratatui](https://github.com/ratatui-org/ratatui).
//!
//! The UI replays a recorded execution trace step by step rather than driving the
//! interpreter live. It is organized into three layers:
//!
//! - **[`app`]** — application state, keyboard event loop, pane focus, replay cursor
//! - **[`panes`]** — stateless render functions for each visible pane (source, output,
//!   tape, input, status bar)
//! - **[`theme`]** — centralized color palette used by all panes
//!
//! The entry point for consumers is [`App`]: construct it with a recorded
//! [`TraceLog`] and call [`App::run`] to start the event loop.
//!
//! [`TraceLog`]: crate::trace::TraceLog
//! [`App::run`]: app::App::run

pub mod app;
pub mod panes;
pub mod theme;

pub use app::App;
