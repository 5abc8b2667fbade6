//! CLI command handlers, one per file.

mod completions;
mod expire;
mod flush;
mod forget;
mod mark_done;
mod status;

pub use completions::run_completions;
pub use expire::run_expire;
pub use flush::run_flush;
pub use forget::run_forget;
pub use mark_done::run_mark_done;
pub use status::run_status;
