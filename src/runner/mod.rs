mod fanout;
mod task;

pub use fanout::{FanOutCoordinator, PersonaResultSet, RequestContext};
pub use task::{run_task, PersonaResult, FALLBACK_TEXT};

#[cfg(test)]
pub(crate) use fanout::tests::{bind, Scripted};
