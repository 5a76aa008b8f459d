mod report;

pub use report::{write_plan_report, write_reflection_report};
