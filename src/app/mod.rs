mod plan;
mod progress;
mod runner;


pub(crate) use plan::RunPlan;
pub(crate) use runner::run_probe;
