mod args;
mod runner;

pub(crate) use args::Cli;
pub(crate) use runner::run;
