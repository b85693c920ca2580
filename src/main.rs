mod app;
mod args;
mod config;
mod entry;
mod error;
mod http;
mod metrics;
mod report;
mod system;

use error::AppResult;

fn main() -> AppResult<()> {
    entry::run()
}
