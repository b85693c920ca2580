use std::io::Write;

use tokio::sync::watch;

/// Prints every new decile the collector publishes as an `NN%` line on stderr.
pub(crate) fn setup_progress_printer(
    mut progress_rx: watch::Receiver<u8>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while progress_rx.changed().await.is_ok() {
            let percent = *progress_rx.borrow_and_update();
            if write_progress_line(&mut std::io::stderr(), percent).is_err() {
                break;
            }
        }
    })
}

pub(crate) fn write_progress_line<W: Write>(out: &mut W, percent: u8) -> std::io::Result<()> {
    writeln!(out, "{}%", percent)?;
    out.flush()
}
