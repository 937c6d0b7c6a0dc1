//! Bounded batch fetcher
//!
//! Reads URLs line-by-line from an input stream and fetches them with a
//! fixed budget of concurrent tasks: up to `limit` fetches are dispatched,
//! their results drained through a bounded channel, and only then is the
//! next batch of lines read. At no point are more than `limit` fetches in
//! flight.
//!
//! No depth, no link-following, no visited set: each input line is fetched
//! exactly once by construction.

use crate::fetcher::Fetcher;
use crate::sink::{FetchRecord, ResultSink};
use crate::{ConfigError, ScoutError};
use regex::Regex;
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::mpsc;

/// Fetches every URL on `input` through at most `limit` concurrent tasks
///
/// Each line is one URL; blank lines are skipped. A per-URL fetch failure
/// becomes an error-carrying record and the batch continues. When `pattern`
/// is given, each successful record carries the number of pattern matches in
/// the body.
///
/// Fatal errors: a zero `limit` and any read error on the input stream.
pub async fn run_batch<F, R>(
    input: R,
    limit: usize,
    fetcher: Arc<F>,
    pattern: Option<Regex>,
    sink: &ResultSink,
) -> Result<(), ScoutError>
where
    F: Fetcher + 'static,
    R: AsyncBufRead + Unpin,
{
    if limit == 0 {
        return Err(ConfigError::InvalidConcurrency.into());
    }

    // Bounded result channel: capacity equals the task budget, so producers
    // block rather than queue unbounded work.
    let (result_tx, mut result_rx) = mpsc::channel::<FetchRecord>(limit);
    let mut lines = input.lines();
    let mut eof = false;

    while !eof {
        // Dispatch up to `limit` fetch tasks for this batch
        let mut in_flight = 0usize;
        while in_flight < limit {
            let line = match lines.next_line().await? {
                Some(line) => line,
                None => {
                    eof = true;
                    break;
                }
            };

            let url = line.trim().to_string();
            if url.is_empty() {
                tracing::debug!("skipping blank input line");
                continue;
            }

            let fetcher = fetcher.clone();
            let pattern = pattern.clone();
            let result_tx = result_tx.clone();
            tokio::spawn(async move {
                let record = fetch_one(&*fetcher, url, pattern.as_ref()).await;
                // The receiver outlives every batch task; a send can only
                // fail if the whole run was dropped.
                let _ = result_tx.send(record).await;
            });
            in_flight += 1;
        }

        // Drain exactly as many results as were dispatched before reading
        // the next batch
        while in_flight > 0 {
            match result_rx.recv().await {
                Some(record) => {
                    sink.record(record);
                    in_flight -= 1;
                }
                None => break,
            }
        }
    }

    Ok(())
}

/// Fetches a single URL and builds its outcome record
async fn fetch_one<F: Fetcher>(fetcher: &F, url: String, pattern: Option<&Regex>) -> FetchRecord {
    match fetcher.fetch(&url).await {
        Ok(page) => {
            let matches = pattern.map(|p| p.find_iter(&page.body).count());
            let record = FetchRecord::success(url, page);
            match matches {
                Some(count) => record.with_matches(count),
                None => record,
            }
        }
        Err(error) => FetchRecord::failure(url, error),
    }
}
