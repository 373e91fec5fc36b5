//! Runs one invocation: arguments, fetch, extract, select, print.

use std::io::Write;

use crate::cli::{self, Command};
use crate::config::Config;
use crate::domain::{FeedItem, Options, RequestStatus};
use crate::errors::{XkcdError, XkcdResult};
use crate::logging;
use crate::services::FeedFetcher;
use crate::sources;
use crate::transport::TransportError;

/// Run the tool and return the process exit status.
///
/// Normal output goes to `out`; each failure writes one `Error: ...` line
/// to `err`.
pub fn run<S, O, E>(
    args: &[S],
    config: &Config,
    fetcher: &dyn FeedFetcher,
    out: &mut O,
    err: &mut E,
) -> i32
where
    S: AsRef<str>,
    O: Write,
    E: Write,
{
    match try_run(args, config, fetcher, out) {
        Ok(()) => 0,
        Err(e) => {
            let _ = writeln!(err, "Error: {}", e);
            let _ = err.flush();
            e.exit_code()
        }
    }
}

fn try_run<S, O>(args: &[S], config: &Config, fetcher: &dyn FeedFetcher, out: &mut O) -> XkcdResult<()>
where
    S: AsRef<str>,
    O: Write,
{
    let options = match cli::parse_args(args)? {
        Command::Help => {
            writeln!(out, "{}", cli::help_text())?;
            out.flush()?;
            return Ok(());
        }
        Command::Version => {
            writeln!(out, "{}", cli::version_text())?;
            out.flush()?;
            return Ok(());
        }
        Command::Run(options) => options,
    };

    logging::init(options.verbose);
    tracing::debug!(?options, "parsed arguments");

    let result = fetcher.fetch(&options);
    if let RequestStatus::Failed(code) = result.status() {
        return Err(TransportError::new(code, result.diagnostic()).into());
    }

    let items = sources::parse_items(result.payload())?;
    tracing::debug!(count = items.len(), "extracted feed items");

    let item = select(&items, options.previous)?;
    writeln!(out, "{}", render(item, &options, config.wrap_width))?;
    out.flush()?;
    Ok(())
}

/// Pick the item `previous` strips back from the newest.
pub fn select(items: &[FeedItem], previous: u32) -> XkcdResult<&FeedItem> {
    if items.is_empty() {
        return Err(XkcdError::NoEntries);
    }
    usize::try_from(previous)
        .ok()
        .and_then(|index| items.get(index))
        .ok_or(XkcdError::TooFarBack {
            max: items.len() - 1,
            requested: previous,
        })
}

fn render(item: &FeedItem, options: &Options, width: usize) -> String {
    if options.one_line {
        item.one_line()
    } else {
        item.fortune(width)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RequestResult;
    use crate::errors::{EXIT_FEED, EXIT_TRANSPORT, EXIT_USAGE};
    use crate::services::MockFeedFetcher;
    use crate::transport::ErrorCode;

    const XKCD_RSS: &[u8] = include_bytes!("../../tests/data/xkcd-rss.xml");

    const EMPTY_RSS: &[u8] = br#"<?xml version="1.0" encoding="utf-8"?>
<rss version="2.0"><channel><title>xkcd.com</title><link>https://xkcd.com/</link><description>empty</description></channel></rss>"#;

    fn invoke(args: &[&str], fetcher: &MockFeedFetcher) -> (i32, String, String) {
        let mut out = Vec::new();
        let mut err = Vec::new();
        let code = run(args, &Config::default(), fetcher, &mut out, &mut err);
        (
            code,
            String::from_utf8(out).unwrap(),
            String::from_utf8(err).unwrap(),
        )
    }

    fn never_called() -> MockFeedFetcher {
        let mut fetcher = MockFeedFetcher::new();
        fetcher.expect_fetch().never();
        fetcher
    }

    fn serving(payload: &'static [u8]) -> MockFeedFetcher {
        let mut fetcher = MockFeedFetcher::new();
        fetcher
            .expect_fetch()
            .times(1)
            .returning(move |_| RequestResult::success(payload.to_vec()));
        fetcher
    }

    #[test]
    fn test_help_never_fetches() {
        let cases: [&[&str]; 4] = [&["-h"], &["--help"], &["-b", "-h"], &["-b", "--help"]];
        for args in cases {
            let (code, out, err) = invoke(args, &never_called());
            assert_eq!(code, 0, "{args:?}");
            assert!(out.starts_with("Usage: xkcd-alt"), "{args:?}");
            assert!(err.is_empty());
        }
    }

    #[test]
    fn test_version_never_fetches() {
        let (code, out, _) = invoke(&["-V"], &never_called());
        assert_eq!(code, 0);
        assert!(out.starts_with("xkcd-alt "));
    }

    #[test]
    fn test_unknown_option_never_fetches() {
        let (code, out, err) = invoke(&["--bogus"], &never_called());
        assert_eq!(code, EXIT_USAGE);
        assert!(out.is_empty());
        assert_eq!(err, "Error: unknown option --bogus\n");
    }

    #[test]
    fn test_invalid_back_never_fetches() {
        let (code, out, err) = invoke(&["--back=-2"], &never_called());
        assert_eq!(code, EXIT_USAGE);
        assert!(out.is_empty());
        assert!(err.contains("must be positive"));
    }

    #[test]
    fn test_newest_by_default() {
        let (code, out, err) = invoke(&[], &serving(XKCD_RSS));
        assert_eq!(code, 0, "{err}");
        assert_eq!(
            out,
            "The dryer lint is technically a new moon, and I intend to name it.\n\t\t-- https://xkcd.com/2955/\n"
        );
    }

    #[test]
    fn test_back_two_wraps_third_newest() {
        let (code, out, _) = invoke(&["--back=2"], &serving(XKCD_RSS));
        assert_eq!(code, 0);
        assert_eq!(
            out,
            "Layer 14 contains a macro that nobody has dared to disable since the Bronze Age\nof accounting.\n\t\t-- https://xkcd.com/2953/\n"
        );
    }

    #[test]
    fn test_one_line_oldest() {
        let (code, out, _) = invoke(&["-b4", "-o"], &serving(XKCD_RSS));
        assert_eq!(code, 0);
        assert_eq!(
            out,
            "Ctrl-Alt-Shift-Meta-Hyper-Q is reserved for when I really, truly, want to leave. -- https://xkcd.com/2951/\n"
        );
    }

    #[test]
    fn test_too_far_back_names_maximum() {
        let (code, out, err) = invoke(&["-b", "5"], &serving(XKCD_RSS));
        assert_eq!(code, EXIT_USAGE);
        assert!(out.is_empty());
        assert_eq!(err, "Error: Can only go back at most 4 strips, not 5 strips\n");
    }

    #[test]
    fn test_far_back_leaks_nothing() {
        let (code, out, err) = invoke(&["-b1000"], &serving(XKCD_RSS));
        assert_ne!(code, 0);
        assert!(out.is_empty());
        assert!(!err.contains("https://xkcd.com/"));
    }

    #[test]
    fn test_transport_failure() {
        let mut fetcher = MockFeedFetcher::new();
        fetcher.expect_fetch().times(1).returning(|_| {
            RequestResult::failure(ErrorCode::CouldntResolveHost, "dns error: no such host")
        });

        let (code, out, err) = invoke(&[], &fetcher);

        assert_eq!(code, EXIT_TRANSPORT);
        assert!(out.is_empty());
        assert_eq!(err, "Error: transport error 6: dns error: no such host\n");
    }

    #[test]
    fn test_options_reach_fetcher() {
        let mut fetcher = MockFeedFetcher::new();
        fetcher
            .expect_fetch()
            .withf(|options| options.verbose && options.insecure && options.previous == 1)
            .times(1)
            .returning(|_| RequestResult::success(XKCD_RSS.to_vec()));

        let (code, _, _) = invoke(&["-k", "-v", "-b"], &fetcher);
        assert_eq!(code, 0);
    }

    #[test]
    fn test_garbage_payload_is_feed_error() {
        let (code, out, err) = invoke(&[], &serving(b"<html>nope</html>"));
        assert_eq!(code, EXIT_FEED);
        assert!(out.is_empty());
        assert!(err.starts_with("Error: Feed parsing failed"));
        assert_eq!(err.lines().count(), 1);
    }

    #[test]
    fn test_empty_feed_reports_no_entries() {
        let (code, out, err) = invoke(&["-b", "3"], &serving(EMPTY_RSS));
        assert_eq!(code, EXIT_FEED);
        assert!(out.is_empty());
        assert_eq!(err, "Error: Couldn't find any one-liners in RSS feed!\n");
    }

    #[test]
    fn test_select_bounds() {
        let items = sources::parse_items(XKCD_RSS).unwrap();

        assert_eq!(select(&items, 4).unwrap().guid, "https://xkcd.com/2951/");
        assert!(matches!(
            select(&items, 5),
            Err(XkcdError::TooFarBack { max: 4, requested: 5 })
        ));
        assert!(matches!(select(&[], 0), Err(XkcdError::NoEntries)));
    }
}
