use crate::domain::{Options, RequestResult};
use crate::transport::option::{ErrorBuffer, SslVerifyPeer, Url, Verbose, WriteData, WriteFunction};
use crate::transport::{ErrorBufferHandle, Session, TransportError, WriteTarget};

/// Current XKCD RSS feed URL.
pub const XKCD_RSS_URL: &str = "https://xkcd.com/rss.xml";

/// Something that can retrieve the feed.
#[cfg_attr(test, mockall::automock)]
pub trait FeedFetcher {
    /// Retrieve the feed once. Never fails; failures are part of the result.
    fn fetch(&self, options: &Options) -> RequestResult;
}

/// Retrieves the feed over HTTP(S).
pub struct FetchService {
    url: String,
}

impl FetchService {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    fn request(
        &self,
        options: &Options,
        errors: &ErrorBufferHandle,
        body: &WriteTarget,
    ) -> Result<(), TransportError> {
        let mut session = Session::new()?;
        session
            .put::<ErrorBuffer>(errors.clone())
            .put::<WriteFunction>(accumulate)
            .put::<WriteData>(body.clone());

        tracing::debug!(url = %self.url, insecure = options.insecure, "fetching feed");
        session
            .with::<Url>(self.url.clone())?
            .with::<Verbose>(options.verbose)?
            .with::<SslVerifyPeer>(!options.insecure)?
            .execute()
    }
}

impl Default for FetchService {
    fn default() -> Self {
        Self::new(XKCD_RSS_URL)
    }
}

impl FeedFetcher for FetchService {
    fn fetch(&self, options: &Options) -> RequestResult {
        let errors = ErrorBufferHandle::new();
        let body = WriteTarget::new();

        match self.request(options, &errors, &body) {
            Ok(()) => RequestResult::success(body.take()),
            Err(err) if errors.is_empty() => err.into(),
            // Prefer the detailed reason over the generic code text
            Err(err) => RequestResult::failure(err.code(), errors.contents()),
        }
    }
}

/// Append a chunk of the response body. Reports a short write instead of
/// aborting when the buffer cannot grow.
fn accumulate(incoming: &[u8], body: &mut Vec<u8>) -> usize {
    if let Err(e) = body.try_reserve(incoming.len()) {
        tracing::error!(error = %e, "cannot buffer response body");
        return 0;
    }
    body.extend_from_slice(incoming);
    incoming.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RequestStatus;
    use crate::transport::ErrorCode;
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::thread;

    fn serve_once(body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        thread::spawn(move || {
            if let Ok((mut stream, _)) = listener.accept() {
                let mut request = [0u8; 4096];
                let _ = stream.read(&mut request);
                let response = format!(
                    "HTTP/1.1 200 OK\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    body.len(),
                    body
                );
                let _ = stream.write_all(response.as_bytes());
            }
        });
        format!("http://{addr}/rss.xml")
    }

    #[test]
    fn test_default_targets_xkcd() {
        assert_eq!(FetchService::default().url(), "https://xkcd.com/rss.xml");
    }

    #[test]
    fn test_accumulate_appends() {
        let mut body = b"ab".to_vec();
        assert_eq!(accumulate(b"cd", &mut body), 2);
        assert_eq!(body, b"abcd");
    }

    #[test]
    fn test_fetch_returns_body() {
        let service = FetchService::new(serve_once("<rss/>"));
        let result = service.fetch(&Options::default());

        assert!(result.is_success(), "{}", result.diagnostic());
        assert_eq!(result.text(), "<rss/>");
    }

    #[test]
    fn test_bad_url_is_returned_as_failure() {
        let service = FetchService::new("not a url");
        let result = service.fetch(&Options::default());

        assert_eq!(result.status(), RequestStatus::Failed(ErrorCode::UrlMalformat));
        assert!(result.diagnostic().starts_with("URL: "));
        assert!(result.payload().is_empty());
    }

    #[test]
    fn test_unreachable_host_is_returned_as_failure() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let service = FetchService::new(format!("http://{addr}/rss.xml"));
        let result = service.fetch(&Options::default().with_insecure(true));

        assert_eq!(result.status(), RequestStatus::Failed(ErrorCode::CouldntConnect));
        assert!(!result.diagnostic().is_empty());
    }
}
