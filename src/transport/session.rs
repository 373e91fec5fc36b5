use std::cell::Cell;
use std::error::Error as StdError;
use std::io::{ErrorKind, Read};
use std::panic::{self, AssertUnwindSafe};
use std::sync::Once;
use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::redirect::Policy;

use super::error::{ErrorCode, TransportError};
use super::global::{global_init, Defaults};
use super::option::{AlwaysOk, ErrorBufferHandle, TransportOption, WriteCallback, WriteTarget};

const CHUNK_SIZE: usize = 16 * 1024;

/// Target for verbose request logging.
const VERBOSE_TARGET: &str = "xkcd_alt::transport::verbose";

/// Option values gathered on a session before it runs.
#[doc(hidden)]
pub struct Settings {
    pub(super) url: Option<url::Url>,
    pub(super) verbose: bool,
    pub(super) verify_peer: bool,
    pub(super) error_buffer: Option<ErrorBufferHandle>,
    pub(super) write_function: WriteCallback,
    pub(super) write_data: Option<WriteTarget>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            url: None,
            verbose: false,
            verify_peer: true,
            error_buffer: None,
            write_function: discard,
            write_data: None,
        }
    }
}

fn discard(incoming: &[u8], _target: &mut Vec<u8>) -> usize {
    incoming.len()
}

thread_local! {
    static IN_CALLBACK: Cell<bool> = const { Cell::new(false) };
}

static QUIET_HOOK: Once = Once::new();

/// Wrap the panic hook so panics raised inside a write callback are not
/// printed. The failure is reported once, as the transfer's write error.
fn install_quiet_hook() {
    QUIET_HOOK.call_once(|| {
        let previous = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            if !IN_CALLBACK.with(Cell::get) {
                previous(info);
            }
        }));
    });
}

/// One transport session: set options, then run the request once.
///
/// Sessions are move-only. Everything they hold is released when they are
/// dropped, whichever way `execute` or option setting went.
pub struct Session {
    defaults: &'static Defaults,
    settings: Settings,
}

impl Session {
    /// Run the one-time transport setup if nobody has yet, then start a
    /// session with default settings.
    pub fn new() -> Result<Self, TransportError> {
        let defaults = global_init()?;
        Ok(Self {
            defaults,
            settings: Settings::default(),
        })
    }

    /// Set an option whose application can fail.
    pub fn set<O: TransportOption>(&mut self, value: O::Value) -> Result<&mut Self, TransportError> {
        match O::apply(&mut self.settings, value) {
            Ok(()) => Ok(self),
            Err((code, detail)) => Err(self.fail(code, &format!("{}: {detail}", O::NAME))),
        }
    }

    /// Set an option that can never fail.
    pub fn put<O: AlwaysOk>(&mut self, value: O::Value) -> &mut Self {
        O::apply_ok(&mut self.settings, value);
        self
    }

    /// Builder form of [`Session::set`].
    pub fn with<O: TransportOption>(mut self, value: O::Value) -> Result<Self, TransportError> {
        self.set::<O>(value)?;
        Ok(self)
    }

    /// Perform the GET request, streaming the body through the write callback.
    ///
    /// Blocks until the transfer finishes. HTTP error statuses are not
    /// failures; their bodies are delivered like any other.
    pub fn execute(&mut self) -> Result<(), TransportError> {
        let url = match self.settings.url.clone() {
            Some(url) => url,
            None => return Err(self.fail(ErrorCode::UrlMalformat, "No URL set")),
        };

        let client = self.build_client()?;
        let verbose = self.settings.verbose;

        if verbose {
            tracing::info!(target: VERBOSE_TARGET, "> GET {url}");
        }

        let mut response = client
            .get(url)
            .send()
            .map_err(|e| self.fail(classify(&e), &error_chain(&e)))?;

        if verbose {
            tracing::info!(
                target: VERBOSE_TARGET,
                "< {:?} {}",
                response.version(),
                response.status()
            );
            for (name, value) in response.headers() {
                tracing::info!(
                    target: VERBOSE_TARGET,
                    "< {}: {}",
                    name,
                    value.to_str().unwrap_or("<binary>")
                );
            }
        }

        let mut chunk = vec![0u8; CHUNK_SIZE];
        let mut total = 0usize;
        loop {
            let read = match response.read(&mut chunk) {
                Ok(0) => break,
                Ok(read) => read,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(self.fail(ErrorCode::RecvError, &error_chain(&e))),
            };

            let written = self.deliver(&chunk[..read]);
            if written != read {
                return Err(self.fail(
                    ErrorCode::WriteError,
                    &format!(
                        "Failure writing output to destination, passed {read} returned {written}"
                    ),
                ));
            }
            total += read;
        }

        tracing::debug!(bytes = total, "transfer complete");
        Ok(())
    }

    fn build_client(&self) -> Result<Client, TransportError> {
        // Redirects are handed back like any other response
        Client::builder()
            .default_headers(self.defaults.headers.clone())
            .connection_verbose(self.settings.verbose)
            .danger_accept_invalid_certs(!self.settings.verify_peer)
            .redirect(Policy::none())
            .timeout(None::<Duration>)
            .build()
            .map_err(|e| self.fail(ErrorCode::FailedInit, &error_chain(&e)))
    }

    /// Hand a chunk to the write callback. A panicking callback counts as
    /// having consumed nothing.
    fn deliver(&self, data: &[u8]) -> usize {
        let Some(target) = &self.settings.write_data else {
            return data.len();
        };
        let Ok(mut buffer) = target.buffer().try_borrow_mut() else {
            tracing::error!("write target is already borrowed");
            return 0;
        };

        install_quiet_hook();
        let callback = self.settings.write_function;
        IN_CALLBACK.with(|flag| flag.set(true));
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| callback(data, &mut buffer)));
        IN_CALLBACK.with(|flag| flag.set(false));

        outcome.unwrap_or_else(|_| {
            tracing::debug!("write callback panicked");
            0
        })
    }

    /// Record `detail` in the error buffer and build the error for `code`.
    fn fail(&self, code: ErrorCode, detail: &str) -> TransportError {
        tracing::debug!(code = code.as_i32(), detail, "transport failure");
        if let Some(buffer) = &self.settings.error_buffer {
            buffer.record(detail);
        }
        TransportError::from_code(code)
    }
}

/// Map a client error onto a status code.
fn classify(err: &reqwest::Error) -> ErrorCode {
    if err.is_builder() {
        return ErrorCode::UrlMalformat;
    }
    if err.is_timeout() {
        return ErrorCode::OperationTimedout;
    }
    if err.is_redirect() {
        return ErrorCode::TooManyRedirects;
    }
    if err.is_body() || err.is_decode() {
        return ErrorCode::RecvError;
    }

    let chain = error_chain(err).to_lowercase();
    if chain.contains("dns error") || chain.contains("failed to lookup address") {
        ErrorCode::CouldntResolveHost
    } else if chain.contains("certificate") || chain.contains("unknownissuer") {
        ErrorCode::PeerFailedVerification
    } else if chain.contains("tls") || chain.contains("handshake") {
        ErrorCode::SslConnectError
    } else if err.is_connect() {
        ErrorCode::CouldntConnect
    } else {
        ErrorCode::SendError
    }
}

/// An error and all of its sources, joined with ": ".
fn error_chain(err: &(dyn StdError + 'static)) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }
    message
}
