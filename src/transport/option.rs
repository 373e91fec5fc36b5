//! Typed transport option bindings.
//!
//! Each option is a zero-sized marker type whose [`TransportOption::Value`]
//! fixes the value it accepts, so pairing an option with the wrong kind of
//! value does not compile. Options that can never fail to apply also
//! implement [`AlwaysOk`], which lets [`Session::put`](super::Session::put)
//! set them without a `Result`.

use std::cell::RefCell;
use std::rc::Rc;

use super::error::ErrorCode;
use super::session::Settings;

/// Write callback: receives one chunk of the response body and the registered
/// write target, returns how many bytes it consumed. Anything short of the
/// chunk length aborts the transfer with [`ErrorCode::WriteError`].
pub type WriteCallback = fn(&[u8], &mut Vec<u8>) -> usize;

/// Shared buffer the session writes a detailed failure reason into.
#[derive(Debug, Clone, Default)]
pub struct ErrorBufferHandle(Rc<RefCell<String>>);

impl ErrorBufferHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contents(&self) -> String {
        self.0.borrow().clone()
    }

    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }

    pub(super) fn record(&self, reason: &str) {
        if let Ok(mut buffer) = self.0.try_borrow_mut() {
            buffer.clear();
            buffer.push_str(reason);
        }
    }
}

/// Shared destination handed to the write callback.
#[derive(Debug, Clone, Default)]
pub struct WriteTarget(Rc<RefCell<Vec<u8>>>);

impl WriteTarget {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Take the accumulated bytes, leaving the target empty.
    pub fn take(&self) -> Vec<u8> {
        std::mem::take(&mut *self.0.borrow_mut())
    }

    pub(super) fn buffer(&self) -> &RefCell<Vec<u8>> {
        &self.0
    }
}

mod private {
    pub trait Sealed {}
}

/// A transport option and the value type it must be set with.
pub trait TransportOption: private::Sealed {
    type Value;

    /// Name used in diagnostics.
    const NAME: &'static str;

    /// `true` if applying the option can never fail.
    const ALWAYS_OK: bool;

    #[doc(hidden)]
    fn apply(settings: &mut Settings, value: Self::Value) -> Result<(), (ErrorCode, String)>;
}

/// Options whose application has no failure path.
pub trait AlwaysOk: TransportOption {
    #[doc(hidden)]
    fn apply_ok(settings: &mut Settings, value: Self::Value);
}

macro_rules! always_ok_option {
    ($name:ident, $label:literal, $value:ty, |$settings:ident, $v:ident| $body:expr) => {
        impl private::Sealed for $name {}

        impl TransportOption for $name {
            type Value = $value;
            const NAME: &'static str = $label;
            const ALWAYS_OK: bool = true;

            fn apply(
                settings: &mut Settings,
                value: Self::Value,
            ) -> Result<(), (ErrorCode, String)> {
                <Self as AlwaysOk>::apply_ok(settings, value);
                Ok(())
            }
        }

        impl AlwaysOk for $name {
            fn apply_ok($settings: &mut Settings, $v: Self::Value) {
                $body
            }
        }
    };
}

/// Where to record a detailed reason when something fails.
pub struct ErrorBuffer;

/// Callback that consumes the response body.
pub struct WriteFunction;

/// Destination passed to the [`WriteFunction`] callback.
pub struct WriteData;

/// Target URL. Fails on anything that is not an absolute http(s) URL.
pub struct Url;

/// Log request and connection details.
pub struct Verbose;

/// Verify the server's certificate.
pub struct SslVerifyPeer;

always_ok_option!(ErrorBuffer, "ERRORBUFFER", ErrorBufferHandle, |settings, v| {
    settings.error_buffer = Some(v)
});

always_ok_option!(WriteFunction, "WRITEFUNCTION", WriteCallback, |settings, v| {
    settings.write_function = v
});

always_ok_option!(WriteData, "WRITEDATA", WriteTarget, |settings, v| {
    settings.write_data = Some(v)
});

impl private::Sealed for Url {}

impl TransportOption for Url {
    type Value = String;
    const NAME: &'static str = "URL";
    const ALWAYS_OK: bool = false;

    fn apply(settings: &mut Settings, value: String) -> Result<(), (ErrorCode, String)> {
        let url = url::Url::parse(&value)
            .map_err(|e| (ErrorCode::UrlMalformat, format!("URL rejected: {e}")))?;

        match url.scheme() {
            "http" | "https" => {
                settings.url = Some(url);
                Ok(())
            }
            scheme => Err((
                ErrorCode::UnsupportedProtocol,
                format!("Protocol \"{scheme}\" not supported"),
            )),
        }
    }
}

impl private::Sealed for Verbose {}

impl TransportOption for Verbose {
    type Value = bool;
    const NAME: &'static str = "VERBOSE";
    const ALWAYS_OK: bool = false;

    fn apply(settings: &mut Settings, value: bool) -> Result<(), (ErrorCode, String)> {
        settings.verbose = value;
        Ok(())
    }
}

impl private::Sealed for SslVerifyPeer {}

impl TransportOption for SslVerifyPeer {
    type Value = bool;
    const NAME: &'static str = "SSL_VERIFYPEER";
    const ALWAYS_OK: bool = false;

    fn apply(settings: &mut Settings, value: bool) -> Result<(), (ErrorCode, String)> {
        settings.verify_peer = value;
        Ok(())
    }
}
