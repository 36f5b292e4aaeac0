//! Share message, platform links, and the share fallback cascade.
//!
//! The host supplies a [`ShareBackend`] for the capabilities it has (native
//! share sheet, link opener, clipboard, a chooser prompt). [`share`] walks them
//! in order: native share, then the platform chooser, then a plain clipboard
//! copy when anything earlier failed.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use thiserror::Error;
use tracing::{debug, warn};
use url::Url;

use crate::core::progress::Progress;

/// Title attached to native shares.
pub const SHARE_TITLE: &str = "🌍 My Travel Bucket List ✈️";

/// Characters left unescaped in a query component: alphanumerics and `-_.!~*'()`.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Failure reported by a host capability.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct BackendError(pub String);

impl From<url::ParseError> for BackendError {
    fn from(value: url::ParseError) -> Self {
        Self(format!("share link: {value}"))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShareError {
    /// Every path failed, including the clipboard fallback.
    #[error("unable to share: {0}")]
    Failed(BackendError),
}

/// What the user ended up doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShareOutcome {
    /// The native share sheet completed.
    Native,
    /// A platform share page was opened.
    OpenedPlatform(Platform),
    /// Text and link were copied from the chooser.
    CopiedLink,
    /// The last-resort clipboard copy succeeded.
    CopiedText,
    /// The chooser was dismissed.
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareMessage {
    pub title: String,
    pub text: String,
    pub page_url: Url,
}

impl ShareMessage {
    pub fn new(progress: &Progress, page_url: Url) -> Self {
        let text = format!(
            "{SHARE_TITLE}\n\n{} amazing destinations planned!\n{} already completed! 🎉\n\nJoin me on this incredible journey!",
            progress.total, progress.completed
        );
        Self {
            title: SHARE_TITLE.to_string(),
            text,
            page_url,
        }
    }

    /// Text placed on the clipboard: message, blank line, page address.
    pub fn clipboard_text(&self) -> String {
        format!("{}\n\n{}", self.text, self.page_url)
    }

    pub fn links(&self) -> Result<Vec<PlatformLink>, url::ParseError> {
        Platform::ALL
            .into_iter()
            .map(|platform| platform.link(self).map(|url| PlatformLink { platform, url }))
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    Twitter,
    Facebook,
    WhatsApp,
    LinkedIn,
}

impl Platform {
    pub const ALL: [Platform; 4] = [
        Platform::Twitter,
        Platform::Facebook,
        Platform::WhatsApp,
        Platform::LinkedIn,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Platform::Twitter => "Twitter/X",
            Platform::Facebook => "Facebook",
            Platform::WhatsApp => "WhatsApp",
            Platform::LinkedIn => "LinkedIn",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Platform::Twitter => "🐦",
            Platform::Facebook => "📘",
            Platform::WhatsApp => "💬",
            Platform::LinkedIn => "💼",
        }
    }

    /// Share-intent address for this platform. Query values are
    /// percent-encoded as URI components, so spaces become `%20`.
    pub fn link(self, message: &ShareMessage) -> Result<Url, url::ParseError> {
        let page = message.page_url.as_str();
        let text_and_page = format!("{} {}", message.text, page);
        let (base, params): (&str, Vec<(&str, &str)>) = match self {
            Platform::Twitter => (
                "https://twitter.com/intent/tweet",
                vec![("text", text_and_page.as_str())],
            ),
            Platform::Facebook => (
                "https://www.facebook.com/sharer/sharer.php",
                vec![("u", page), ("quote", message.text.as_str())],
            ),
            Platform::WhatsApp => ("https://wa.me/", vec![("text", text_and_page.as_str())]),
            Platform::LinkedIn => (
                "https://www.linkedin.com/sharing/share-offsite/",
                vec![("url", page), ("summary", message.text.as_str())],
            ),
        };
        let query = params
            .iter()
            .map(|(key, value)| format!("{key}={}", utf8_percent_encode(value, COMPONENT)))
            .collect::<Vec<_>>()
            .join("&");
        Url::parse(&format!("{base}?{query}"))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformLink {
    pub platform: Platform,
    pub url: Url,
}

/// Selection made in the platform chooser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShareChoice {
    Platform(Platform),
    CopyLink,
}

/// Host capabilities used by [`share`].
pub trait ShareBackend {
    fn supports_native_share(&self) -> bool;
    fn native_share(&mut self, message: &ShareMessage) -> Result<(), BackendError>;
    /// Presents `links`; `Ok(None)` means the user dismissed the chooser.
    fn choose(&mut self, links: &[PlatformLink]) -> Result<Option<ShareChoice>, BackendError>;
    fn open_link(&mut self, url: &Url) -> Result<(), BackendError>;
    fn copy_to_clipboard(&mut self, text: &str) -> Result<(), BackendError>;
}

pub fn share<B: ShareBackend + ?Sized>(
    backend: &mut B,
    message: &ShareMessage,
) -> Result<ShareOutcome, ShareError> {
    match try_share(backend, message) {
        Ok(outcome) => {
            debug!(?outcome, "shared");
            Ok(outcome)
        }
        Err(err) => {
            warn!(%err, "share failed, falling back to clipboard");
            backend
                .copy_to_clipboard(&message.clipboard_text())
                .map(|()| ShareOutcome::CopiedText)
                .map_err(ShareError::Failed)
        }
    }
}

fn try_share<B: ShareBackend + ?Sized>(
    backend: &mut B,
    message: &ShareMessage,
) -> Result<ShareOutcome, BackendError> {
    if backend.supports_native_share() {
        backend.native_share(message)?;
        return Ok(ShareOutcome::Native);
    }

    let links = message.links()?;
    let Some(choice) = backend.choose(&links)? else {
        return Ok(ShareOutcome::Cancelled);
    };

    match choice {
        ShareChoice::CopyLink => {
            backend.copy_to_clipboard(&message.clipboard_text())?;
            Ok(ShareOutcome::CopiedLink)
        }
        ShareChoice::Platform(platform) => {
            let link = links
                .iter()
                .find(|l| l.platform == platform)
                .ok_or_else(|| BackendError(format!("no link for {}", platform.name())))?;
            backend.open_link(&link.url)?;
            Ok(ShareOutcome::OpenedPlatform(platform))
        }
    }
}
