//! URL fragment → heading resolution.
//!
//! A fragment such as `#shader-design` should land on its heading even when
//! the content pipeline rendered that heading without an id. Resolution
//! tries, in order:
//!
//! 1. an element whose id equals the fragment;
//! 2. a heading whose [`slugify`]d text equals the fragment;
//! 3. a heading whose slug contains the fragment, or is contained in it.
//!
//! The first hit is scrolled into view. A miss is not an error; it only
//! shows up in the `tracing` output.

mod ready;

use std::time::Duration;

use percent_encoding::percent_decode_str;
use serde::Serialize;
use url::Url;

pub use self::ready::{
    ContentReady,
    ContentReadySignal,
    content_ready,
};
use crate::config::AnchorSettings;
use crate::dom::{
    Document,
    NodeId,
    ScrollOptions,
};
use crate::slug::slugify;

/// Which step of the resolution found the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum MatchStrategy {
    /// An element already carried the fragment as its id.
    ElementId,
    /// A heading's generated slug equals the fragment.
    ExactSlug,
    /// A heading's generated slug and the fragment contain one another.
    PartialSlug,
}

/// A resolved fragment target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnchorMatch {
    pub node: NodeId,
    pub strategy: MatchStrategy,
    /// The target's id after resolution (possibly just assigned).
    pub id: String,
}

/// A heading as seen during one scan.
#[derive(Debug)]
struct HeadingCandidate {
    /// 見出し要素
    node: NodeId,
    /// テキストから生成したスラッグ
    slug: String,
    /// 既存の ID
    id: Option<String>,
}

#[derive(Debug, Clone)]
pub struct AnchorResolver {
    /// Heading levels that take part in slug matching
    heading_levels: Vec<u8>,
    /// Longest wait for the content-ready signal
    ready_timeout: Duration,
}

impl Default for AnchorResolver {
    fn default() -> Self {
        Self::new(&AnchorSettings::default())
    }
}

impl AnchorResolver {
    #[must_use]
    pub fn new(settings: &AnchorSettings) -> Self {
        Self {
            heading_levels: settings.heading_levels.clone(),
            ready_timeout: Duration::from_millis(settings.content_ready_timeout_ms),
        }
    }

    /// Finds the element `fragment` refers to.
    ///
    /// Tried in order: an element whose id is `fragment`, a heading whose
    /// slug equals it, then the first heading whose slug contains it or is
    /// contained in it. Headings with an empty slug never match partially.
    ///
    /// A heading found by its slug that has no id yet gets the slug as its
    /// id, so later lookups hit step 1.
    pub fn locate<D: Document + ?Sized>(&self, doc: &mut D, fragment: &str) -> Option<AnchorMatch> {
        if fragment.is_empty() {
            return None;
        }
        tracing::debug!(fragment, "searching for fragment target");

        if let Some(node) = doc.element_by_id(fragment) {
            tracing::debug!(fragment, "found element with matching id");
            return Some(AnchorMatch {
                node,
                strategy: MatchStrategy::ElementId,
                id: fragment.to_string(),
            });
        }

        let candidates = self.scan_headings(doc);

        let found = candidates
            .iter()
            .find(|candidate| candidate.slug == fragment)
            .map(|candidate| (candidate, MatchStrategy::ExactSlug))
            .or_else(|| {
                tracing::debug!(fragment, "no exact slug match, trying partial match");
                candidates
                    .iter()
                    .filter(|candidate| !candidate.slug.is_empty())
                    .find(|candidate| {
                        candidate.slug.contains(fragment) || fragment.contains(candidate.slug.as_str())
                    })
                    .map(|candidate| (candidate, MatchStrategy::PartialSlug))
            });

        let Some((candidate, strategy)) = found else {
            tracing::debug!(fragment, "no matching heading found");
            return None;
        };

        let id = match &candidate.id {
            Some(id) => id.clone(),
            None => {
                doc.set_id(candidate.node, &candidate.slug);
                candidate.slug.clone()
            }
        };
        tracing::debug!(fragment, ?strategy, id = %id, "matched heading");

        Some(AnchorMatch { node: candidate.node, strategy, id })
    }

    /// [`locate`](Self::locate)s `fragment` and scrolls it to the top of the
    /// viewport.
    pub fn scroll_to<D: Document + ?Sized>(&self, doc: &mut D, fragment: &str) -> Option<AnchorMatch> {
        let found = self.locate(doc, fragment)?;
        doc.scroll_into_view(found.node, ScrollOptions::SMOOTH_TO_TOP);
        Some(found)
    }

    /// Scrolls to the target of `url`'s fragment, if any.
    pub fn scroll_to_url<D: Document + ?Sized>(&self, doc: &mut D, url: &Url) -> Option<AnchorMatch> {
        let fragment = decode_fragment(url)?;
        self.scroll_to(doc, &fragment)
    }

    /// Waits for the content to be rendered, then scrolls to `url`'s fragment.
    ///
    /// Waiting stops after the configured timeout and the scan runs anyway.
    /// If the signal is dropped without notifying, the content was unmounted
    /// and nothing is scanned.
    pub async fn resolve_when_ready<D: Document + ?Sized>(
        &self,
        doc: &mut D,
        url: &Url,
        ready: ContentReady,
    ) -> Option<AnchorMatch> {
        match tokio::time::timeout(self.ready_timeout, ready.0).await {
            Ok(Ok(())) => tracing::debug!("content ready"),
            Ok(Err(_)) => {
                tracing::debug!("content unmounted before it was ready; skipping fragment");
                return None;
            }
            Err(_) => tracing::debug!(
                timeout = ?self.ready_timeout,
                "content-ready signal timed out; scanning anyway"
            ),
        }
        self.scroll_to_url(doc, url)
    }

    /// Collects headings with their generated slugs and traces them.
    fn scan_headings<D: Document + ?Sized>(&self, doc: &D) -> Vec<HeadingCandidate> {
        doc.headings(&self.heading_levels)
            .into_iter()
            .map(|node| {
                let text = doc.text_content(node);
                let slug = slugify(&text);
                let id = doc.id(node);
                tracing::debug!(text = %text, actual_id = ?id, generated_id = %slug, "heading");
                HeadingCandidate { node, slug, id }
            })
            .collect()
    }
}

/// The percent-decoded fragment of `url`.
///
/// `None` when there is no fragment, it is empty, or it does not decode to
/// UTF-8.
#[must_use]
pub fn decode_fragment(url: &Url) -> Option<String> {
    let raw = url.fragment().filter(|fragment| !fragment.is_empty())?;
    match percent_decode_str(raw).decode_utf8() {
        Ok(decoded) => Some(decoded.into_owned()),
        Err(e) => {
            tracing::debug!(fragment = raw, error = %e, "malformed fragment ignored");
            None
        }
    }
}
