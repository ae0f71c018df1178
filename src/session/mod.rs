//! # Editing Session
//!
//! One [`Session`] per QR code being edited. It owns every piece of mutable
//! state for that document: content drafts (one per content type, so
//! switching tabs never loses input), the design, the resolved logo, and the
//! last rendered output.
//!
//! Edits are applied immediately but regeneration is debounced: each edit
//! returns a [`Ticket`], and only the latest ticket is ever rendered.
//!
//! ```
//! use std::time::{Duration, Instant};
//! use qrsmith::content::ContentEdit;
//! use qrsmith::session::{Edit, Session};
//!
//! let mut session = Session::default();
//! let t0 = Instant::now();
//! session.apply(Edit::Content(ContentEdit::Url("https://exa".into())), t0);
//! session.apply(Edit::Content(ContentEdit::Url("https://example.com".into())), t0);
//!
//! assert!(!session.regenerate_if_due(t0));
//! assert!(session.regenerate_if_due(t0 + Duration::from_millis(300)));
//! assert_eq!(session.rendered().payload.as_deref(), Some("https://example.com"));
//! ```
//!
//! Sessions are not internally synchronized; callers that share one across
//! threads wrap it in a mutex so edits and regeneration stay serialized.

mod debounce;

pub use debounce::{Debouncer, Ticket};

use std::time::Instant;

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::content::{Content, ContentDrafts, ContentEdit};
use crate::design::{Design, LogoImage};
use crate::pipeline::{Pipeline, Rendered};

/// A change requested by the editor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Edit {
    /// Change one content field.
    Content(ContentEdit),
    /// Replace the whole content value and make its type active.
    Replace(Content),
    /// Replace the design.
    Design(Design),
}

#[derive(Debug, Clone)]
pub struct Session {
    drafts: ContentDrafts,
    design: Design,
    logo: Option<LogoImage>,
    pipeline: Pipeline,
    debouncer: Debouncer,
    rendered: Rendered,
    generation: u64,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(Pipeline::default())
    }
}

impl Session {
    pub fn new(pipeline: Pipeline) -> Self {
        Self {
            drafts: ContentDrafts::new(),
            design: Design::default(),
            logo: None,
            pipeline,
            debouncer: Debouncer::default(),
            rendered: Rendered::default(),
            generation: 0,
        }
    }

    /// A session seeded with existing content and design, rendered at once.
    pub fn with_state(pipeline: Pipeline, content: &Content, design: Design) -> Self {
        let mut session = Self::new(pipeline);
        session.drafts = ContentDrafts::from_content(content);
        session.design = design;
        session.render_now();
        session
    }

    /// Use a different debounce window.
    pub fn with_debouncer(mut self, debouncer: Debouncer) -> Self {
        self.debouncer = debouncer;
        self
    }

    /// The active content value.
    pub fn content(&self) -> Content {
        self.drafts.active()
    }

    pub fn drafts(&self) -> &ContentDrafts {
        &self.drafts
    }

    pub fn design(&self) -> &Design {
        &self.design
    }

    pub fn logo(&self) -> Option<&LogoImage> {
        self.logo.as_ref()
    }

    /// Output of the most recent regeneration.
    pub fn rendered(&self) -> &Rendered {
        &self.rendered
    }

    /// Number of regenerations applied so far.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn debouncer(&self) -> &Debouncer {
        &self.debouncer
    }

    pub fn pending(&self) -> Option<Ticket> {
        self.debouncer.pending()
    }

    /// Apply `edit` and schedule a regeneration.
    pub fn apply(&mut self, edit: Edit, now: Instant) -> Ticket {
        match edit {
            Edit::Content(edit) => {
                if !self.drafts.apply(edit) {
                    debug!("active {} content unchanged", self.drafts.active_kind().name());
                }
            }
            Edit::Replace(content) => self.drafts.replace(content),
            Edit::Design(design) => {
                // A new reference waits for its own image.
                if design.logo != self.design.logo {
                    self.logo = None;
                }
                self.design = design;
            }
        }
        self.debouncer.touch(now)
    }

    /// Regenerate if the quiet window has elapsed since the last edit.
    pub fn regenerate_if_due(&mut self, now: Instant) -> bool {
        match self.debouncer.take(now) {
            Some(ticket) => {
                self.render(ticket);
                true
            }
            None => false,
        }
    }

    /// Regenerate for `ticket` if no newer edit has arrived since it was issued.
    pub fn regenerate(&mut self, ticket: Ticket) -> bool {
        if self.debouncer.claim(ticket) {
            self.render(ticket);
            true
        } else {
            debug!("skipping stale ticket {}", ticket.id());
            false
        }
    }

    /// Drop any pending regeneration and render the current state now.
    pub fn flush(&mut self) {
        self.debouncer.cancel();
        self.render_now();
    }

    /// Second render phase: the logo image finished loading.
    ///
    /// Renders immediately; the zone was already reserved by the design.
    /// Returns `false` and changes nothing when the image was loaded for a
    /// logo reference the design no longer has.
    pub fn resolve_logo(&mut self, logo: LogoImage) -> bool {
        if !logo.belongs_to(&self.design) {
            warn!(
                "dropping logo loaded for {:?}, design logo is {:?}",
                logo.source, self.design.logo
            );
            return false;
        }
        self.logo = Some(logo);
        self.flush();
        true
    }

    fn render(&mut self, ticket: Ticket) {
        debug!("regenerating for ticket {}", ticket.id());
        self.render_now();
    }

    fn render_now(&mut self) {
        self.rendered = self
            .pipeline
            .run(&self.drafts.active(), &self.design, self.logo.as_ref());
        self.generation += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::ContentKind;
    use std::time::Duration;

    const WINDOW: Duration = Duration::from_millis(300);

    fn url(s: &str) -> Edit {
        Edit::Content(ContentEdit::Url(s.into()))
    }

    #[test]
    fn test_burst_coalesces_into_one_render() {
        let mut session = Session::default();
        let t0 = Instant::now();
        for (i, partial) in ["h", "ht", "htt", "http://a.b"].iter().enumerate() {
            session.apply(url(partial), t0 + Duration::from_millis(50 * i as u64));
        }
        assert!(!session.regenerate_if_due(t0 + WINDOW));
        assert!(session.regenerate_if_due(t0 + Duration::from_millis(150) + WINDOW));
        assert_eq!(session.generation(), 1);
        assert_eq!(session.rendered().payload.as_deref(), Some("http://a.b"));
    }

    #[test]
    fn test_stale_ticket_never_applies() {
        let mut session = Session::default();
        let t0 = Instant::now();
        let old = session.apply(url("https://old.example"), t0);
        let new = session.apply(url("https://new.example"), t0 + Duration::from_millis(10));

        assert!(!session.regenerate(old));
        assert_eq!(session.generation(), 0);
        assert!(session.regenerate(new));
        assert_eq!(session.rendered().payload.as_deref(), Some("https://new.example"));
        // A late timer for the old edit still does nothing.
        assert!(!session.regenerate(old));
        assert_eq!(session.generation(), 1);
    }

    #[test]
    fn test_drafts_survive_type_switch() {
        let mut session = Session::default();
        let t0 = Instant::now();
        session.apply(url("https://example.com"), t0);
        session.apply(Edit::Content(ContentEdit::Kind(ContentKind::Text)), t0);
        session.apply(Edit::Content(ContentEdit::Text("note".into())), t0);
        session.flush();
        assert_eq!(session.rendered().payload.as_deref(), Some("note"));

        session.apply(Edit::Content(ContentEdit::Kind(ContentKind::Url)), t0);
        session.flush();
        assert_eq!(session.content(), Content::url("https://example.com"));
    }

    #[test]
    fn test_two_phase_logo() {
        let design = Design {
            logo: Some("upload-1".into()),
            ..Default::default()
        };
        let mut session =
            Session::with_state(Pipeline::default(), &Content::url("https://example.com"), design);
        assert!(session.rendered().svg().is_some_and(|svg| !svg.contains("<image")));

        session.resolve_logo(LogoImage::new("data:image/png;base64,AAAA"));
        assert!(session.rendered().svg().is_some_and(|svg| svg.contains("<image")));
        assert_eq!(session.generation(), 2);
    }

    #[test]
    fn test_removing_logo_from_design_drops_image() {
        let design = Design {
            logo: Some("upload-1".into()),
            ..Default::default()
        };
        let mut session =
            Session::with_state(Pipeline::default(), &Content::text("hi"), design);
        session.resolve_logo(LogoImage::new("logo.png"));
        session.apply(Edit::Design(Design::default()), Instant::now());
        session.flush();
        assert!(session.logo().is_none());
    }

    #[test]
    fn test_changing_logo_reference_drops_old_image() {
        let design = Design {
            logo: Some("upload-1".into()),
            ..Default::default()
        };
        let mut session =
            Session::with_state(Pipeline::default(), &Content::text("hi"), design.clone());
        assert!(session.resolve_logo(LogoImage::loaded_for("data:old-logo", "upload-1")));

        let swapped = Design {
            logo: Some("upload-2".into()),
            ..design
        };
        session.apply(Edit::Design(swapped), Instant::now());
        session.flush();
        assert!(session.logo().is_none());
        let svg = session.rendered().svg().unwrap();
        assert!(!svg.contains("data:old-logo"));
        assert!(!svg.contains("<image"));

        // A late load for the old reference is refused.
        assert!(!session.resolve_logo(LogoImage::loaded_for("data:old-logo", "upload-1")));
        assert!(session.logo().is_none());

        assert!(session.resolve_logo(LogoImage::loaded_for("data:new-logo", "upload-2")));
        assert!(session.rendered().svg().unwrap().contains("data:new-logo"));
    }

    #[test]
    fn test_unchanged_logo_reference_keeps_image() {
        let design = Design {
            logo: Some("upload-1".into()),
            ..Default::default()
        };
        let mut session =
            Session::with_state(Pipeline::default(), &Content::text("hi"), design.clone());
        session.resolve_logo(LogoImage::new("logo.png"));
        let recolored = Design {
            body_color: "#2563eb".into(),
            ..design
        };
        session.apply(Edit::Design(recolored), Instant::now());
        session.flush();
        assert_eq!(session.logo(), Some(&LogoImage::new("logo.png")));
    }

    #[test]
    fn test_edit_json_shape() {
        let edit: Edit =
            serde_json::from_str(r#"{"content": {"field": "ssid", "value": "Home"}}"#).unwrap();
        assert_eq!(edit, Edit::Content(ContentEdit::Ssid("Home".into())));
        let edit: Edit = serde_json::from_str(r#"{"design": {"bodyShape": "dot"}}"#).unwrap();
        assert!(matches!(edit, Edit::Design(_)));
    }
}
