//! Template filling: replace `{{key}}` placeholders in a presentation.
//!
//! For every text frame that contains at least one placeholder:
//!
//! 1. the formatting of the frame's first run is captured ([`FontStyle`]),
//! 2. the frame's text is rewritten with the supplied values ([`rewrite`]),
//! 3. the frame is replaced by a single run holding the new text, with the
//!    captured formatting applied to it.
//!
//! Problems that do not stop the update, such as a color that cannot be
//! reapplied, go to a [`DiagnosticSink`]. The default sink logs them with
//! `tracing`.
//!
//! # Example
//!
//! ```rust,no_run
//! use deckfill::template::{CollectingSink, Replacements, TemplateUpdater};
//!
//! let values: Replacements = [("theme", "School"), ("description", "Lorem ipsum")]
//!     .into_iter()
//!     .collect();
//!
//! let mut updater = TemplateUpdater::with_sink("template.pptx", "out.pptx", CollectingSink::new())?;
//! updater.update_template(&values)?;
//! for diagnostic in updater.sink().diagnostics() {
//!     eprintln!("{}", diagnostic);
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod diagnostics;
pub mod error;
pub mod placeholder;
pub mod style;
pub mod updater;

pub use diagnostics::{CollectingSink, Diagnostic, DiagnosticSink, TracingSink};
pub use error::{ColorApplyError, Result, TemplateError};
pub use placeholder::{Replacements, find_placeholders, rewrite};
pub use style::{CapturedColor, FontStyle};
pub use updater::TemplateUpdater;
