//! WireGuard client installer scripts from a RouterOS peer export.
//!
//! A RouterOS `/export` (usually `wg.rsc`) lists WireGuard peers with their
//! client-side settings. Together with a known-good client config used as a
//! template (usually `wg.conf`), each complete peer becomes one Windows script
//! that writes the client config and installs it as a tunnel service.
//!
//! # Architecture
//!
//! - [`template`] — Shared constants from the template config
//! - [`peer`] — Complete client peers from the export, with rejection reasons
//! - [`reconcile`] — Merge peer and template values, derive `AllowedIPs`
//! - [`script`] — Render the installer script
//! - [`plan`] — Run the whole pipeline over in-memory text
//! - [`settings`] — TOML settings with embedded defaults
//! - [`report`] — Terminal output
//!
//! Export tokenizing lives in `rsc-core`, which knows nothing about WireGuard.
//!
//! # Examples
//!
//! ```ignore
//! use wg_rsc_convert::plan::build;
//! use wg_rsc_convert::settings::default_settings;
//!
//! let plan = build(&template_text, &export_text, &default_settings())?;
//! for job in &plan.jobs {
//!     std::fs::write(&job.file_name, &job.contents)?;
//! }
//! ```

pub mod peer;
pub mod plan;
pub mod reconcile;
pub mod report;
pub mod script;
pub mod settings;
pub mod template;
