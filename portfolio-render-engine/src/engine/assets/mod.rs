//! Site manifest asset: scene tuning and overlay copy loaded from JSON.

/// Manifest schema with per-field defaults and validation.
pub mod site_manifest;
