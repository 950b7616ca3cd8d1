//! One-shot loading gate for the site manifest.
//!
//! The manifest is requested at startup; the scene is spawned only after it
//! resolves. Until then a placeholder is shown.

/// Manifest request, load-state polling and the Ready/Failed transition.
pub mod manifest_loader;

/// Placeholder text shown while loading and replaced on failure.
pub mod placeholder;
