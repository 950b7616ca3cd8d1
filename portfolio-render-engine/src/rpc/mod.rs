//! JSON-RPC 2.0 bridge to the page hosting the canvas.
//!
//! Implements bidirectional messaging between the Bevy app and its host
//! page via `postMessage`, supporting both request-response and
//! notification patterns.
//!
//! ## Message Flow
//!
//! ```text
//! Host page (parent window)  <──postMessage──>  Bevy (canvas frame)
//!        │                                        │
//!        ├─ Request (with ID) ──────────────────> │
//!        │                                        ├─ Process request
//!        │ <───────────────── Response (with ID) ─┤
//!        │                                        │
//!        │ <────────── Notification (no ID) ─────┤
//! ```
//!
//! Requests without an ID are still acted on; they just get no response.
//!
//! ## Calling From the Host
//!
//! ```typescript
//! frame.contentWindow.postMessage(JSON.stringify({
//!   jsonrpc: "2.0",
//!   method: "scroll_to_section",
//!   params: { section: 3 },
//!   id: 1
//! }), "*");
//! ```
//!
//! ## Error Handling
//!
//! Standard JSON-RPC 2.0 error codes:
//! - `-32601`: Method not found
//! - `-32602`: Invalid params
//!
//! ## Methods
//!
//! - `get_scroll_state`: Damped offset, target offset, current section and page count
//! - `scroll_to_section`: Scroll so the given section is at the top of the viewport
//! - `get_fps`: Retrieve current frame rate
//!
//! ## Notifications
//!
//! - `loading_state`: `loading`, `ready` or `failed`
//! - `section_changed`: Section index and name once the damped offset settles nearer a new one
//! - `contact_submitted`: Contents of the contact form
//! - `fps_update`: Smoothed frame rate, twice a second

/// JSON-RPC 2.0 bidirectional communication system for host page integration.
///
/// Handles request-response patterns, notifications, and WASM message listeners.
pub mod web_rpc;
