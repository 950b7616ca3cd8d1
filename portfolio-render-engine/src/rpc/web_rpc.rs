use bevy::diagnostic::DiagnosticsStore;
use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::engine::core::app_state::AppState;
use crate::engine::input::scroll::{ScrollControls, ScrollToSection, SectionChanged};
use crate::engine::scene::sections::SECTION_NAMES;
use crate::engine::systems::fps_tracking::smoothed_fps;
use crate::overlay::contact_form::ContactSubmitted;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsValue;

#[cfg(target_arch = "wasm32")]
use web_sys::{MessageEvent, window};

/// JSON-RPC 2.0 request structure.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcRequest {
    pub jsonrpc: String,
    pub method: String,
    #[serde(default)]
    pub params: serde_json::Value,
    pub id: Option<serde_json::Value>,
}

/// JSON-RPC 2.0 response structure.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcResponse {
    pub jsonrpc: String,
    pub result: Option<serde_json::Value>,
    pub error: Option<RpcError>,
    pub id: Option<serde_json::Value>,
}

/// JSON-RPC 2.0 notification structure for one-way communication.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcNotification {
    pub jsonrpc: String,
    pub method: String,
    pub params: serde_json::Value,
}

/// JSON-RPC 2.0 error object.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RpcError {
    pub code: i32,
    pub message: String,
    pub data: Option<serde_json::Value>,
}

/// Resource queueing outgoing messages to the host page until the end of
/// the frame.
#[derive(Resource, Default)]
pub struct WebRpcInterface {
    outgoing_notifications: Vec<RpcNotification>,
    outgoing_responses: Vec<RpcResponse>,
}

impl WebRpcInterface {
    /// Send notification to the host page without expecting response.
    pub fn send_notification(&mut self, method: &str, params: serde_json::Value) {
        self.outgoing_notifications.push(RpcNotification {
            jsonrpc: "2.0".to_string(),
            method: method.to_string(),
            params,
        });
    }

    fn queue_response(&mut self, response: RpcResponse) {
        self.outgoing_responses.push(response);
    }

    /// Notifications waiting to be sent, oldest first.
    pub fn pending_notifications(&self) -> &[RpcNotification] {
        &self.outgoing_notifications
    }
}

/// Plugin establishing the WebRPC communication layer with the host page.
pub struct WebRpcPlugin;

impl Plugin for WebRpcPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<WebRpcInterface>()
            .add_event::<IncomingRpcMessage>()
            .add_event::<ScrollToSection>()
            .add_event::<SectionChanged>()
            .add_event::<ContactSubmitted>()
            .add_systems(
                Update,
                (
                    process_incoming_messages,
                    handle_rpc_messages,
                    notify_section_changed,
                    notify_contact_submitted,
                    send_outgoing_messages,
                )
                    .chain(),
            );

        #[cfg(target_arch = "wasm32")]
        app.add_systems(Startup, setup_message_listener);
    }
}

#[cfg(target_arch = "wasm32")]
fn setup_message_listener(mut commands: Commands) {
    use std::sync::Arc;
    use std::sync::Mutex;

    let message_queue: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
    let queue_clone = message_queue.clone();

    let closure = Closure::wrap(Box::new(move |event: MessageEvent| {
        // Only string payloads can carry JSON-RPC.
        if let Ok(data) = event.data().dyn_into::<js_sys::JsString>() {
            let message_str: String = data.into();

            if message_str.contains("jsonrpc") {
                if let Ok(mut queue) = queue_clone.lock() {
                    queue.push(message_str);
                }
            }
        }
    }) as Box<dyn FnMut(MessageEvent)>);

    if let Some(window) = window() {
        if let Err(e) =
            window.add_event_listener_with_callback("message", closure.as_ref().unchecked_ref())
        {
            error!("Failed to register message listener: {:?}", e);
        }
    }

    // Ownership passes to JS; the listener lives as long as the page.
    closure.forget();
    commands.insert_resource(MessageQueue(message_queue));
}

/// Resource wrapping thread-safe message queue for WASM event handling.
#[derive(Resource)]
struct MessageQueue(std::sync::Arc<std::sync::Mutex<Vec<String>>>);

/// Event representing incoming RPC message from the host page.
#[derive(Event)]
struct IncomingRpcMessage {
    content: String,
}

/// Read-only snapshot of the state requests can query.
#[derive(Debug, Clone, Copy)]
pub struct RpcContext {
    pub fps: f32,
    pub offset: f32,
    pub target_offset: f32,
    pub section: usize,
    pub pages: usize,
    /// Scroll requests are only serviced once the scene is running.
    pub ready: bool,
}

fn process_incoming_messages(
    message_queue: Option<Res<MessageQueue>>,
    mut message_events: EventWriter<IncomingRpcMessage>,
) {
    let Some(queue_res) = message_queue else {
        return;
    };

    let messages = if let Ok(mut queue) = queue_res.0.lock() {
        std::mem::take(&mut *queue)
    } else {
        Vec::new()
    };

    for message_str in messages {
        message_events.write(IncomingRpcMessage {
            content: message_str,
        });
    }
}

fn handle_rpc_messages(
    mut events: EventReader<IncomingRpcMessage>,
    diagnostics: Res<DiagnosticsStore>,
    scroll: Res<ScrollControls>,
    app_state: Res<State<AppState>>,
    mut rpc_interface: ResMut<WebRpcInterface>,
    mut section_requests: EventWriter<ScrollToSection>,
) {
    let context = RpcContext {
        fps: smoothed_fps(&diagnostics),
        offset: scroll.offset(),
        target_offset: scroll.target_offset(),
        section: scroll.section(),
        pages: scroll.pages,
        ready: *app_state.get() == AppState::Ready,
    };

    for event in events.read() {
        match serde_json::from_str::<RpcRequest>(&event.content) {
            Ok(request) => {
                debug!("Processing RPC method: {}", request.method);
                let mut requested = Vec::new();
                if let Some(response) = handle_rpc_request(&request, &context, &mut requested) {
                    rpc_interface.queue_response(response);
                }
                section_requests.write_batch(requested);
            }
            Err(parse_error) => {
                warn!("Ignoring malformed RPC message: {}", parse_error);
            }
        }
    }
}

/// Handle one request. Side effects are applied whether or not the request
/// has an ID; only requests with an ID get a response.
pub fn handle_rpc_request(
    request: &RpcRequest,
    context: &RpcContext,
    section_requests: &mut Vec<ScrollToSection>,
) -> Option<RpcResponse> {
    let result = match request.method.as_str() {
        "get_scroll_state" => Ok(handle_get_scroll_state(context)),
        "scroll_to_section" => handle_scroll_to_section(&request.params, context, section_requests),
        "get_fps" => Ok(serde_json::json!({ "fps": context.fps })),
        _ => {
            warn!("Unknown RPC method: {}", request.method);
            return Some(create_error_response(
                request.id.clone()?,
                -32601,
                "Method not found",
                Some(serde_json::json!({"method": request.method})),
            ));
        }
    };

    let id = request.id.clone()?;
    match result {
        Ok(result_value) => Some(RpcResponse {
            jsonrpc: "2.0".to_string(),
            result: Some(result_value),
            error: None,
            id: Some(id),
        }),
        Err(error) => Some(RpcResponse {
            jsonrpc: "2.0".to_string(),
            result: None,
            error: Some(error),
            id: Some(id),
        }),
    }
}

fn handle_get_scroll_state(context: &RpcContext) -> serde_json::Value {
    serde_json::json!({
        "offset": context.offset,
        "target_offset": context.target_offset,
        "section": context.section,
        "section_name": section_name(context.section),
        "pages": context.pages,
    })
}

fn handle_scroll_to_section(
    params: &serde_json::Value,
    context: &RpcContext,
    section_requests: &mut Vec<ScrollToSection>,
) -> Result<serde_json::Value, RpcError> {
    #[derive(Deserialize)]
    struct ScrollParams {
        section: usize,
    }

    let parsed = serde_json::from_value::<ScrollParams>(params.clone())
        .map_err(|_| RpcError::invalid_params("Expected 'section' parameter"))?;

    if !context.ready {
        return Err(RpcError::not_ready());
    }

    if parsed.section >= context.pages {
        return Err(RpcError::invalid_params(&format!(
            "Section {} out of range (0..{})",
            parsed.section, context.pages
        )));
    }

    section_requests.push(ScrollToSection(parsed.section));
    info!("Scroll to section {} requested over RPC", parsed.section);

    Ok(serde_json::json!({
        "success": true,
        "section": parsed.section
    }))
}

fn section_name(section: usize) -> Option<&'static str> {
    SECTION_NAMES.get(section).copied()
}

/// Create standardized error response with optional data payload.
fn create_error_response(
    id: serde_json::Value,
    code: i32,
    message: &str,
    data: Option<serde_json::Value>,
) -> RpcResponse {
    RpcResponse {
        jsonrpc: "2.0".to_string(),
        result: None,
        error: Some(RpcError {
            code,
            message: message.to_string(),
            data,
        }),
        id: Some(id),
    }
}

fn notify_section_changed(
    mut events: EventReader<SectionChanged>,
    mut rpc_interface: ResMut<WebRpcInterface>,
) {
    for event in events.read() {
        info!("Section changed to {}", event.section);
        rpc_interface.send_notification(
            "section_changed",
            serde_json::json!({
                "section": event.section,
                "name": section_name(event.section),
            }),
        );
    }
}

fn notify_contact_submitted(
    mut events: EventReader<ContactSubmitted>,
    mut rpc_interface: ResMut<WebRpcInterface>,
) {
    for event in events.read() {
        rpc_interface.send_notification(
            "contact_submitted",
            serde_json::json!({
                "name": event.name,
                "message": event.message,
            }),
        );
    }
}

/// Send queued notifications and responses to the host page.
fn send_outgoing_messages(mut rpc_interface: ResMut<WebRpcInterface>) {
    for notification in rpc_interface.outgoing_notifications.drain(..) {
        send_message_to_parent(&notification);
    }

    for response in rpc_interface.outgoing_responses.drain(..) {
        send_message_to_parent(&response);
    }
}

/// Send serialized message to the parent window.
fn send_message_to_parent<T: Serialize>(message: &T) {
    #[cfg(target_arch = "wasm32")]
    {
        match serde_json::to_string(message) {
            Ok(json) => {
                if let Some(window) = window() {
                    if let Some(parent) = window.parent().ok().flatten() {
                        if let Err(e) = parent.post_message(&JsValue::from_str(&json), "*") {
                            error!("Failed to send message to parent: {:?}", e);
                        }
                    } else {
                        warn!("No parent window available for message transmission");
                    }
                } else {
                    error!("Window object not available");
                }
            }
            Err(e) => {
                error!("Failed to serialize message: {}", e);
            }
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = message;
    }
}

impl RpcError {
    pub fn invalid_params(message: &str) -> Self {
        Self {
            code: -32602,
            message: message.to_string(),
            data: None,
        }
    }

    /// Server-defined error for requests that need the loaded scene.
    pub fn not_ready() -> Self {
        Self {
            code: -32002,
            message: "Scene not ready".to_string(),
            data: None,
        }
    }
}
