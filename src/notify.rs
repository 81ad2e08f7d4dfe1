//! Text rendering for engine events.
//!
//! The engine emits structured [`EngineEvent`]s; this module turns them
//! into the human-readable lines a front end delivers to the order's
//! owner. Keeping the phrasing here means the engine never formats
//! messages and a different front end can render the same events its own
//! way.

use crate::{CancelReason, EngineEvent};

/// Render one event as the line shown to the affected trader. Use
/// [`EngineEvent::account`] to find out who that is.
pub fn render(event: &EngineEvent) -> String {
    match event {
        EngineEvent::Rejected { error, .. } => error.to_string(),
        EngineEvent::Submitted { order } => {
            format!("Your {}: `{}` is submitted.", order.type_label, order.info)
        }
        EngineEvent::Filled { order } => {
            format!("Your {}: `{}` is filled.", order.type_label, order.info)
        }
        EngineEvent::Triggered { order } => {
            format!("Your {}: `{}` is triggered.", order.type_label, order.info)
        }
        EngineEvent::Cancelled { order, reason } => match reason {
            CancelReason::Unfulfillable => format!(
                "Your {}: `{}` is cancelled because it cannot be fulfilled.",
                order.type_label, order.info
            ),
            CancelReason::ViolatesPositionLimits => format!(
                "Your {}: `{}` is cancelled because it violates your position limits.",
                order.type_label, order.info
            ),
            CancelReason::Other => {
                format!("Your {}: `{}` is cancelled.", order.type_label, order.info)
            }
        },
    }
}
