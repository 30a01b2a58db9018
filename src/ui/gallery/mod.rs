//! Gallery widgets and order persistence

mod image_grid;
mod order_status;
mod reset_password_modal;
mod upload_button;

pub use image_grid::ImageGrid;
pub use order_status::OrderStatus;
pub use reset_password_modal::ResetPasswordModal;
pub use upload_button::UploadButton;

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::core::api::{ORDER_SAVE_FAILED_MESSAGE, UpdateOrderRequest};
use crate::core::gallery::{Gallery, OrderUpdate};
use crate::ui::api_client;

/// Send `update` to the server and feed the answer back into `gallery`.
///
/// Either answer may release a newer order that piled up meanwhile;
/// that one is sent next.
pub fn persist_order(gallery: RwSignal<Gallery>, update: OrderUpdate) {
    spawn_local(async move {
        let id = update.id;
        let request = UpdateOrderRequest {
            images: update.images,
        };

        match api_client::update_image_order(&request).await {
            Ok(()) => {
                if let Some(next) = gallery.try_update(|g| g.acknowledge(id)).flatten() {
                    persist_order(gallery, next);
                }
            }
            Err(e) => {
                leptos::logging::error!("Error updating image order: {}", e);
                let message = e.user_message(ORDER_SAVE_FAILED_MESSAGE);
                if let Some(next) = gallery.try_update(|g| g.reject(id, message)).flatten() {
                    persist_order(gallery, next);
                }
            }
        }
    });
}
