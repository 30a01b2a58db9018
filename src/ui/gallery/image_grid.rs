//! Draggable image grid
//!
//! Every tile is both a drag source and a drop target. Hovering only
//! highlights the tile under the pointer; one [`Reorder`] is reported when
//! the gesture ends with a drop on another tile.

use leptos::prelude::*;
use leptos::web_sys;

use crate::core::gallery::ImageRef;
use crate::core::reorder::{DragGesture, Reorder};

#[component]
pub fn ImageGrid(
    #[prop(into)]
    images: Signal<Vec<ImageRef>>,
    on_reorder: Callback<Reorder>,
) -> impl IntoView {
    let gesture = RwSignal::new(DragGesture::default());

    view! {
        <div class="image-grid">
            {move || {
                images
                    .get()
                    .into_iter()
                    .enumerate()
                    .map(|(index, image)| view! {
                        <ImageTile index=index image=image gesture=gesture on_reorder=on_reorder />
                    })
                    .collect_view()
            }}
        </div>
    }
}

#[component]
fn ImageTile(
    index: usize,
    image: ImageRef,
    gesture: RwSignal<DragGesture>,
    on_reorder: Callback<Reorder>,
) -> impl IntoView {
    view! {
        <figure
            class="image-tile"
            class:dragging=move || gesture.with(|g| g.source() == Some(index))
            class:drop-target=move || gesture.with(|g| g.target() == Some(index))
            draggable="true"
            on:dragstart=move |ev: web_sys::DragEvent| {
                #[cfg(not(feature = "ssr"))]
                {
                    // Firefox only starts a drag when data is set
                    if let Some(data) = ev.data_transfer() {
                        data.set_effect_allowed("move");
                        let _ = data.set_data("text/plain", &index.to_string());
                    }
                }
                #[cfg(feature = "ssr")]
                {
                    let _ = ev;
                }
                gesture.update(|g| g.start(index));
            }
            on:dragenter=move |ev: web_sys::DragEvent| {
                ev.prevent_default();
                gesture.maybe_update(|g| g.hover(index));
            }
            on:dragover=move |ev: web_sys::DragEvent| {
                ev.prevent_default();
                // Re-marks the tile if a leave fired while still over it
                gesture.maybe_update(|g| g.hover(index));
            }
            on:dragleave=move |ev: web_sys::DragEvent| {
                #[cfg(not(feature = "ssr"))]
                {
                    use leptos::wasm_bindgen::JsCast;

                    // Moving onto a child of the tile is not leaving it
                    let tile = ev.current_target().and_then(|t| t.dyn_into::<web_sys::Node>().ok());
                    let next = ev.related_target().and_then(|t| t.dyn_into::<web_sys::Node>().ok());
                    if let (Some(tile), Some(next)) = (tile, next)
                        && tile.contains(Some(&next))
                    {
                        return;
                    }
                }
                #[cfg(feature = "ssr")]
                {
                    let _ = ev;
                }
                gesture.maybe_update(|g| {
                    let before = g.target();
                    g.leave(index);
                    before != g.target()
                });
            }
            on:drop=move |ev: web_sys::DragEvent| {
                ev.prevent_default();
                if let Some(reorder) = gesture.try_update(|g| g.drop_on(index)).flatten() {
                    on_reorder.run(reorder);
                }
            }
            on:dragend=move |_| {
                gesture.maybe_update(|g| {
                    let active = g.source().is_some();
                    g.cancel();
                    active
                });
            }
        >
            <img src=image.as_str().to_owned() alt=format!("img-{}", index) draggable="false" />
        </figure>
    }
}
