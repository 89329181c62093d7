use filefolio_core::forms::Attachment;
use filefolio_core::{ClientError, ClientResult};
use js_sys::{ArrayBuffer, Uint8Array};
use leptos::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;

/// First file picked in the `<input type="file">` that fired `ev`.
pub fn picked_file(ev: &web_sys::Event) -> Option<web_sys::File> {
    let input: web_sys::HtmlInputElement = event_target(ev);
    input.files().and_then(|files| files.get(0))
}

/// Clear a file input so picking the same file again fires `change`.
pub fn reset_input(ev: &web_sys::Event) {
    let input: web_sys::HtmlInputElement = event_target(ev);
    input.set_value("");
}

/// Read a browser `File` into an upload attachment.
pub async fn read_attachment(file: web_sys::File) -> ClientResult<Attachment> {
    let array_buffer: ArrayBuffer = JsFuture::from(file.array_buffer())
        .await
        .map_err(|e| ClientError::Decode(format!("failed to read {}: {:?}", file.name(), e)))?
        .dyn_into()
        .map_err(|_| ClientError::Decode("file contents are not an ArrayBuffer".into()))?;

    let bytes = Uint8Array::new(&array_buffer).to_vec();
    Ok(Attachment::new(file.name(), file.type_(), bytes))
}
