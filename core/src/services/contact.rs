use tracing::info;

use super::message_or;
use crate::api::Backend;
use crate::error::ClientResult;
use crate::forms::ContactForm;

pub async fn send<B: Backend>(backend: &B, form: &ContactForm) -> ClientResult<String> {
    form.validate().into_result()?;
    let response = backend.send_contact(&form.to_request()).await?;
    info!("Contact message sent");
    Ok(message_or(response, "Thanks for reaching out! We'll get back to you soon."))
}
