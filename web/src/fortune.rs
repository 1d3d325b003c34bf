use followtheorder_core::{FortuneError, parse_fortune};
use gloo::net::http::Request;

pub(crate) async fn request_fortune(url: &str) -> Result<String, FortuneError> {
    let response = Request::get(url)
        .send()
        .await
        .map_err(|err| FortuneError::Request(err.to_string()))?;

    if !response.ok() {
        return Err(FortuneError::Status(response.status()));
    }

    let body = response
        .text()
        .await
        .map_err(|err| FortuneError::Request(err.to_string()))?;
    log::trace!("fortune body: {:?}", body);
    parse_fortune(&body)
}
