use std::io::Cursor;

use rocket::{
    http::{ContentType, Status},
    response::{self, Responder},
    Request, Response,
};
use serde::Serialize;

/// JSON body indented by two spaces.
pub struct PrettyJson<T>(pub Status, pub T);

impl<T> PrettyJson<T> {
    pub fn ok(value: T) -> Self {
        Self(Status::Ok, value)
    }
}

impl<'r, T: Serialize> Responder<'r, 'static> for PrettyJson<T> {
    fn respond_to(self, _: &'r Request<'_>) -> response::Result<'static> {
        let body = serde_json::to_string_pretty(&self.1).map_err(|e| {
            error!("Failed to serialize response: {e}");
            Status::InternalServerError
        })?;
        Response::build()
            .status(self.0)
            .header(ContentType::JSON)
            .sized_body(body.len(), Cursor::new(body))
            .ok()
    }
}
