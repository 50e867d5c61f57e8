use rocket::{
    http::Status,
    response::{self, Responder},
    Request,
};
use shared::data::{LookupFailure, MissingParameter};
use thiserror::Error;

use crate::{
    config::LookupConfig, lookup::LookupError, response::PrettyJson, templates::TemplateError,
};

#[derive(Debug, Error)]
pub enum Error {
    #[error("Please provide ?rc= parameter")]
    MissingParameter,
    #[error("Vehicle Not Found or Website Down")]
    LookupFailure(#[from] LookupError),
    #[error("An error occured whilst rendering")]
    TeraRendering(#[from] tera::Error),
    #[error("Could not load templates: {0}")]
    Template(#[from] TemplateError),
    #[error("The page renderer was not set up")]
    TemplateNotFound,
}

pub trait ErrorResponder {
    fn response(&self) -> (Status, String);
}

impl ErrorResponder for Error {
    fn response(&self) -> (Status, String) {
        (
            match self {
                Error::MissingParameter => Status::BadRequest,
                Error::LookupFailure(_) => Status::NotFound,
                Error::TeraRendering(_) | Error::Template(_) | Error::TemplateNotFound => {
                    Status::InternalServerError
                }
            },
            self.to_string(),
        )
    }
}

impl<'r> Responder<'r, 'static> for Error {
    fn respond_to(self, request: &'r Request<'_>) -> response::Result<'static> {
        let developer = request
            .rocket()
            .state::<LookupConfig>()
            .map_or_else(|| LookupConfig::default().developer, |c| c.developer.clone());

        match &self {
            Error::LookupFailure(cause) => warn!("Lookup failed: {cause}"),
            Error::MissingParameter => {}
            other => error!("{other}"),
        }

        let (status, message) = self.response();
        if let Error::MissingParameter = self {
            PrettyJson(
                status,
                MissingParameter {
                    error: message,
                    developer,
                },
            )
            .respond_to(request)
        } else {
            PrettyJson(status, LookupFailure::new(&message, &developer)).respond_to(request)
        }
    }
}
