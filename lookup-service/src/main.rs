#![allow(clippy::no_effect_underscore_binding)]
use rocket::{response::content::RawCss, Build, Rocket, State};
use shared::data::{LookupSuccess, ServiceInfo};

use config::LookupConfig;
use error::Error;
use fairing::LookupFairing;
use lookup::Lookup;
use response::PrettyJson;
use templates::{PageRenderer, TemplateFairing, Webpage};

mod config;
mod error;
mod extract;
mod fairing;
mod lookup;
mod response;
mod templates;

#[macro_use]
extern crate rocket;

#[get("/")]
fn index(config: &State<LookupConfig>) -> PrettyJson<ServiceInfo> {
    PrettyJson::ok(ServiceInfo::new(&config.developer))
}

#[get("/lookup?<rc>&<key>")]
async fn lookup_vehicle(
    rc: Option<&str>,
    key: Option<&str>,
    lookup: &State<Lookup>,
    config: &State<LookupConfig>,
) -> Result<PrettyJson<LookupSuccess>, Error> {
    let rc = rc
        .map(str::trim)
        .filter(|rc| !rc.is_empty())
        .ok_or(Error::MissingParameter)?;

    // Keys are handed out through the pricing panel but never checked here.
    if key.is_none() {
        debug!("Lookup for {rc} without an access key.");
    }

    let record = lookup.lookup(rc).await?;
    Ok(PrettyJson::ok(LookupSuccess::new(record, &config.developer)))
}

#[get("/client")]
async fn client_page(
    config: &State<LookupConfig>,
    mut renderer: PageRenderer<'_>,
) -> Result<Webpage, Error> {
    renderer.client(config).await
}

#[get("/style.css")]
async fn get_style(renderer: PageRenderer<'_>) -> RawCss<String> {
    renderer.style().await
}

fn mount(rocket: Rocket<Build>) -> Rocket<Build> {
    rocket
        .attach(TemplateFairing::fairing())
        .mount("/", routes![index, lookup_vehicle, client_page, get_style])
}

#[launch]
fn rocket() -> _ {
    mount(rocket::build().attach(LookupFairing::fairing()))
}

#[cfg(test)]
mod tests {
    use rocket::{
        http::{ContentType, Status},
        local::asynchronous::Client,
    };
    use serde_json::Value;
    use shared::data::{FIELDS, NOT_AVAILABLE};

    use super::*;
    use crate::lookup::{
        tests::{StubSource, OWNER_PAGE},
        LOOKUP_FAILED,
    };

    async fn client_with(source: StubSource) -> Client {
        let rocket = mount(
            rocket::build()
                .manage(Lookup::new(source))
                .manage(LookupConfig::default()),
        );
        Client::tracked(rocket).await.unwrap()
    }

    #[rocket::async_test]
    async fn index_describes_usage() {
        let client = client_with(StubSource::failing()).await;
        let response = client.get("/").dispatch().await;

        assert_eq!(response.status(), Status::Ok);
        assert_eq!(response.content_type(), Some(ContentType::JSON));
        let body: Value = response.into_json().await.unwrap();
        assert_eq!(body["usage"], "/lookup?rc=UP32XX1234");
        assert_eq!(body["developer"], "@AKASHHACKER");
        assert!(body["message"].is_string());
    }

    #[rocket::async_test]
    async fn lookup_without_rc_is_rejected() {
        let source = StubSource::serving(OWNER_PAGE);
        let requested = source.requested.clone();
        let client = client_with(source).await;

        for uri in ["/lookup", "/lookup?rc=", "/lookup?rc=%20%20", "/lookup?key=abc"] {
            let response = client.get(uri).dispatch().await;
            assert_eq!(response.status(), Status::BadRequest, "{uri}");
            let body: Value = response.into_json().await.unwrap();
            assert_eq!(body["error"], "Please provide ?rc= parameter");
            assert_eq!(body["developer"], "@AKASHHACKER");
        }
        assert!(requested.lock().unwrap().is_empty());
    }

    #[rocket::async_test]
    async fn lookup_returns_every_field() {
        let source = StubSource::serving(OWNER_PAGE);
        let requested = source.requested.clone();
        let client = client_with(source).await;

        let response = client
            .get("/lookup?rc=%20up32xx1234%20&key=FREE_TRY")
            .dispatch()
            .await;
        assert_eq!(response.status(), Status::Ok);

        let body: Value = response.into_json().await.unwrap();
        let object = body.as_object().unwrap();
        assert_eq!(object.len(), FIELDS.len() + 2);
        assert_eq!(object["status"], "success");
        assert_eq!(object["copyright"], "@AKASHHACKER");
        assert_eq!(object["Owner Name"], "JOHN DOE");
        assert_eq!(object["Fuel Type"], "PETROL");
        for field in FIELDS {
            assert!(object[field].is_string(), "{field} missing");
        }
        assert_eq!(object["Insurance Upto"], NOT_AVAILABLE);
        assert_eq!(*requested.lock().unwrap(), vec!["UP32XX1234".to_string()]);
    }

    #[rocket::async_test]
    async fn responses_are_pretty_printed() {
        let client = client_with(StubSource::serving(OWNER_PAGE)).await;
        let body = client
            .get("/lookup?rc=UP32XX1234")
            .dispatch()
            .await
            .into_string()
            .await
            .unwrap();
        assert!(body.starts_with("{\n  \"status\": \"success\",\n  \"Owner Name\""));
    }

    #[rocket::async_test]
    async fn failures_share_one_message() {
        let pages = [
            StubSource::failing(),
            StubSource::serving("<html><body>No record</body></html>"),
            StubSource::serving(""),
        ];
        for source in pages {
            let client = client_with(source).await;
            let response = client.get("/lookup?rc=UP32XX1234").dispatch().await;
            assert_eq!(response.status(), Status::NotFound);

            let body: Value = response.into_json().await.unwrap();
            assert_eq!(body["status"], "error");
            assert_eq!(body["message"], LOOKUP_FAILED);
            assert_eq!(body["developer"], "@AKASHHACKER");
        }
    }

    #[rocket::async_test]
    async fn client_page_and_style_are_served() {
        let client = client_with(StubSource::failing()).await;

        let page = client.get("/client").dispatch().await;
        assert_eq!(page.status(), Status::Ok);
        assert_eq!(page.content_type(), Some(ContentType::HTML));
        let html = page.into_string().await.unwrap();
        assert!(html.contains("/lookup?"));
        assert!(html.contains("30 Days Access"));

        let style = client.get("/style.css").dispatch().await;
        assert_eq!(style.status(), Status::Ok);
        assert_eq!(style.content_type(), Some(ContentType::CSS));
    }
}
