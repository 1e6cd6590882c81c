use utoipa::OpenApi;

use crate::routes::{contact, health, messages};

#[derive(OpenApi)]
#[openapi(info(
    title = "portfolio-server",
    description = "Contact API backing a personal portfolio site",
    version = "0.1.0"
))]
pub struct ApiDoc;

pub fn get_docs() -> utoipa::openapi::OpenApi {
    let mut root = ApiDoc::openapi();
    root.merge(health::HealthApi::openapi());
    root.merge(contact::ContactApi::openapi());
    root.merge(messages::MessagesApi::openapi());
    root
}
