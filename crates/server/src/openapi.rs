use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct BookDoc {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub quantity: i64,
}

/// Create/update body. `id` must be omitted or zero.
#[derive(ToSchema)]
pub struct BookPayloadDoc {
    pub id: Option<i64>,
    pub title: Option<String>,
    pub author: Option<String>,
    pub quantity: Option<i64>,
}

#[derive(ToSchema)]
pub struct DeleteDoc {
    pub deleted: bool,
    pub book: BookDoc,
}

#[derive(ToSchema)]
pub struct ErrorDoc { pub error: String }

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::books::list_books,
        crate::routes::books::get_book,
        crate::routes::books::create_book,
        crate::routes::books::update_book,
        crate::routes::books::delete_book,
    ),
    components(
        schemas(
            HealthResponse,
            BookDoc,
            BookPayloadDoc,
            DeleteDoc,
            ErrorDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "books")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_book_routes() {
        let doc = serde_json::to_value(ApiDoc::openapi()).expect("serialize openapi");
        let paths = doc["paths"].as_object().expect("paths object");
        assert!(paths.contains_key("/books"));
        assert!(paths.contains_key("/books/{id}"));
        assert!(paths.contains_key("/health"));
        assert!(doc["paths"]["/books/{id}"]["delete"].is_object());
    }
}
