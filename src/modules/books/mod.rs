pub mod models;
pub mod routes;
pub mod store;

use async_trait::async_trait;
use axum::Router;
use serde_json::json;
use shelf_kernel::{settings::CatalogSettings, InitCtx, Module};

use store::{BookStore, SharedStore};

/// Books module: the catalog store and its HTTP surface
pub struct BooksModule {
    store: SharedStore,
}

impl BooksModule {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }

    #[cfg(test)]
    pub(crate) fn store(&self) -> SharedStore {
        self.store.clone()
    }
}

#[async_trait]
impl Module for BooksModule {
    fn name(&self) -> &'static str {
        "books"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        let mut store = self.store.write().await;
        if ctx.settings.catalog.seed_example_data && store.is_empty() {
            store.seed(models::example_books());
        }

        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            id_policy = ?store.policy(),
            books = store.len(),
            "books module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        routes::router(self.store.clone())
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        Some(openapi_fragment())
    }

    async fn stop(&self) -> anyhow::Result<()> {
        let store = self.store.read().await;
        tracing::info!(
            module = self.name(),
            books = store.len(),
            "books module stopped; catalog discarded"
        );
        Ok(())
    }
}

/// Create the books module for the given catalog settings
pub fn create_module(settings: &CatalogSettings) -> std::sync::Arc<dyn Module> {
    let store = BookStore::new(settings.id_policy).into_shared();
    std::sync::Arc::new(BooksModule::new(store))
}

fn error_response(description: &str) -> serde_json::Value {
    json!({
        "description": description,
        "content": {
            "application/json": {
                "schema": { "$ref": "#/components/schemas/ErrorResponse" }
            }
        }
    })
}

fn book_list_response(description: &str) -> serde_json::Value {
    json!({
        "description": description,
        "content": {
            "application/json": {
                "schema": {
                    "type": "array",
                    "items": { "$ref": "#/components/schemas/Book" }
                }
            }
        }
    })
}

fn integer_parameter(name: &str, location: &str, minimum: i64, maximum: Option<i64>) -> serde_json::Value {
    let mut schema = json!({ "type": "integer", "minimum": minimum });
    if let Some(maximum) = maximum {
        schema["maximum"] = json!(maximum);
    }
    json!({
        "name": name,
        "in": location,
        "required": true,
        "schema": schema
    })
}

fn openapi_fragment() -> serde_json::Value {
    let book_request_body = json!({
        "required": true,
        "content": {
            "application/json": {
                "schema": { "$ref": "#/components/schemas/BookRequest" }
            }
        }
    });

    json!({
        "paths": {
            "/": {
                "get": {
                    "summary": "List books",
                    "tags": ["Books"],
                    "responses": {
                        "200": book_list_response("All books in stored order")
                    }
                }
            },
            "/{book_id}": {
                "get": {
                    "summary": "Get a book by identification",
                    "tags": ["Books"],
                    "parameters": [integer_parameter("book_id", "path", 1, None)],
                    "responses": {
                        "200": {
                            "description": "The book",
                            "content": {
                                "application/json": {
                                    "schema": { "$ref": "#/components/schemas/Book" }
                                }
                            }
                        },
                        "404": error_response("Book not found"),
                        "422": error_response("Invalid book_id")
                    }
                },
                "delete": {
                    "summary": "Delete a book",
                    "tags": ["Books"],
                    "parameters": [integer_parameter("book_id", "path", 1, None)],
                    "responses": {
                        "204": { "description": "Book deleted" },
                        "404": error_response("Book not found"),
                        "422": error_response("Invalid book_id")
                    }
                }
            },
            "/publish": {
                "get": {
                    "summary": "Filter books by publication year",
                    "tags": ["Books"],
                    "parameters": [integer_parameter("book_published_date", "query", 2000, Some(2030))],
                    "responses": {
                        "200": book_list_response("Books published that year"),
                        "422": error_response("Invalid book_published_date")
                    }
                }
            },
            "/rating": {
                "get": {
                    "summary": "Filter books by rating",
                    "tags": ["Books"],
                    "parameters": [integer_parameter("book_rating", "query", 1, Some(5))],
                    "responses": {
                        "200": book_list_response("Books with that rating"),
                        "422": error_response("Invalid book_rating")
                    }
                }
            },
            "/create-book": {
                "post": {
                    "summary": "Create a book",
                    "tags": ["Books"],
                    "requestBody": book_request_body.clone(),
                    "responses": {
                        "201": { "description": "Book created" },
                        "422": error_response("Validation error")
                    }
                }
            },
            "/update_book": {
                "put": {
                    "summary": "Replace a book",
                    "tags": ["Books"],
                    "requestBody": book_request_body,
                    "responses": {
                        "204": { "description": "Book replaced" },
                        "404": error_response("Book not found"),
                        "422": error_response("Validation error")
                    }
                }
            }
        },
        "components": {
            "schemas": {
                "Book": {
                    "type": "object",
                    "properties": {
                        "identification": { "type": "integer", "minimum": 1 },
                        "title": { "type": "string", "minLength": 3 },
                        "author": { "type": "string", "minLength": 1 },
                        "description": { "type": "string", "minLength": 1, "maxLength": 100 },
                        "rating": { "type": "integer", "minimum": 1, "maximum": 5 },
                        "published_date": { "type": "integer", "minimum": 2000, "maximum": 2030 }
                    },
                    "required": ["identification", "title", "author", "description", "rating", "published_date"]
                },
                "BookRequest": {
                    "type": "object",
                    "properties": {
                        "identification": {
                            "type": "integer",
                            "description": "Ignored on create, required on update"
                        },
                        "title": { "type": "string", "minLength": 3 },
                        "author": { "type": "string", "minLength": 1 },
                        "description": { "type": "string", "minLength": 1, "maxLength": 100 },
                        "rating": { "type": "integer", "minimum": 1, "maximum": 5 },
                        "published_date": { "type": "integer", "minimum": 2000, "maximum": 2030 }
                    },
                    "required": ["title", "author", "description", "rating", "published_date"],
                    "example": {
                        "identification": 1,
                        "title": "Architecture",
                        "author": "Shakil Khan",
                        "description": "Good Books",
                        "rating": 3,
                        "published_date": 2023
                    }
                }
            }
        }
    })
}
