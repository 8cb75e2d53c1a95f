use serde::{Deserialize, Serialize};
use validator::Validate;

/// A catalog record as stored and served.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    /// Identifier assigned by the store, unique among stored books
    pub identification: i64,
    pub title: String,
    pub author: String,
    pub description: String,
    /// 1 to 5
    pub rating: i32,
    /// Publication year, 2000 to 2030
    pub published_date: i32,
}

/// Validated field set for a book that has no identification yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBook {
    pub title: String,
    pub author: String,
    pub description: String,
    pub rating: i32,
    pub published_date: i32,
}

impl NewBook {
    /// Attach the identification chosen by the store.
    pub fn with_id(self, identification: i64) -> Book {
        Book {
            identification,
            title: self.title,
            author: self.author,
            description: self.description,
            rating: self.rating,
            published_date: self.published_date,
        }
    }
}

/// Request body for creating or replacing a book.
///
/// `identification` is ignored on create and required on update.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct BookRequest {
    #[serde(default)]
    pub identification: Option<i64>,
    #[validate(length(min = 3, message = "title must be at least 3 characters"))]
    pub title: String,
    #[validate(length(min = 1, message = "author must not be empty"))]
    pub author: String,
    #[validate(length(
        min = 1,
        max = 100,
        message = "description must be between 1 and 100 characters"
    ))]
    pub description: String,
    #[validate(range(min = 1, max = 5, message = "rating must be between 1 and 5"))]
    pub rating: i32,
    #[validate(range(
        min = 2000,
        max = 2030,
        message = "published_date must be between 2000 and 2030"
    ))]
    pub published_date: i32,
}

impl BookRequest {
    /// Drop the client-supplied identification, if any.
    pub fn into_new_book(self) -> NewBook {
        NewBook {
            title: self.title,
            author: self.author,
            description: self.description,
            rating: self.rating,
            published_date: self.published_date,
        }
    }

    /// The full record this request describes, or `None` without an identification.
    pub fn into_book(self) -> Option<Book> {
        let identification = self.identification?;
        Some(self.into_new_book().with_id(identification))
    }
}

/// `{book_id}` path parameter
#[derive(Debug, Deserialize, Validate)]
pub struct BookIdPath {
    #[validate(range(min = 1, message = "book_id must be greater than 0"))]
    pub book_id: i64,
}

#[derive(Debug, Deserialize, Validate)]
pub struct PublishedDateQuery {
    #[validate(range(
        min = 2000,
        max = 2030,
        message = "book_published_date must be between 2000 and 2030"
    ))]
    pub book_published_date: i32,
}

#[derive(Debug, Deserialize, Validate)]
pub struct RatingQuery {
    #[validate(range(min = 1, max = 5, message = "book_rating must be between 1 and 5"))]
    pub book_rating: i32,
}

/// The catalog a fresh instance starts with.
pub fn example_books() -> Vec<Book> {
    let rows = [
        (1, "Computer Science", "Gazi Al- Amin", "Good Book", 5, 2023),
        (2, "Automobile Engineering", "Gazi Arman", "Authentic Book", 4, 2022),
        (3, "Computer Science", "Gazi Al- Amin", "Nice Book", 5, 2001),
        (4, "Micro Economics", "Mahfuja Mitu", "Real World Economics", 4, 2022),
        (5, "Architecture", "Shakil Khan", "Good Books", 2, 2001),
    ];

    rows.into_iter()
        .map(
            |(identification, title, author, description, rating, published_date)| Book {
                identification,
                title: title.to_string(),
                author: author.to_string(),
                description: description.to_string(),
                rating,
                published_date,
            },
        )
        .collect()
}
