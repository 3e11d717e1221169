// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! In-memory catalog store.
//!
//! Holds the books and authors behind the REST API. Identifiers are
//! assigned sequentially starting at 1, so 0 is never a valid id and is
//! rejected before any lookup. Every book references an existing author;
//! the store enforces that on create and update, and refuses to delete
//! an author that still has books.

use std::collections::HashMap;

use crate::error::ApiError;
use crate::models::{
    Author, Book, CreateAuthorRequest, CreateBookRequest, UpdateAuthorRequest, UpdateBookRequest,
};

pub struct CatalogStore {
    books: HashMap<u32, Book>,
    authors: HashMap<u32, Author>,
    next_book_id: u32,
    next_author_id: u32,
}

impl Default for CatalogStore {
    fn default() -> Self {
        Self {
            books: HashMap::new(),
            authors: HashMap::new(),
            next_book_id: 1,
            next_author_id: 1,
        }
    }
}

impl CatalogStore {
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Books
    // =========================================================================

    pub fn list_books(&self) -> Vec<Book> {
        let mut books: Vec<Book> = self.books.values().cloned().collect();
        books.sort_by_key(|book| book.id);
        books
    }

    pub fn get_book(&self, book_id: u32) -> Result<Book, ApiError> {
        self.books
            .get(&book_id)
            .cloned()
            .ok_or_else(|| ApiError::not_found("Book not found"))
    }

    pub fn create_book(&mut self, request: CreateBookRequest) -> Result<Book, ApiError> {
        validate_author_reference(&self.authors, request.author_id)?;

        let id = self.next_book_id;
        self.next_book_id += 1;

        let book = Book {
            id,
            title: request.title,
            year: request.year,
            isbn: request.isbn,
            summary: request.summary,
            image: request.image,
            price: request.price,
            author_id: request.author_id,
        };
        self.books.insert(id, book.clone());
        Ok(book)
    }

    pub fn update_book(&mut self, book_id: u32, request: UpdateBookRequest) -> Result<(), ApiError> {
        validate_update_ids(book_id, request.id)?;
        validate_author_reference(&self.authors, request.author_id)?;

        let Some(book) = self.books.get_mut(&book_id) else {
            return Err(ApiError::not_found("Book not found"));
        };

        book.title = request.title;
        book.year = request.year;
        book.isbn = request.isbn;
        book.summary = request.summary;
        book.image = request.image;
        book.price = request.price;
        book.author_id = request.author_id;

        Ok(())
    }

    pub fn delete_book(&mut self, book_id: u32) -> Result<(), ApiError> {
        validate_id(book_id)?;

        if self.books.remove(&book_id).is_some() {
            Ok(())
        } else {
            Err(ApiError::not_found("Book not found"))
        }
    }

    // =========================================================================
    // Authors
    // =========================================================================

    pub fn list_authors(&self) -> Vec<Author> {
        let mut authors: Vec<Author> = self.authors.values().cloned().collect();
        authors.sort_by_key(|author| author.id);
        authors
    }

    pub fn get_author(&self, author_id: u32) -> Result<Author, ApiError> {
        self.authors
            .get(&author_id)
            .cloned()
            .ok_or_else(|| ApiError::not_found("Author not found"))
    }

    pub fn create_author(&mut self, request: CreateAuthorRequest) -> Author {
        let id = self.next_author_id;
        self.next_author_id += 1;

        let author = Author {
            id,
            firstname: request.firstname,
            lastname: request.lastname,
            bio: request.bio,
        };
        self.authors.insert(id, author.clone());
        author
    }

    pub fn update_author(
        &mut self,
        author_id: u32,
        request: UpdateAuthorRequest,
    ) -> Result<(), ApiError> {
        validate_update_ids(author_id, request.id)?;

        let Some(author) = self.authors.get_mut(&author_id) else {
            return Err(ApiError::not_found("Author not found"));
        };

        author.firstname = request.firstname;
        author.lastname = request.lastname;
        author.bio = request.bio;

        Ok(())
    }

    pub fn delete_author(&mut self, author_id: u32) -> Result<(), ApiError> {
        validate_id(author_id)?;

        if !self.authors.contains_key(&author_id) {
            return Err(ApiError::not_found("Author not found"));
        }

        if self.books.values().any(|book| book.author_id == author_id) {
            return Err(ApiError::unprocessable(
                "Author still has books in the catalog.",
            ));
        }

        self.authors.remove(&author_id);
        Ok(())
    }
}

fn validate_id(id: u32) -> Result<(), ApiError> {
    if id == 0 {
        return Err(ApiError::bad_request("id must be a positive identifier"));
    }
    Ok(())
}

fn validate_update_ids(path_id: u32, body_id: u32) -> Result<(), ApiError> {
    validate_id(path_id)?;

    if path_id != body_id {
        return Err(ApiError::bad_request("path id and body id must match"));
    }

    Ok(())
}

fn validate_author_reference(authors: &HashMap<u32, Author>, author_id: u32) -> Result<(), ApiError> {
    if authors.contains_key(&author_id) {
        Ok(())
    } else {
        Err(ApiError::bad_request(
            "author_id must reference an existing author",
        ))
    }
}
