use std::sync::Arc;

use models::book::ensure_no_client_id;
use models::{Book, BookPayload};
use tracing::{debug, info, instrument};

use crate::books::repository::BookRepository;
use crate::errors::ServiceError;

/// Book use cases: validates requests and delegates storage to the repository.
pub struct BookService<R: BookRepository + ?Sized> {
    repo: Arc<R>,
}

impl<R: BookRepository + ?Sized> Clone for BookService<R> {
    fn clone(&self) -> Self { Self { repo: Arc::clone(&self.repo) } }
}

impl<R: BookRepository + ?Sized> BookService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    pub async fn list(&self) -> Vec<Book> { self.repo.list().await }

    pub async fn get(&self, id: i64) -> Result<Book, ServiceError> {
        let (index, book) = self.repo.locate(id).await?;
        debug!(id, index, "book located");
        Ok(book)
    }

    /// Validate and append. Validation errors win over a duplicate title.
    #[instrument(skip(self, payload), fields(title = %payload.title))]
    pub async fn create(&self, payload: BookPayload) -> Result<Book, ServiceError> {
        payload.validate_new()?;
        let book = self.repo.insert(payload).await?;
        info!(id = book.id, "book_created");
        Ok(book)
    }

    /// Change at most one field, chosen by the payload's priority chain.
    #[instrument(skip(self, payload))]
    pub async fn update(&self, id: i64, payload: BookPayload) -> Result<Book, ServiceError> {
        ensure_no_client_id(payload.id)?;
        let book = self.repo.apply(id, payload.field_update()).await?;
        info!(id, "book_updated");
        Ok(book)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: i64) -> Result<Book, ServiceError> {
        let book = self.repo.remove(id).await?;
        info!(id, "book_deleted");
        Ok(book)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::book_store::BookStore;
    use models::book::{MSG_CLIENT_ID, MSG_MISSING_AUTHOR, MSG_MISSING_QUANTITY, MSG_MISSING_TITLE};

    fn service() -> BookService<BookStore> {
        BookService::new(Arc::new(BookStore::seeded()))
    }

    fn payload(title: &str, author: &str, quantity: i64) -> BookPayload {
        BookPayload { id: 0, title: title.into(), author: author.into(), quantity }
    }

    #[tokio::test]
    async fn create_rejects_each_invalid_field_independently() {
        let svc = service();
        let cases = [
            (BookPayload { id: 9, ..payload("Dune", "Frank Herbert", 1) }, MSG_CLIENT_ID),
            (payload("   ", "Frank Herbert", 1), MSG_MISSING_TITLE),
            (payload("Dune", "", 1), MSG_MISSING_AUTHOR),
            (payload("Dune", "Frank Herbert", 0), MSG_MISSING_QUANTITY),
        ];
        for (p, msg) in cases {
            assert_eq!(svc.create(p).await, Err(ServiceError::invalid(msg)));
        }
        assert_eq!(svc.list().await.len(), 3);
    }

    #[tokio::test]
    async fn validation_is_checked_before_duplicates() {
        let svc = service();
        let err = svc.create(payload("War and Peace", "X", 0)).await.unwrap_err();
        assert_eq!(err, ServiceError::invalid(MSG_MISSING_QUANTITY));
    }

    #[tokio::test]
    async fn created_book_is_retrievable() -> Result<(), anyhow::Error> {
        let svc = service();
        let created = svc.create(payload("Dune", "Frank Herbert", 3)).await?;
        assert_eq!(svc.get(created.id).await?, created);
        Ok(())
    }

    #[tokio::test]
    async fn update_title_leaves_other_fields() -> Result<(), anyhow::Error> {
        let svc = service();
        let before = svc.get(3).await?;
        let after = svc.update(3, payload("War & Peace", "Someone Else", 99)).await?;
        assert_eq!(after.title, "War & Peace");
        assert_eq!(after.author, before.author);
        assert_eq!(after.quantity, before.quantity);
        Ok(())
    }

    #[tokio::test]
    async fn update_author_branch_stores_blank_title() -> Result<(), anyhow::Error> {
        let svc = service();
        let after = svc.update(1, payload(" ", "M. Proust", 99)).await?;
        assert_eq!(after.author, " ");
        assert_eq!(after.title, "In Search of Lost Time");
        assert_eq!(after.quantity, 2);
        Ok(())
    }

    #[tokio::test]
    async fn update_empty_payload_zeroes_quantity() -> Result<(), anyhow::Error> {
        let svc = service();
        let after = svc.update(2, BookPayload::default()).await?;
        assert_eq!(after.quantity, 0);
        let unchanged = svc.update(2, payload("", "", -4)).await?;
        assert_eq!(unchanged.quantity, 0);
        Ok(())
    }

    #[tokio::test]
    async fn update_with_client_id_is_invalid_even_for_missing_book() {
        let svc = service();
        let p = BookPayload { id: 5, ..payload("T", "A", 1) };
        assert_eq!(svc.update(3, p.clone()).await, Err(ServiceError::invalid(MSG_CLIENT_ID)));
        assert_eq!(svc.update(999, p).await, Err(ServiceError::invalid(MSG_CLIENT_ID)));
    }

    #[tokio::test]
    async fn delete_then_get_is_not_found() -> Result<(), anyhow::Error> {
        let svc = service();
        let removed = svc.delete(2).await?;
        assert_eq!(removed.author, "Iezzy");
        assert_eq!(svc.get(2).await, Err(ServiceError::book_not_found()));
        assert_eq!(svc.delete(2).await, Err(ServiceError::book_not_found()));
        Ok(())
    }

    #[tokio::test]
    async fn get_follows_book_after_earlier_delete() -> Result<(), anyhow::Error> {
        let svc = service();
        svc.delete(1).await?;
        assert_eq!(svc.get(3).await?.title, "War and Peace");
        Ok(())
    }

    #[tokio::test]
    async fn works_through_trait_object() -> Result<(), anyhow::Error> {
        let repo: Arc<dyn BookRepository> = Arc::new(BookStore::seeded());
        let svc = BookService::new(repo);
        assert_eq!(svc.list().await.len(), 3);
        svc.create(payload("Dune", "Frank Herbert", 1)).await?;
        assert_eq!(svc.list().await.len(), 4);
        Ok(())
    }
}
