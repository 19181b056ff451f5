#![forbid(unsafe_code)]

use std::sync::{Mutex, MutexGuard};

use poem_openapi::Object;

// ***************************************************************************
//                                Constants
// ***************************************************************************
// Description assigned to every book created through the add route.
pub const NEW_BOOK_DESCRIPTION: &str = "New book";

// The five entries every store starts with.
const SEED_BOOKS: [(&str, &str); 5] = [
    ("1200", "twelve hundred"),
    ("1300", "thirteen hundred"),
    ("1400", "fourteen hundred"),
    ("1500", "fifteen hundred"),
    ("1600", "sixteen hundred"),
];

// ***************************************************************************
//                                  Book
// ***************************************************************************
/** The sole domain record.  Ids are raw strings taken from request paths
 * and are NOT unique within a store.
 */
#[derive(Object, Debug, Clone, PartialEq, Eq)]
pub struct Book {
    pub id: String,
    pub description: String,
}

impl Book {
    pub fn new(id: &str, description: &str) -> Self {
        Self {
            id: id.to_string(),
            description: description.to_string(),
        }
    }
}

// ***************************************************************************
//                                BookStore
// ***************************************************************************
/** The process-wide book list.  One store is created at startup and handed
 * to each endpoint that reads or appends books; tests create their own
 * independent stores.  The list only grows while the process runs, there
 * is no delete or update path.
 */
#[derive(Debug)]
pub struct BookStore {
    books: Mutex<Vec<Book>>,
}

impl BookStore {
    // ---------------------------------------------------------------------------
    // seeded:
    // ---------------------------------------------------------------------------
    /** Create a store preloaded with the five fixed startup entries. */
    pub fn seeded() -> Self {
        let books = SEED_BOOKS
            .iter()
            .map(|(id, description)| Book::new(id, description))
            .collect();
        Self { books: Mutex::new(books) }
    }

    // ---------------------------------------------------------------------------
    // list:
    // ---------------------------------------------------------------------------
    /** Snapshot of the list in insertion order. */
    pub fn list(&self) -> Vec<Book> {
        self.lock().clone()
    }

    // ---------------------------------------------------------------------------
    // append:
    // ---------------------------------------------------------------------------
    /** Append one new book and return the updated list.  The lock is held
     * across both the push and the snapshot so each add is indivisible with
     * respect to concurrent adds and retrieves.  Duplicate ids are allowed.
     */
    pub fn append(&self, id: &str) -> Vec<Book> {
        let mut books = self.lock();
        books.push(Book::new(id, NEW_BOOK_DESCRIPTION));
        books.clone()
    }

    // ---------------------------------------------------------------------------
    // lock:
    // ---------------------------------------------------------------------------
    fn lock(&self) -> MutexGuard<'_, Vec<Book>> {
        // A panicked handler must not wedge the list for later requests.
        self.books.lock().unwrap_or_else(|e| e.into_inner())
    }
}

// ***************************************************************************
//                                  Tests
// ***************************************************************************
#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::thread;

    use super::*;

    #[test]
    fn seeded_store_has_five_books_in_order() {
        let store = BookStore::seeded();
        let books = store.list();
        assert_eq!(books.len(), 5);
        assert_eq!(books[0], Book::new("1200", "twelve hundred"));
        assert_eq!(books[4], Book::new("1600", "sixteen hundred"));
    }

    #[test]
    fn append_returns_grown_list_with_fixed_description() {
        let store = BookStore::seeded();
        let books = store.append("9999");
        assert_eq!(books.len(), 6);
        assert_eq!(*books.last().unwrap(), Book::new("9999", NEW_BOOK_DESCRIPTION));
    }

    #[test]
    fn duplicate_ids_are_not_deduplicated() {
        let store = BookStore::seeded();
        store.append("100");
        let books = store.append("100");
        assert_eq!(books.len(), 7);
        assert_eq!(books[5].id, "100");
        assert_eq!(books[6].id, "100");
    }

    #[test]
    fn concurrent_appends_lose_no_updates() {
        const NUM_THREADS: usize = 16;
        const ADDS_PER_THREAD: usize = 25;

        let store = Arc::new(BookStore::seeded());
        let mut handles = Vec::with_capacity(NUM_THREADS);
        for t in 0..NUM_THREADS {
            let store = store.clone();
            handles.push(thread::spawn(move || {
                for i in 0..ADDS_PER_THREAD {
                    store.append(&format!("{}-{}", t, i));
                }
            }));
        }
        for handle in handles {
            handle.join().expect("appender thread panicked");
        }

        assert_eq!(store.list().len(), 5 + NUM_THREADS * ADDS_PER_THREAD);
    }
}
