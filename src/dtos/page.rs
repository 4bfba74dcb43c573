//! Paginazione a numero di pagina con envelope `{count, next, previous, results}`

use crate::core::AppError;
use serde::{Deserialize, Serialize};

/// Pagina richiesta, già validata e limitata
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: u32,
    pub page_size: u32,
}

impl Pagination {
    /// `page` parte da 1; `page_size` assente o zero usa il default, oltre il massimo viene limitato
    pub fn resolve(
        page: Option<u32>,
        page_size: Option<u32>,
        default_size: u32,
        max_size: u32,
    ) -> Result<Self, AppError> {
        let page = page.unwrap_or(1);
        if page == 0 {
            return Err(AppError::not_found("Invalid page"));
        }
        let page_size = match page_size {
            None | Some(0) => default_size,
            Some(size) => size.min(max_size),
        };
        Ok(Self { page, page_size })
    }

    pub fn limit(&self) -> i64 {
        i64::from(self.page_size)
    }

    pub fn offset(&self) -> i64 {
        i64::from(self.page - 1) * i64::from(self.page_size)
    }
}

#[derive(Serialize, Deserialize, Debug)]
pub struct Page<T> {
    pub count: i64,
    pub next: Option<u32>,
    pub previous: Option<u32>,
    pub results: Vec<T>,
}

impl<T> Page<T> {
    /// Costruisce la pagina; una pagina oltre l'ultima (tranne la prima) è un 404
    pub fn new(results: Vec<T>, count: i64, pagination: Pagination) -> Result<Self, AppError> {
        if pagination.page > 1 && pagination.offset() >= count {
            return Err(AppError::not_found("Invalid page"));
        }
        let has_next = pagination.offset() + pagination.limit() < count;
        Ok(Self {
            count,
            next: has_next.then_some(pagination.page + 1),
            previous: (pagination.page > 1).then(|| pagination.page - 1),
            results,
        })
    }

    pub fn map<U, F: FnMut(T) -> U>(self, f: F) -> Page<U> {
        Page {
            count: self.count,
            next: self.next,
            previous: self.previous,
            results: self.results.into_iter().map(f).collect(),
        }
    }
}
