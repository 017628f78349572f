use std::future::Future;
use std::rc::Rc;

use crate::task::{NewTask, Task, TaskId};

pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8000";

const API_PATH: &str = "/api/main/";

/// The four calls the board makes against the task REST API.
///
/// Every failure (transport error, non-2xx status, undecodable body) comes
/// back as an `Err`; the board treats them all alike.
pub trait TaskApi {
    /// `GET /api/main/`
    fn list(&self) -> impl Future<Output = anyhow::Result<Vec<Task>>>;

    /// `POST /api/main/`, returning the record with its server-assigned id.
    fn create(&self, draft: &NewTask) -> impl Future<Output = anyhow::Result<Task>>;

    /// `PUT /api/main/{id}/` with the full record.
    fn update(&self, task: &Task) -> impl Future<Output = anyhow::Result<Task>>;

    /// `DELETE /api/main/{id}/`
    fn delete(&self, id: TaskId) -> impl Future<Output = anyhow::Result<()>>;
}

impl<T: TaskApi + ?Sized> TaskApi for &T {
    fn list(&self) -> impl Future<Output = anyhow::Result<Vec<Task>>> {
        (**self).list()
    }

    fn create(&self, draft: &NewTask) -> impl Future<Output = anyhow::Result<Task>> {
        (**self).create(draft)
    }

    fn update(&self, task: &Task) -> impl Future<Output = anyhow::Result<Task>> {
        (**self).update(task)
    }

    fn delete(&self, id: TaskId) -> impl Future<Output = anyhow::Result<()>> {
        (**self).delete(id)
    }
}

impl<T: TaskApi + ?Sized> TaskApi for Rc<T> {
    fn list(&self) -> impl Future<Output = anyhow::Result<Vec<Task>>> {
        (**self).list()
    }

    fn create(&self, draft: &NewTask) -> impl Future<Output = anyhow::Result<Task>> {
        (**self).create(draft)
    }

    fn update(&self, task: &Task) -> impl Future<Output = anyhow::Result<Task>> {
        (**self).update(task)
    }

    fn delete(&self, id: TaskId) -> impl Future<Output = anyhow::Result<()>> {
        (**self).delete(id)
    }
}

/// URL builder for the task collection and its items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    base: String,
}

impl Endpoints {
    /// `base` is scheme and authority, e.g. `http://127.0.0.1:8000`. An empty
    /// base yields same-origin paths.
    pub fn new(base: &str) -> Self {
        Self {
            base: base.trim().trim_end_matches('/').to_string(),
        }
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn collection(&self) -> String {
        format!("{}{API_PATH}", self.base)
    }

    pub fn item(&self, id: TaskId) -> String {
        format!("{}{API_PATH}{id}/", self.base)
    }
}

impl Default for Endpoints {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_tolerate_trailing_slash() {
        let endpoints = Endpoints::new("http://localhost:8000/");
        assert_eq!(endpoints.collection(), "http://localhost:8000/api/main/");
        assert_eq!(endpoints.item(12), "http://localhost:8000/api/main/12/");
    }

    #[test]
    fn empty_base_is_same_origin() {
        let endpoints = Endpoints::new("");
        assert_eq!(endpoints.collection(), "/api/main/");
        assert_eq!(endpoints.item(1), "/api/main/1/");
    }
}
