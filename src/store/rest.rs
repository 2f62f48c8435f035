use std::time::Duration;

use reqwest::blocking::{Client, Response};
use reqwest::StatusCode;

use crate::record::{StudentFields, StudentRecord};
use crate::store::{RecordStore, StoreError};

/// Store backed by a remote `/students` resource: GET/POST on the
/// collection, PUT/DELETE on `/students/:id`, JSON bodies throughout. Any
/// non-2xx response is a failure; 404 on an id-addressed call maps to
/// `NotFound`. The blocking client pools connections internally but each
/// call here is a complete request/response cycle.
#[derive(Debug)]
pub struct RestStore {
    base_url: String,
    client: Client,
}

impl RestStore {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .unwrap_or_else(|_| Client::new());
        Self { base_url, client }
    }

    fn collection_url(&self) -> String {
        format!("{}/students", self.base_url)
    }

    fn item_url(&self, id: &str) -> String {
        format!("{}/students/{}", self.base_url, id)
    }
}

fn transport(e: reqwest::Error) -> StoreError {
    if e.is_connect() || e.is_timeout() {
        StoreError::Connectivity(e.to_string())
    } else {
        StoreError::Persistence(e.to_string())
    }
}

fn check_status(resp: Response, id: Option<&str>) -> Result<Response, StoreError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    if status == StatusCode::NOT_FOUND {
        if let Some(id) = id {
            return Err(StoreError::NotFound { id: id.to_string() });
        }
    }
    Err(StoreError::Persistence(format!(
        "backend returned {}",
        status
    )))
}

impl RecordStore for RestStore {
    fn list(&self) -> Result<Vec<StudentRecord>, StoreError> {
        let resp = self
            .client
            .get(self.collection_url())
            .send()
            .map_err(transport)?;
        check_status(resp, None)?
            .json::<Vec<StudentRecord>>()
            .map_err(|e| StoreError::Persistence(e.to_string()))
    }

    fn create(&mut self, fields: &StudentFields) -> Result<StudentRecord, StoreError> {
        let resp = self
            .client
            .post(self.collection_url())
            .json(fields)
            .send()
            .map_err(transport)?;
        check_status(resp, None)?
            .json::<StudentRecord>()
            .map_err(|e| StoreError::Persistence(e.to_string()))
    }

    fn update(&mut self, id: &str, fields: &StudentFields) -> Result<StudentRecord, StoreError> {
        let resp = self
            .client
            .put(self.item_url(id))
            .json(fields)
            .send()
            .map_err(transport)?;
        check_status(resp, Some(id))?
            .json::<StudentRecord>()
            .map_err(|e| StoreError::Persistence(e.to_string()))
    }

    fn delete(&mut self, id: &str) -> Result<(), StoreError> {
        let resp = self
            .client
            .delete(self.item_url(id))
            .send()
            .map_err(transport)?;
        check_status(resp, Some(id))?;
        Ok(())
    }
}
