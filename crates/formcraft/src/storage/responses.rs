//! Submitted responses, kept as one collection in storage order.

use async_trait::async_trait;
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::response::FormResponse;
use crate::submission::ResponseSink;

use super::Storage;

/// Storage key holding every response of every form.
pub const RESPONSES_KEY: &str = "formcraft_responses";

/// Append-mostly store of [`FormResponse`] records.
#[derive(Debug, Clone, Copy)]
pub struct ResponseStore<'a> {
    storage: &'a Storage,
}

impl<'a> ResponseStore<'a> {
    /// Wrap an open storage.
    #[must_use]
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Every stored response, oldest first. An unreadable collection reads
    /// as empty.
    ///
    /// # Errors
    ///
    /// Returns an error if the database read fails.
    pub fn all(&self) -> Result<Vec<FormResponse>> {
        let responses: Vec<FormResponse> =
            self.storage.load_collection_or_empty(RESPONSES_KEY)?;
        debug!(count = responses.len(), "Loaded responses");
        Ok(responses)
    }

    /// Responses for one form, in storage order.
    ///
    /// # Errors
    ///
    /// Returns an error if the database read fails.
    pub fn by_form_id(&self, form_id: &str) -> Result<Vec<FormResponse>> {
        Ok(self
            .all()?
            .into_iter()
            .filter(|response| response.form_id == form_id)
            .collect())
    }

    /// Look up one response.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ResponseNotFound`] if no response has this id.
    pub fn get(&self, id: &str) -> Result<FormResponse> {
        self.all()?
            .into_iter()
            .find(|response| response.id == id)
            .ok_or_else(|| Error::response_not_found(id))
    }

    /// Append a response to the end of the collection.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CorruptCollection`] if the stored responses do not
    /// parse, or an error if the read or the write fails. Nothing is stored
    /// in either case.
    pub fn append(&self, response: FormResponse) -> Result<()> {
        let mut responses = self.load()?;
        let id = response.id.clone();
        responses.push(response);
        self.storage.store_collection(RESPONSES_KEY, &responses)?;
        info!(response_id = %id, total = responses.len(), "Response stored");
        Ok(())
    }

    /// Remove one response.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ResponseNotFound`] if no response has this id.
    pub fn delete(&self, id: &str) -> Result<()> {
        let mut responses = self.load()?;
        let before = responses.len();
        responses.retain(|response| response.id != id);
        if responses.len() == before {
            return Err(Error::response_not_found(id));
        }
        self.storage.store_collection(RESPONSES_KEY, &responses)?;
        info!(response_id = %id, "Response deleted");
        Ok(())
    }

    /// Remove responses. With a form id, only that form's; otherwise all.
    /// Returns how many were removed. Clearing everything drops the stored
    /// value outright, so it also recovers from an unreadable collection.
    ///
    /// # Errors
    ///
    /// Returns an error if the read or the write fails.
    pub fn clear(&self, form_id: Option<&str>) -> Result<usize> {
        let removed = match form_id {
            Some(form_id) => {
                let mut responses = self.load()?;
                let before = responses.len();
                responses.retain(|response| response.form_id != form_id);
                self.storage.store_collection(RESPONSES_KEY, &responses)?;
                before - responses.len()
            }
            None => {
                let count = self.all()?.len();
                self.storage.remove(RESPONSES_KEY)?;
                count
            }
        };
        info!(removed, "Responses cleared");
        Ok(removed)
    }

    fn load(&self) -> Result<Vec<FormResponse>> {
        self.storage.load_collection(RESPONSES_KEY)
    }
}

#[async_trait(?Send)]
impl ResponseSink for ResponseStore<'_> {
    async fn save_response(&self, response: FormResponse) -> Result<()> {
        self.append(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::response::{ResponseMap, ResponseValue};

    fn create_test_storage() -> Storage {
        Storage::open_in_memory().expect("failed to create test storage")
    }

    fn response(form_id: &str, answer: &str) -> FormResponse {
        let mut responses = ResponseMap::new();
        responses.insert("q".to_string(), ResponseValue::from(answer));
        FormResponse::new(form_id.to_string(), responses)
    }

    #[test]
    fn test_empty_store() {
        let storage = create_test_storage();
        let store = ResponseStore::new(&storage);
        assert!(store.all().unwrap().is_empty());
        assert!(store.by_form_id("form_1").unwrap().is_empty());
    }

    #[test]
    fn test_append_keeps_order() {
        let storage = create_test_storage();
        let store = ResponseStore::new(&storage);
        let first = response("form_1", "a");
        let second = response("form_2", "b");
        let third = response("form_1", "c");
        store.append(first.clone()).unwrap();
        store.append(second.clone()).unwrap();
        store.append(third.clone()).unwrap();

        assert_eq!(store.all().unwrap(), vec![first.clone(), second, third.clone()]);
        assert_eq!(store.by_form_id("form_1").unwrap(), vec![first, third]);
    }

    #[test]
    fn test_get_and_delete() {
        let storage = create_test_storage();
        let store = ResponseStore::new(&storage);
        let kept = response("form_1", "a");
        let gone = response("form_1", "b");
        store.append(kept.clone()).unwrap();
        store.append(gone.clone()).unwrap();

        assert_eq!(store.get(&gone.id).unwrap(), gone);
        store.delete(&gone.id).unwrap();
        assert_eq!(store.all().unwrap(), vec![kept]);
        assert!(store.delete(&gone.id).unwrap_err().is_not_found());
        assert!(store.get(&gone.id).unwrap_err().is_not_found());
    }

    #[test]
    fn test_clear_by_form() {
        let storage = create_test_storage();
        let store = ResponseStore::new(&storage);
        store.append(response("form_1", "a")).unwrap();
        store.append(response("form_2", "b")).unwrap();
        store.append(response("form_1", "c")).unwrap();

        assert_eq!(store.clear(Some("form_1")).unwrap(), 2);
        assert_eq!(store.all().unwrap().len(), 1);
        assert_eq!(store.clear(None).unwrap(), 1);
        assert!(store.all().unwrap().is_empty());
    }

    #[test]
    fn test_corrupt_blob_is_kept_until_cleared() {
        let storage = create_test_storage();
        storage.set(RESPONSES_KEY, "not json").unwrap();
        let store = ResponseStore::new(&storage);

        assert!(store.all().unwrap().is_empty());
        assert!(matches!(
            store.append(response("form_1", "a")),
            Err(Error::CorruptCollection { .. })
        ));
        assert!(store.clear(Some("form_1")).is_err());
        assert_eq!(storage.get(RESPONSES_KEY).unwrap().as_deref(), Some("not json"));

        store.clear(None).unwrap();
        store.append(response("form_1", "a")).unwrap();
        assert_eq!(store.all().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_sink_refuses_unreadable_collection() {
        let storage = create_test_storage();
        storage.set(RESPONSES_KEY, "[{\"id\": 1}]").unwrap();
        let store = ResponseStore::new(&storage);

        assert!(store.save_response(response("form_1", "a")).await.is_err());
        assert_eq!(
            storage.get(RESPONSES_KEY).unwrap().as_deref(),
            Some("[{\"id\": 1}]")
        );
    }

    #[test]
    fn test_unrelated_form_id_filters_to_nothing() {
        let storage = create_test_storage();
        let store = ResponseStore::new(&storage);
        let saved = response("form_1", "a");
        store.append(saved.clone()).unwrap();

        assert_eq!(store.by_form_id("form_1").unwrap(), vec![saved]);
        assert!(store.by_form_id("form_2").unwrap().is_empty());
    }

    #[test]
    fn test_blob_is_a_json_array() {
        let storage = create_test_storage();
        let store = ResponseStore::new(&storage);
        store.append(response("form_1", "a")).unwrap();

        let raw = storage.get(RESPONSES_KEY).unwrap().unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        let first = &value.as_array().unwrap()[0];
        assert_eq!(first["form_id"], "form_1");
        assert!(first["submitted_at"].is_string());
        assert_eq!(first["responses"]["q"], "a");
    }

    #[tokio::test]
    async fn test_sink_appends() {
        let storage = create_test_storage();
        let store = ResponseStore::new(&storage);
        store.save_response(response("form_1", "a")).await.unwrap();
        assert_eq!(store.all().unwrap().len(), 1);
    }
}
