use uuid::Uuid;

use crate::record::{StudentFields, StudentRecord};
use crate::store::{RecordStore, StoreError};

/// Process-local store, insertion-ordered. The default backend for tests and
/// for running the sidecar without any persistence configured.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: Vec<StudentRecord>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.records.iter().position(|r| r.id == id)
    }
}

impl RecordStore for MemoryStore {
    fn list(&self) -> Result<Vec<StudentRecord>, StoreError> {
        Ok(self.records.clone())
    }

    fn create(&mut self, fields: &StudentFields) -> Result<StudentRecord, StoreError> {
        let record = StudentRecord {
            id: Uuid::new_v4().to_string(),
            fields: fields.clone(),
        };
        self.records.push(record.clone());
        Ok(record)
    }

    fn update(&mut self, id: &str, fields: &StudentFields) -> Result<StudentRecord, StoreError> {
        let Some(pos) = self.position(id) else {
            return Err(StoreError::NotFound { id: id.to_string() });
        };
        self.records[pos].fields = fields.clone();
        Ok(self.records[pos].clone())
    }

    fn delete(&mut self, id: &str) -> Result<(), StoreError> {
        let Some(pos) = self.position(id) else {
            return Err(StoreError::NotFound { id: id.to_string() });
        };
        self.records.remove(pos);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(first: &str) -> StudentFields {
        StudentFields {
            first_name: first.to_string(),
            last_name: "Doe".to_string(),
            city: "New York".to_string(),
            email: "john.doe@email.com".to_string(),
            phone: "1234567890".to_string(),
            bio: "Computer Science student passionate about web development.".to_string(),
            tenth_marks: 85.0,
            twelfth_marks: 92.0,
            degree_type: "BTech".to_string(),
            years_of_study: 3,
        }
    }

    #[test]
    fn update_after_create_round_trips_the_fields() {
        let mut store = MemoryStore::new();
        let created = store.create(&fields("John")).unwrap();
        let updated = store.update(&created.id, &fields("Johnny")).unwrap();
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.fields.first_name, "Johnny");
        assert_eq!(store.list().unwrap(), vec![updated]);
    }

    #[test]
    fn delete_removes_the_id_and_repeat_delete_is_not_found() {
        let mut store = MemoryStore::new();
        let a = store.create(&fields("A1")).unwrap();
        let b = store.create(&fields("B2")).unwrap();
        store.delete(&a.id).unwrap();
        assert!(store.list().unwrap().iter().all(|r| r.id != a.id));
        assert_eq!(store.list().unwrap(), vec![b]);
        assert!(matches!(
            store.delete(&a.id),
            Err(StoreError::NotFound { .. })
        ));
    }
}
