//! Term type / attribute name data service Trait

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::{CoreError, CoreResult};
use crate::types::{AttributeName, TermType};

/// Remote metadata service
///
/// Records are keyed by abbreviation within `(terminology, version)`.
/// Provides a default memory implementation of `InMemoryMetadataService`.
#[async_trait]
pub trait MetadataService: Send + Sync {
    /// Fetch the canonical term type
    ///
    /// # Arguments
    /// * `abbreviation` - Record key
    /// * `terminology` - Terminology name
    /// * `version` - Terminology version
    async fn get_term_type(
        &self,
        abbreviation: &str,
        terminology: &str,
        version: &str,
    ) -> CoreResult<TermType>;

    /// Create a term type, returning the stored record
    async fn add_term_type(&self, term_type: &TermType) -> CoreResult<TermType>;

    /// Update a term type; the service may or may not echo the stored record
    async fn update_term_type(&self, term_type: &TermType) -> CoreResult<Option<TermType>>;

    /// Fetch the canonical attribute name
    async fn get_attribute_name(
        &self,
        abbreviation: &str,
        terminology: &str,
        version: &str,
    ) -> CoreResult<AttributeName>;

    /// Create an attribute name, returning the stored record
    async fn add_attribute_name(&self, attribute_name: &AttributeName)
        -> CoreResult<AttributeName>;

    /// Update an attribute name; the service may or may not echo the stored record
    async fn update_attribute_name(
        &self,
        attribute_name: &AttributeName,
    ) -> CoreResult<Option<AttributeName>>;
}

type ScopedKey = (String, String, String);

fn scoped_key(terminology: &str, version: &str, abbreviation: &str) -> ScopedKey {
    (
        terminology.to_string(),
        version.to_string(),
        abbreviation.to_string(),
    )
}

/// In-memory metadata service
///
/// Behaves like the remote service: assigns ids, rejects duplicates and
/// reports missing records.
#[derive(Clone, Default)]
pub struct InMemoryMetadataService {
    term_types: Arc<RwLock<HashMap<ScopedKey, TermType>>>,
    attribute_names: Arc<RwLock<HashMap<ScopedKey, AttributeName>>>,
    next_id: Arc<AtomicI64>,
}

impl InMemoryMetadataService {
    /// Create an empty service
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn allocate_id(&self) -> i64 {
        self.next_id.fetch_add(1, Ordering::Relaxed) + 1
    }
}

#[async_trait]
impl MetadataService for InMemoryMetadataService {
    async fn get_term_type(
        &self,
        abbreviation: &str,
        terminology: &str,
        version: &str,
    ) -> CoreResult<TermType> {
        self.term_types
            .read()
            .await
            .get(&scoped_key(terminology, version, abbreviation))
            .cloned()
            .ok_or_else(|| CoreError::TermTypeNotFound(abbreviation.to_string()))
    }

    async fn add_term_type(&self, term_type: &TermType) -> CoreResult<TermType> {
        let key = scoped_key(
            &term_type.terminology,
            &term_type.version,
            &term_type.abbreviation,
        );
        let mut store = self.term_types.write().await;
        if store.contains_key(&key) {
            return Err(CoreError::Remote(format!(
                "Term type {} already exists.",
                term_type.abbreviation
            )));
        }
        let mut stored = term_type.clone();
        stored.id = Some(self.allocate_id());
        store.insert(key, stored.clone());
        Ok(stored)
    }

    async fn update_term_type(&self, term_type: &TermType) -> CoreResult<Option<TermType>> {
        let key = scoped_key(
            &term_type.terminology,
            &term_type.version,
            &term_type.abbreviation,
        );
        let mut store = self.term_types.write().await;
        let existing = store
            .get_mut(&key)
            .ok_or_else(|| CoreError::TermTypeNotFound(term_type.abbreviation.clone()))?;
        let id = existing.id;
        *existing = term_type.clone();
        existing.id = id;
        Ok(Some(existing.clone()))
    }

    async fn get_attribute_name(
        &self,
        abbreviation: &str,
        terminology: &str,
        version: &str,
    ) -> CoreResult<AttributeName> {
        self.attribute_names
            .read()
            .await
            .get(&scoped_key(terminology, version, abbreviation))
            .cloned()
            .ok_or_else(|| CoreError::AttributeNameNotFound(abbreviation.to_string()))
    }

    async fn add_attribute_name(
        &self,
        attribute_name: &AttributeName,
    ) -> CoreResult<AttributeName> {
        let key = scoped_key(
            &attribute_name.terminology,
            &attribute_name.version,
            &attribute_name.abbreviation,
        );
        let mut store = self.attribute_names.write().await;
        if store.contains_key(&key) {
            return Err(CoreError::Remote(format!(
                "Attribute name {} already exists.",
                attribute_name.abbreviation
            )));
        }
        let mut stored = attribute_name.clone();
        stored.id = Some(self.allocate_id());
        store.insert(key, stored.clone());
        Ok(stored)
    }

    async fn update_attribute_name(
        &self,
        attribute_name: &AttributeName,
    ) -> CoreResult<Option<AttributeName>> {
        let key = scoped_key(
            &attribute_name.terminology,
            &attribute_name.version,
            &attribute_name.abbreviation,
        );
        let mut store = self.attribute_names.write().await;
        let existing = store.get_mut(&key).ok_or_else(|| {
            CoreError::AttributeNameNotFound(attribute_name.abbreviation.clone())
        })?;
        let id = existing.id;
        *existing = attribute_name.clone();
        existing.id = id;
        Ok(Some(existing.clone()))
    }
}
