//! Case-insensitive list search
//!
//! Each record type names the display fields a search looks at. A record is
//! kept when any of those fields contains the query as a substring, ignoring
//! case. The filter is stable and an empty query keeps everything.

use crate::models::{Appointment, Client, Package, Payment, Service, SessionNote};

/// Records that can be matched by the list search box
pub trait Searchable {
    /// Display fields the query is matched against; absent lookups are skipped
    fn search_fields(&self) -> Vec<String>;

    fn matches(&self, query: &str) -> bool {
        let needle = query.to_lowercase();
        needle.is_empty()
            || self
                .search_fields()
                .iter()
                .any(|field| field.to_lowercase().contains(&needle))
    }
}

/// Keep the records matching `query`, in input order
pub fn filter_records<'a, T: Searchable>(records: &'a [T], query: &str) -> Vec<&'a T> {
    records.iter().filter(|record| record.matches(query)).collect()
}

/// Owned variant of [`filter_records`] for lists that are about to be returned
pub fn retain_matching<T: Searchable>(records: &mut Vec<T>, query: &str) {
    if !query.is_empty() {
        records.retain(|record| record.matches(query));
    }
}

impl Searchable for Client {
    fn search_fields(&self) -> Vec<String> {
        let mut fields = vec![self.full_name()];
        fields.extend(self.email.clone());
        fields
    }
}

impl Searchable for Service {
    fn search_fields(&self) -> Vec<String> {
        let mut fields = vec![self.name.clone()];
        fields.extend(self.description.clone());
        fields
    }
}

impl Searchable for Package {
    fn search_fields(&self) -> Vec<String> {
        let mut fields = vec![self.name.clone()];
        fields.extend(self.description.clone());
        fields
    }
}

impl Searchable for Payment {
    fn search_fields(&self) -> Vec<String> {
        let mut fields = Vec::with_capacity(3);
        fields.extend(self.client.as_ref().map(|c| c.full_name()));
        fields.extend(self.service.as_ref().map(|s| s.name.clone()));
        fields.extend(self.package.as_ref().map(|p| p.name.clone()));
        fields
    }
}

impl Searchable for SessionNote {
    fn search_fields(&self) -> Vec<String> {
        let mut fields = Vec::with_capacity(3);
        fields.extend(self.client.as_ref().map(|c| c.full_name()));
        fields.extend(self.service.as_ref().map(|s| s.name.clone()));
        fields.push(self.notes.clone());
        fields
    }
}

impl Searchable for Appointment {
    fn search_fields(&self) -> Vec<String> {
        let mut fields = Vec::with_capacity(2);
        fields.extend(self.client.as_ref().map(|c| c.full_name()));
        fields.push(self.title.clone());
        fields
    }
}
