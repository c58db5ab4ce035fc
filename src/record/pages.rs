//! Lazy pagination over list operations

use serde_json::Value;

use super::{encode_fields, Attributes, Mapper, ValueObject};
use crate::client::{Fields, SageMakerClient};
use crate::config::{MAX_RESULTS_FIELD, NEXT_TOKEN_FIELD};
use crate::Result;

/// Description of a paginated list call.
#[derive(Debug, Clone, PartialEq)]
pub struct ListRequest {
    operation: String,
    items_field: String,
    token_field: String,
    filters: Attributes,
}

impl ListRequest {
    /// Create a request for `operation` whose response carries the page items
    /// under `items_field`.
    #[must_use]
    pub fn new(operation: impl Into<String>, items_field: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            items_field: items_field.into(),
            token_field: NEXT_TOKEN_FIELD.to_string(),
            filters: Attributes::new(),
        }
    }

    /// Use a continuation-token field other than `NextToken`.
    #[must_use]
    pub fn token_field(mut self, field: impl Into<String>) -> Self {
        self.token_field = field.into();
        self
    }

    /// Set the filter attributes, sent with every page request.
    #[must_use]
    pub fn filters(mut self, filters: Attributes) -> Self {
        self.filters = filters;
        self
    }

    /// Operation name.
    #[must_use]
    pub fn operation(&self) -> &str {
        &self.operation
    }

    /// Response field holding the page items.
    #[must_use]
    pub fn items_field(&self) -> &str {
        &self.items_field
    }

    /// Filter attributes.
    #[must_use]
    pub const fn filter_attributes(&self) -> &Attributes {
        &self.filters
    }
}

/// Forward-only iterator over every item of a paginated list operation.
///
/// Pages are fetched one at a time, only when the items of the previous
/// page are used up. Iteration ends after a page without a continuation
/// token. A failed request is yielded once as `Err`, after which the
/// iterator is exhausted.
pub struct Pages<'a, C, S> {
    mapper: &'a Mapper<C>,
    request: ListRequest,
    page: std::vec::IntoIter<S>,
    next_token: Option<String>,
    started: bool,
    done: bool,
    requests: usize,
}

impl<'a, C: SageMakerClient, S: ValueObject> Pages<'a, C, S> {
    pub(super) fn new(mapper: &'a Mapper<C>, request: ListRequest) -> Self {
        Self {
            mapper,
            request,
            page: Vec::new().into_iter(),
            next_token: None,
            started: false,
            done: false,
            requests: 0,
        }
    }

    /// Number of page requests issued so far.
    #[must_use]
    pub const fn requests(&self) -> usize {
        self.requests
    }

    fn page_request(&mut self) -> Fields {
        let mut request = encode_fields(&self.request.filters, self.mapper.casing());
        if let Some(page_size) = self.mapper.config().page_size {
            request
                .entry(MAX_RESULTS_FIELD)
                .or_insert_with(|| Value::from(page_size));
        }
        if let Some(token) = self.next_token.take() {
            request.insert(self.request.token_field.clone(), Value::String(token));
        }
        request
    }

    fn fetch(&mut self) -> Result<()> {
        let request = self.page_request();
        self.started = true;
        self.requests += 1;

        let response = self.mapper.call(&self.request.operation, request)?;

        let items: Vec<S> = match response.get(&self.request.items_field) {
            Some(Value::Array(items)) => items
                .iter()
                .filter_map(|item| match item {
                    Value::Object(fields) => Some(self.mapper.decode_value::<S>(fields)),
                    _ => {
                        tracing::warn!(
                            operation = %self.request.operation,
                            "skipping list item that is not an object"
                        );
                        None
                    }
                })
                .collect(),
            _ => Vec::new(),
        };
        self.next_token = response
            .get(&self.request.token_field)
            .and_then(Value::as_str)
            .filter(|token| !token.is_empty())
            .map(str::to_string);

        tracing::debug!(
            operation = %self.request.operation,
            page = self.requests,
            items = items.len(),
            more = self.next_token.is_some(),
            "fetched list page"
        );
        self.page = items.into_iter();
        Ok(())
    }
}

impl<C: SageMakerClient, S: ValueObject> Iterator for Pages<'_, C, S> {
    type Item = Result<S>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(item) = self.page.next() {
                return Some(Ok(item));
            }
            if self.done || (self.started && self.next_token.is_none()) {
                self.done = true;
                return None;
            }
            if let Err(error) = self.fetch() {
                self.done = true;
                return Some(Err(error));
            }
        }
    }
}

impl<C: SageMakerClient, S: ValueObject> std::iter::FusedIterator for Pages<'_, C, S> {}
