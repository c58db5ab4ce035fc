//! Generic CRUD orchestration over a [`SageMakerClient`]

use super::{
    decode, encode_attributes, project, validate_record, Attributes, ListRequest, Pages, Record,
    ValueObject, BASE_IGNORED_FIELDS,
};
use crate::casing::CaseConverter;
use crate::client::{Fields, SageMakerClient};
use crate::config::MapperConfig;
use crate::Result;

/// Maps records to remote calls through one client.
///
/// Stateless apart from its configuration: every operation is a single
/// round trip (or, for listing, a sequence of them), with no caching and no
/// retries.
///
/// # Example
///
/// ```rust
/// use serde_json::json;
/// use smexperiments::client::ScriptedClient;
/// use smexperiments::experiment::TrialComponent;
/// use smexperiments::record::Mapper;
///
/// let client = ScriptedClient::new();
/// client.push_response(
///     "create_trial_component",
///     json!({"TrialComponentName": "tc-1", "TrialComponentArn": "arn:aws:sagemaker:::tc-1"}),
/// );
///
/// let mapper = Mapper::new(&client);
/// let tc = TrialComponent::create(&mapper, "tc-1", Some("Step 1"))?;
/// assert_eq!(tc.trial_component_arn(), Some("arn:aws:sagemaker:::tc-1"));
/// assert_eq!(tc.display_name(), Some("Step 1"));
/// # Ok::<(), smexperiments::Error>(())
/// ```
pub struct Mapper<C> {
    client: C,
    casing: CaseConverter,
    config: MapperConfig,
}

impl<C: SageMakerClient> Mapper<C> {
    /// Create a mapper with default configuration.
    #[must_use]
    pub fn new(client: C) -> Self {
        let config = MapperConfig::default();
        Self {
            client,
            casing: config.case_converter(),
            config,
        }
    }

    /// Create a mapper builder.
    #[must_use]
    pub fn builder(client: C) -> MapperBuilder<C> {
        MapperBuilder::new(client)
    }

    /// Create a mapper with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Config`] if the configuration is invalid.
    pub fn with_config(client: C, config: MapperConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            client,
            casing: config.case_converter(),
            config,
        })
    }

    /// Underlying client.
    #[must_use]
    pub const fn client(&self) -> &C {
        &self.client
    }

    /// Casing converter in use.
    #[must_use]
    pub const fn casing(&self) -> &CaseConverter {
        &self.casing
    }

    /// Configuration in use.
    #[must_use]
    pub const fn config(&self) -> &MapperConfig {
        &self.config
    }

    /// Check a record type's declarations under this mapper's casing.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Config`] describing the first inconsistency.
    pub fn validate<R: Record>(&self) -> Result<()> {
        validate_record::<R>(&self.casing)
    }

    /// Invoke one remote operation.
    ///
    /// # Errors
    ///
    /// Propagates the client's error unchanged.
    pub fn call(&self, operation: &str, request: Fields) -> Result<Fields> {
        tracing::debug!(operation, fields = request.len(), "invoking remote operation");
        let result = self.client.invoke(operation, request);
        if let Err(error) = &result {
            tracing::debug!(operation, %error, "remote operation failed");
        }
        result
    }

    fn ignored<'a>(&'a self, type_ignored: &'a [&'a str]) -> Vec<&'a str> {
        BASE_IGNORED_FIELDS
            .iter()
            .chain(type_ignored)
            .copied()
            .chain(self.config.ignored_fields.iter().map(String::as_str))
            .collect()
    }

    /// Decode a response mapping into the attributes of `R`.
    #[must_use]
    pub fn decode_record<R: Record>(&self, fields: &Fields) -> Attributes {
        decode(&R::SHAPE, fields, &self.ignored(R::IGNORED_FIELDS), &self.casing)
    }

    /// Decode a response mapping into a value object.
    #[must_use]
    pub fn decode_value<V: ValueObject>(&self, fields: &Fields) -> V {
        V::from_attributes(decode(&V::SHAPE, fields, &self.ignored(&[]), &self.casing))
    }

    /// Send `params` to `operation` and build a record from the parameters
    /// overlaid with the decoded response.
    ///
    /// Parameters are encoded through `R::SHAPE`, so declared remote names
    /// match the ones [`save`](Self::save) and [`delete`](Self::delete) send.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Config`] if a parameter is not declared by
    /// `R`, or the client's error. Nothing is sent in the first case.
    pub fn construct<R: Record>(&self, operation: &str, params: Attributes) -> Result<R> {
        let request = encode_attributes(&R::SHAPE, &params, &self.casing)?;
        let response = self.call(operation, request)?;
        let mut attributes = params;
        attributes.merge(self.decode_record::<R>(&response));
        Ok(R::from_attributes(attributes))
    }

    /// Load a record by identity.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::NotFound`] if the record does not exist, or the
    /// client's error otherwise.
    pub fn load<R: Record>(&self, identity: Attributes) -> Result<R> {
        self.construct(R::LOAD_OPERATION, identity)
    }

    /// Create a record. Absent parameters are not sent.
    ///
    /// # Errors
    ///
    /// Propagates the client's error unchanged.
    pub fn create<R: Record>(&self, params: Attributes) -> Result<R> {
        self.construct(R::CREATE_OPERATION, params)
    }

    /// Send the update members of `record` and merge the response back in.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Config`] for an undeclared member, or the
    /// client's error. `record` is left untouched on failure.
    pub fn save<R: Record>(&self, record: &mut R) -> Result<()> {
        self.invoke_members(record, R::UPDATE_OPERATION, R::UPDATE_MEMBERS)
    }

    /// Send the delete members of `record`. The record is consumed.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Config`] for an undeclared member, or the
    /// client's error.
    pub fn delete<R: Record>(&self, record: R) -> Result<()> {
        let attributes = record.to_attributes();
        let request = project(&R::SHAPE, &attributes, R::DELETE_MEMBERS, &self.casing)?;
        self.call(R::DELETE_OPERATION, request)?;
        Ok(())
    }

    /// Project `members` of `record`, call `operation`, and merge the decoded
    /// response into `record`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Config`] for an undeclared member, or the
    /// client's error.
    pub fn invoke_members<R: Record>(
        &self,
        record: &mut R,
        operation: &str,
        members: &[&str],
    ) -> Result<()> {
        let mut attributes = record.to_attributes();
        let request = project(&R::SHAPE, &attributes, members, &self.casing)?;
        let response = self.call(operation, request)?;
        attributes.merge(self.decode_record::<R>(&response));
        *record = R::from_attributes(attributes);
        Ok(())
    }

    /// Lazily iterate over every item of a paginated list operation.
    ///
    /// Nothing is sent until the first call to `next`.
    #[must_use]
    pub fn list<S: ValueObject>(&self, request: ListRequest) -> Pages<'_, C, S> {
        Pages::new(self, request)
    }
}

/// Builder for [`Mapper`].
pub struct MapperBuilder<C> {
    client: C,
    config: MapperConfig,
}

impl<C: SageMakerClient> MapperBuilder<C> {
    /// Create a builder with default configuration.
    #[must_use]
    pub fn new(client: C) -> Self {
        Self {
            client,
            config: MapperConfig::default(),
        }
    }

    /// Replace the whole configuration.
    #[must_use]
    pub fn config(mut self, config: MapperConfig) -> Self {
        self.config = config;
        self
    }

    /// Add a casing acronym (e.g. `"ARN"`).
    #[must_use]
    pub fn acronym(mut self, acronym: impl Into<String>) -> Self {
        self.config.acronyms.push(acronym.into());
        self
    }

    /// Ignore a remote response field for every record type.
    #[must_use]
    pub fn ignore_field(mut self, field: impl Into<String>) -> Self {
        self.config.ignored_fields.push(field.into());
        self
    }

    /// Default `MaxResults` for list requests.
    #[must_use]
    pub const fn page_size(mut self, page_size: u32) -> Self {
        self.config.page_size = Some(page_size);
        self
    }

    /// Build the mapper.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Config`] if the configuration is invalid.
    pub fn build(self) -> Result<Mapper<C>> {
        Mapper::with_config(self.client, self.config)
    }
}
