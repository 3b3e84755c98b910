//! Form controller: draft editing, validation and submission.

use kasa_core::drafts::validate;
use kasa_core::resource::{self, Resource};
use kasa_core::{Api, FieldErrors, FormDraft, Id};
use thiserror::Error;
use tracing::{debug, info};

/// Why a submission did not go through.
#[derive(Debug, Error)]
pub enum SubmitError {
    /// Local validation failed; nothing was sent.
    #[error("the form has invalid fields")]
    Invalid { section: Option<&'static str> },

    /// The API rejected one or more fields.
    #[error("the server rejected the form")]
    Rejected {
        section: Option<&'static str>,
        message: Option<String>,
    },

    /// The request failed for another reason.
    #[error(transparent)]
    Failed(#[from] kasa_core::Error),
}

impl SubmitError {
    /// Section the form should switch to, if the failure is field-related.
    pub fn section(&self) -> Option<&'static str> {
        match self {
            Self::Invalid { section } | Self::Rejected { section, .. } => *section,
            Self::Failed(_) => None,
        }
    }
}

/// State of one create or edit form for resource `R`.
///
/// Local rule failures and server field errors share one [`FieldErrors`]
/// map. Editing a field clears only that field's message.
pub struct FormController<R: Resource> {
    draft: R::Draft,
    errors: FieldErrors,
    id: Option<Id>,
}

impl<R: Resource> Default for FormController<R> {
    fn default() -> Self {
        Self::create()
    }
}

impl<R: Resource> FormController<R> {
    /// An empty form that creates a new entity.
    pub fn create() -> Self {
        Self::with_draft(R::Draft::default(), None)
    }

    /// A form pre-filled from an existing entity.
    pub fn edit_existing(id: Id, item: &R::Item) -> Self
    where
        for<'a> R::Draft: From<&'a R::Item>,
    {
        Self::with_draft(R::Draft::from(item), Some(id))
    }

    /// A form over an arbitrary draft; `id` selects update over create.
    pub fn with_draft(draft: R::Draft, id: Option<Id>) -> Self {
        Self {
            draft,
            errors: FieldErrors::new(),
            id,
        }
    }

    pub fn draft(&self) -> &R::Draft {
        &self.draft
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn id(&self) -> Option<Id> {
        self.id
    }

    /// Message shown under one field.
    pub fn error(&self, field: &str) -> Option<&str> {
        self.errors.get(field)
    }

    /// Change the draft through `f` and clear the error of `field`.
    pub fn edit(&mut self, field: &str, f: impl FnOnce(&mut R::Draft)) {
        f(&mut self.draft);
        self.errors.clear_field(field);
    }

    /// Run the local rules, replacing the error map.
    ///
    /// Returns the first section holding an invalid field, `None` when the
    /// draft is valid.
    pub fn validate(&mut self) -> Option<&'static str> {
        self.errors = validate(&self.draft);
        R::Draft::first_invalid_section(&self.errors)
    }

    /// Validate, then create or update the entity.
    ///
    /// No request is made while local rules fail. Field errors in a
    /// validation response are merged into the error map.
    pub async fn submit<A>(&mut self, api: &A) -> Result<R::Item, SubmitError>
    where
        A: Api + ?Sized,
    {
        self.errors = validate(&self.draft);
        if !self.errors.is_empty() {
            let section = R::Draft::first_invalid_section(&self.errors);
            debug!(resource = R::PATH, fields = self.errors.len(), ?section, "Submit blocked by validation");
            return Err(SubmitError::Invalid { section });
        }

        let result = match self.id {
            Some(id) => resource::update::<R, A>(api, id, &self.draft).await,
            None => resource::create::<R, A>(api, &self.draft).await,
        };

        match result {
            Ok(item) => {
                info!(resource = R::PATH, id = ?self.id, "Form submitted");
                Ok(item)
            }
            Err(error) => match error.field_errors() {
                Some(fields) => {
                    self.errors.merge(fields.clone());
                    let section = R::Draft::first_invalid_section(&self.errors);
                    let message = match &error {
                        kasa_core::Error::Api(api) => api.message.clone(),
                        _ => None,
                    };
                    debug!(resource = R::PATH, fields = fields.len(), ?section, "Server rejected fields");
                    Err(SubmitError::Rejected { section, message })
                }
                None => Err(SubmitError::Failed(error)),
            },
        }
    }
}

impl<R: Resource> std::fmt::Debug for FormController<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormController")
            .field("resource", &R::PATH)
            .field("id", &self.id)
            .field("errors", &self.errors)
            .finish_non_exhaustive()
    }
}
