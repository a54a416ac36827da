//! Section Editor
//!
//! Drives one `SectionForm`: local validation, a single in-flight save, the
//! cached copy of what was last saved, and notifications.

use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use thiserror::Error;

use medstore::{
    validation::ValidationError,
    wizard::{IdKind, Produced, WizardIds},
};

use crate::{
    api::{ApiError, CatalogApi},
    notify::Notifier,
    submit::Submit,
};

/// Errors raised by a section save.
#[derive(Debug, Error)]
pub enum EditorError {
    /// A save is already in flight for this section.
    #[error("a save is already in progress")]
    Busy,

    /// The form failed local validation; nothing was sent.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The editor is not addressed to the record the endpoint needs.
    #[error("no {0:?} id to save against")]
    MissingTarget(IdKind),

    /// The backend rejected the save or could not be reached.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// A wizard asked its forms to save a stage the flow does not have.
    #[error("flow has no stage {0}")]
    UnknownStage(usize),
}

impl EditorError {
    /// Text to show the user.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Api(error) => error.user_message().to_string(),
            other => other.to_string(),
        }
    }
}

/// Shared "save in progress" flag; the disabled state of a save control.
#[derive(Debug, Clone, Default)]
pub struct SavingFlag(Arc<AtomicBool>);

impl SavingFlag {
    /// Whether a save currently holds the flag.
    #[must_use]
    pub fn is_set(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    /// Take the flag for the lifetime of the returned guard.
    ///
    /// # Errors
    ///
    /// Returns `EditorError::Busy` if another save holds it.
    pub fn begin(&self) -> Result<SavingGuard, EditorError> {
        if self.0.swap(true, Ordering::AcqRel) {
            return Err(EditorError::Busy);
        }

        Ok(SavingGuard(Arc::clone(&self.0)))
    }
}

/// Clears the saving flag when dropped, including when the save is cancelled.
#[derive(Debug)]
pub struct SavingGuard(Arc<AtomicBool>);

impl Drop for SavingGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Editor for one section of one record.
pub struct SectionEditor<F: Submit> {
    form: F,
    target: WizardIds,
    saving: SavingFlag,
    saved: Option<F::Payload>,
    api: Arc<dyn CatalogApi>,
    notifier: Arc<dyn Notifier>,
}

impl<F> std::fmt::Debug for SectionEditor<F>
where
    F: Submit + std::fmt::Debug,
    F::Payload: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SectionEditor")
            .field("form", &self.form)
            .field("target", &self.target)
            .field("saving", &self.saving)
            .field("saved", &self.saved)
            .finish_non_exhaustive()
    }
}

impl<F: Submit> SectionEditor<F> {
    /// Editor for `form`, saving against `target`.
    pub fn new(
        form: F,
        target: WizardIds,
        api: Arc<dyn CatalogApi>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            form,
            target,
            saving: SavingFlag::default(),
            saved: None,
            api,
            notifier,
        }
    }

    /// Share one saving flag between editors behind the same control.
    #[must_use]
    pub fn with_saving_flag(mut self, saving: SavingFlag) -> Self {
        self.saving = saving;
        self
    }

    /// Current form state.
    pub fn form(&self) -> &F {
        &self.form
    }

    /// Mutable form state for edits between saves.
    pub fn form_mut(&mut self) -> &mut F {
        &mut self.form
    }

    /// Ids the next save is addressed to.
    pub fn target(&self) -> &WizardIds {
        &self.target
    }

    /// Re-address the editor, e.g. after an earlier stage created a parent.
    pub fn set_target(&mut self, target: WizardIds) {
        self.target = target;
    }

    /// Payload of the last successful save.
    pub fn saved(&self) -> Option<&F::Payload> {
        self.saved.as_ref()
    }

    /// Whether a save is in flight.
    pub fn is_saving(&self) -> bool {
        self.saving.is_set()
    }

    /// Validate and submit the form.
    ///
    /// On success the produced id, if any, is added to the target so a later
    /// save updates instead of creating again.
    ///
    /// # Errors
    ///
    /// Returns `Busy` while another save holds the flag, `Validation` without
    /// touching the network, or the submission failure. Every failure except
    /// `Busy` is also reported through the notifier.
    pub async fn save(&mut self) -> Result<Produced, EditorError> {
        let _guard = self.saving.begin()?;

        let (produced, payload) = save_section(
            &self.form,
            &self.target,
            self.api.as_ref(),
            self.notifier.as_ref(),
        )
        .await?;

        self.target.store(produced.clone());
        self.saved = Some(payload);

        Ok(produced)
    }
}

/// Validate `form`, submit it for `target` and report the outcome.
///
/// # Errors
///
/// Returns the validation or submission failure after notifying it.
pub(crate) async fn save_section<F: Submit>(
    form: &F,
    target: &WizardIds,
    api: &dyn CatalogApi,
    notifier: &dyn Notifier,
) -> Result<(Produced, F::Payload), EditorError> {
    let section = form.section();

    let payload = match form.validate() {
        Ok(payload) => payload,
        Err(error) => {
            tracing::warn!(section, field = error.field(), "save rejected: {error}");
            notifier.failure(&error.to_string());

            return Err(error.into());
        }
    };

    match F::submit(api, target, &payload).await {
        Ok(produced) => {
            tracing::info!(section, produced = ?produced, "section saved");
            notifier.success(&format!("Saved {section}"));

            Ok((produced, payload))
        }
        Err(error) => {
            tracing::error!(section, "section save failed: {error}");
            notifier.failure(&error.user_message());

            Err(error)
        }
    }
}
