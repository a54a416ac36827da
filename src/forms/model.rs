//! Model Forms

use crate::{
    catalog::{ListingStatus, NewModel, Scheme, SchemeUpdate, StatusUpdate},
    forms::SectionForm,
    validation::{ValidationError, require_text},
};

/// Model name and initial status.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModelForm {
    /// Display name.
    pub model_name: String,

    /// Initial publication state.
    pub status: ListingStatus,
}

impl SectionForm for ModelForm {
    type Payload = NewModel;

    fn section(&self) -> &'static str {
        "model"
    }

    fn validate(&self) -> Result<NewModel, ValidationError> {
        Ok(NewModel {
            model_name: require_text("modelName", &self.model_name)?,
            status: self.status,
        })
    }
}

/// Status change of an existing model.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusForm {
    /// New state.
    pub status: ListingStatus,
}

impl SectionForm for StatusForm {
    type Payload = StatusUpdate;

    fn section(&self) -> &'static str {
        "status"
    }

    fn validate(&self) -> Result<StatusUpdate, ValidationError> {
        Ok(StatusUpdate {
            status: self.status,
        })
    }
}

/// Flip of a single scheme flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchemeForm {
    /// Flag to change.
    pub scheme: Scheme,

    /// New value.
    pub enabled: bool,
}

impl From<SchemeUpdate> for SchemeForm {
    fn from(update: SchemeUpdate) -> Self {
        Self {
            scheme: update.scheme,
            enabled: update.enabled,
        }
    }
}

impl SectionForm for SchemeForm {
    type Payload = SchemeUpdate;

    fn section(&self) -> &'static str {
        "schemes"
    }

    fn validate(&self) -> Result<SchemeUpdate, ValidationError> {
        Ok(SchemeUpdate {
            scheme: self.scheme,
            enabled: self.enabled,
        })
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn model_name_is_required() {
        assert_eq!(
            ModelForm::default().validate(),
            Err(ValidationError::Required("modelName"))
        );
    }

    #[test]
    fn model_name_is_trimmed() -> TestResult {
        let form = ModelForm {
            model_name: "  MX-12 ".to_string(),
            status: ListingStatus::Live,
        };

        assert_eq!(
            form.validate()?,
            NewModel {
                model_name: "MX-12".to_string(),
                status: ListingStatus::Live,
            }
        );

        Ok(())
    }
}
