use crate::error::ApiResult;

/// Lifecycle shared by every form dialog.
///
/// `Closed -> Open -> Submitting -> Closed` on success, or back to `Open`
/// with an error and the draft intact on failure. A draft that fails
/// validation never enters `Submitting`.
#[derive(Debug, Clone, PartialEq)]
pub enum ModalState<D> {
    Closed,
    Open { draft: D, error: Option<String> },
    Submitting { draft: D },
}

impl<D> Default for ModalState<D> {
    fn default() -> Self {
        ModalState::Closed
    }
}

impl<D> ModalState<D> {
    pub fn open(draft: D) -> Self {
        ModalState::Open { draft, error: None }
    }

    pub fn is_open(&self) -> bool {
        !matches!(self, ModalState::Closed)
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self, ModalState::Submitting { .. })
    }

    pub fn draft(&self) -> Option<&D> {
        match self {
            ModalState::Closed => None,
            ModalState::Open { draft, .. } | ModalState::Submitting { draft } => Some(draft),
        }
    }

    /// Editable only while `Open`; typing also clears a stale error
    pub fn draft_mut(&mut self) -> Option<&mut D> {
        match self {
            ModalState::Open { draft, error } => {
                *error = None;
                Some(draft)
            }
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            ModalState::Open { error, .. } => error.as_deref(),
            _ => None,
        }
    }

    /// Validate the open draft and, if it passes, enter `Submitting`.
    ///
    /// Returns the validated value to send. On a validation error the modal
    /// stays `Open` with the message shown.
    pub fn try_begin<T>(&mut self, validate: impl FnOnce(&D) -> ApiResult<T>) -> Option<T> {
        let ModalState::Open { draft, error } = self else {
            return None;
        };
        match validate(draft) {
            Ok(value) => {
                let state = std::mem::replace(self, ModalState::Closed);
                if let ModalState::Open { draft, .. } = state {
                    *self = ModalState::Submitting { draft };
                }
                Some(value)
            }
            Err(e) => {
                *error = Some(e.message);
                None
            }
        }
    }

    /// Apply the outcome of the submission. Success closes the modal;
    /// failure reopens it with `fallback` (or the validation message).
    pub fn settle<T>(&mut self, result: &ApiResult<T>, fallback: &str) -> bool {
        if !self.is_submitting() {
            return false;
        }
        match result {
            Ok(_) => {
                *self = ModalState::Closed;
                true
            }
            Err(e) => {
                let state = std::mem::replace(self, ModalState::Closed);
                if let ModalState::Submitting { draft } = state {
                    *self = ModalState::Open {
                        draft,
                        error: Some(e.user_message(fallback)),
                    };
                }
                false
            }
        }
    }

    /// Cancel. Ignored while a submission is outstanding.
    pub fn close(&mut self) {
        if !self.is_submitting() {
            *self = ModalState::Closed;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiError;

    fn validate_non_empty(s: &String) -> ApiResult<usize> {
        if s.is_empty() {
            Err(ApiError::validation("required"))
        } else {
            Ok(s.len())
        }
    }

    #[test]
    fn happy_path_closes() {
        let mut modal = ModalState::open("abc".to_string());
        assert_eq!(modal.try_begin(validate_non_empty), Some(3));
        assert!(modal.is_submitting());
        assert!(modal.draft_mut().is_none());

        modal.close();
        assert!(modal.is_submitting());

        assert!(modal.settle(&Ok(()), "failed"));
        assert_eq!(modal, ModalState::Closed);
    }

    #[test]
    fn validation_failure_stays_open_without_submitting() {
        let mut modal = ModalState::open(String::new());
        assert_eq!(modal.try_begin(validate_non_empty), None);
        assert!(!modal.is_submitting());
        assert_eq!(modal.error(), Some("required"));

        modal.draft_mut().unwrap().push('x');
        assert_eq!(modal.error(), None);
    }

    #[test]
    fn rejected_submission_reopens_with_draft_intact() {
        let mut modal = ModalState::open("keep me".to_string());
        modal.try_begin(validate_non_empty);
        let outcome: ApiResult<()> = Err(ApiError::rejected(409, r#"{"detail":"dup"}"#));
        assert!(!modal.settle(&outcome, "Failed to update product."));

        assert_eq!(modal.draft().map(String::as_str), Some("keep me"));
        assert_eq!(modal.error(), Some("Failed to update product."));
    }

    #[test]
    fn closed_modal_ignores_transitions() {
        let mut modal: ModalState<String> = ModalState::Closed;
        assert_eq!(modal.try_begin(validate_non_empty), None);
        assert!(!modal.settle(&Ok(()), "x"));
        assert!(!modal.is_open());
    }
}
