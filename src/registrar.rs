//! Submission collaborator for the registration wizard.
//!
//! The portal has no backend; the provided registrar simulates one with a
//! delayed task that reports back over a channel, the same shape a real
//! client would use.

use std::time::Duration;
use tokio::sync::mpsc;
use tracing::info;

use crate::core::wizard::SubmissionToken;

/// Applicant details collected on the wizard's form screen.
#[derive(Debug, Clone, Default)]
pub struct ApplicantDetails {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub education: String,
    pub experience: String,
}

#[derive(Debug, Clone)]
pub struct RegistrationRequest {
    pub course_ids: Vec<String>,
    pub applicant: ApplicantDetails,
    /// Echoed back so the wizard can discard results of a cancelled submission
    pub token: SubmissionToken,
}

#[derive(Debug)]
pub enum RegistrationMessage {
    Submitted {
        registration_id: String,
        token: SubmissionToken,
    },
    Failed {
        reason: String,
        token: SubmissionToken,
    },
}

pub trait Registrar: Send {
    /// Fire off a submission; the outcome arrives on the returned channel.
    fn submit(&self, request: RegistrationRequest) -> mpsc::UnboundedReceiver<RegistrationMessage>;
}

/// Registrar that resolves after a fixed delay, standing in for network
/// latency. Deterministic: the registration id is derived from the selection.
pub struct SimulatedRegistrar {
    delay: Duration,
    reject: bool,
}

impl SimulatedRegistrar {
    pub fn accepting(delay: Duration) -> Self {
        Self { delay, reject: false }
    }

    /// Variant that rejects every submission, for exercising the retry path.
    pub fn rejecting(delay: Duration) -> Self {
        Self { delay, reject: true }
    }
}

impl Registrar for SimulatedRegistrar {
    fn submit(&self, request: RegistrationRequest) -> mpsc::UnboundedReceiver<RegistrationMessage> {
        let (tx, rx) = mpsc::unbounded_channel();
        let delay = self.delay;
        let reject = self.reject;

        tokio::spawn(async move {
            tokio::time::sleep(delay).await;

            let message = if reject {
                RegistrationMessage::Failed {
                    reason: "registration service unavailable".to_string(),
                    token: request.token,
                }
            } else {
                let registration_id = registration_id(&request.course_ids);
                info!(
                    "registration {} submitted for {}",
                    registration_id, request.applicant.full_name
                );
                RegistrationMessage::Submitted {
                    registration_id,
                    token: request.token,
                }
            };
            let _ = tx.send(message);
        });

        rx
    }
}

fn registration_id(course_ids: &[String]) -> String {
    format!("REG-{}", course_ids.join("-"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::wizard::Wizard;

    fn form_wizard(ids: &[&str]) -> Wizard {
        let mut wizard = Wizard::new();
        for id in ids {
            wizard.toggle_course(id).unwrap();
        }
        wizard.advance().unwrap();
        wizard
    }

    #[tokio::test]
    async fn accepted_submission_reaches_confirmation() {
        let mut wizard = form_wizard(&["UT", "RT"]);
        let token = wizard.begin_submit().unwrap().unwrap();

        let registrar = SimulatedRegistrar::accepting(Duration::from_millis(1));
        let mut rx = registrar.submit(RegistrationRequest {
            course_ids: wizard.selection().iter().map(str::to_string).collect(),
            applicant: ApplicantDetails::default(),
            token,
        });

        match rx.recv().await.unwrap() {
            RegistrationMessage::Submitted {
                registration_id,
                token,
            } => {
                assert_eq!(registration_id, "REG-UT-RT");
                assert!(wizard.complete_submit(token));
            }
            other => panic!("unexpected message: {other:?}"),
        }
        assert_eq!(wizard.step(), crate::core::wizard::WizardStep::Confirmation);
    }

    #[tokio::test]
    async fn rejected_submission_leaves_form_retryable() {
        let mut wizard = form_wizard(&["MT"]);
        let token = wizard.begin_submit().unwrap().unwrap();

        let registrar = SimulatedRegistrar::rejecting(Duration::from_millis(1));
        let mut rx = registrar.submit(RegistrationRequest {
            course_ids: wizard.selection().iter().map(str::to_string).collect(),
            applicant: ApplicantDetails::default(),
            token,
        });

        match rx.recv().await.unwrap() {
            RegistrationMessage::Failed { token, .. } => {
                assert!(wizard.fail_submit(token));
            }
            other => panic!("unexpected message: {other:?}"),
        }
        assert_eq!(wizard.step(), crate::core::wizard::WizardStep::Form);
        assert!(wizard.begin_submit().unwrap().is_some());
    }

    #[tokio::test]
    async fn cancelled_submission_result_is_discarded() {
        let mut wizard = form_wizard(&["VT"]);
        let token = wizard.begin_submit().unwrap().unwrap();

        let registrar = SimulatedRegistrar::accepting(Duration::from_millis(1));
        let mut rx = registrar.submit(RegistrationRequest {
            course_ids: vec!["VT".to_string()],
            applicant: ApplicantDetails::default(),
            token,
        });

        wizard.cancel_submission();

        if let RegistrationMessage::Submitted { token, .. } = rx.recv().await.unwrap() {
            assert!(!wizard.complete_submit(token));
        }
        assert_eq!(wizard.step(), crate::core::wizard::WizardStep::Form);
    }
}
