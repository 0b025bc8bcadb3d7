use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::clock::sleep_ms;
use crate::error::SiteError;

pub const SUBMIT_DELAY_MS: u32 = 1500;
pub const SUCCESS_TTL_MS: u32 = 5000;
pub const CHALLENGE_ANSWER: &str = "10";
pub const CHALLENGE_PROMPT: &str = "What is 7 + 3?";

pub const FIX_ERRORS: &str = "Please fix the errors above.";
pub const SEND_FAILED: &str = "Failed to send message.";
pub const SEND_ERROR: &str = "An error occurred. Please try again.";

static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email regex should compile")
});

pub const SUBJECTS: [(&str, &str); 4] = [
    ("security", "Security consultation"),
    ("collaboration", "Project collaboration"),
    ("opportunity", "Job opportunity"),
    ("other", "Something else"),
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldKind {
    Email,
    Text,
    Choice,
    Challenge,
}

impl FieldKind {
    pub fn accepts(self, value: &str) -> bool {
        let value = value.trim();
        match self {
            FieldKind::Email => EMAIL_REGEX.is_match(value),
            FieldKind::Text | FieldKind::Choice => !value.is_empty(),
            FieldKind::Challenge => value == CHALLENGE_ANSWER,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Name,
    Email,
    Subject,
    Message,
    Challenge,
}

impl Field {
    pub const ALL: [Field; 5] = [
        Field::Name,
        Field::Email,
        Field::Subject,
        Field::Message,
        Field::Challenge,
    ];

    pub fn id(self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Email => "email",
            Field::Subject => "subject",
            Field::Message => "message",
            Field::Challenge => "captcha",
        }
    }

    pub fn kind(self) -> FieldKind {
        match self {
            Field::Email => FieldKind::Email,
            Field::Subject => FieldKind::Choice,
            Field::Challenge => FieldKind::Challenge,
            Field::Name | Field::Message => FieldKind::Text,
        }
    }

    pub fn error_message(self) -> &'static str {
        match self {
            Field::Name => "Please enter your name.",
            Field::Email => "Please enter a valid email address.",
            Field::Subject => "Please choose a subject.",
            Field::Message => "Please enter a message.",
            Field::Challenge => "Incorrect answer. Please try again.",
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ContactDraft {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    pub captcha: String,
}

impl ContactDraft {
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Email => &self.email,
            Field::Subject => &self.subject,
            Field::Message => &self.message,
            Field::Challenge => &self.captcha,
        }
    }

    pub fn set(&mut self, field: Field, value: String) {
        match field {
            Field::Name => self.name = value,
            Field::Email => self.email = value,
            Field::Subject => self.subject = value,
            Field::Message => self.message = value,
            Field::Challenge => self.captcha = value,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubmitReceipt {
    pub success: bool,
    pub message: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum FormStatus {
    #[default]
    Idle,
    Sending,
    /// Success banner; the number lets a delayed dismiss skip newer banners.
    Sent(u64, String),
    Failed(String),
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ContactController {
    draft: ContactDraft,
    invalid: BTreeSet<Field>,
    status: FormStatus,
    submissions: u64,
}

impl ContactController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn draft(&self) -> &ContactDraft {
        &self.draft
    }

    pub fn status(&self) -> &FormStatus {
        &self.status
    }

    pub fn is_sending(&self) -> bool {
        self.status == FormStatus::Sending
    }

    pub fn is_invalid(&self, field: Field) -> bool {
        self.invalid.contains(&field)
    }

    pub fn input(&mut self, field: Field, value: String) {
        self.draft.set(field, value);
        self.invalid.remove(&field);
    }

    pub fn blur(&mut self, field: Field) -> bool {
        let valid = field.kind().accepts(self.draft.get(field));
        if valid {
            self.invalid.remove(&field);
        } else {
            self.invalid.insert(field);
        }
        valid
    }

    pub fn begin_submit(&mut self) -> Result<ContactDraft, Vec<Field>> {
        if self.is_sending() {
            return Err(Vec::new());
        }
        let failed: Vec<Field> = Field::ALL
            .into_iter()
            .filter(|field| !self.blur(*field))
            .collect();
        if !failed.is_empty() {
            self.status = FormStatus::Failed(FIX_ERRORS.to_string());
            return Err(failed);
        }
        self.status = FormStatus::Sending;
        Ok(self.draft.clone())
    }

    pub fn finish(&mut self, outcome: Result<SubmitReceipt, SiteError>) {
        self.status = match outcome {
            Ok(receipt) if receipt.success => {
                self.draft = ContactDraft::default();
                self.invalid.clear();
                self.submissions += 1;
                let message = receipt
                    .message
                    .unwrap_or_else(|| "Message sent successfully!".to_string());
                FormStatus::Sent(self.submissions, message)
            }
            Ok(receipt) => {
                FormStatus::Failed(receipt.message.unwrap_or_else(|| SEND_FAILED.to_string()))
            }
            Err(err) => {
                tracing::warn!("contact: submission failed: {err}");
                FormStatus::Failed(SEND_ERROR.to_string())
            }
        };
    }

    pub fn dismiss(&mut self, submission: u64) {
        if matches!(self.status, FormStatus::Sent(current, _) if current == submission) {
            self.status = FormStatus::Idle;
        }
    }
}

pub async fn simulate_submission(draft: ContactDraft) -> Result<SubmitReceipt, SiteError> {
    sleep_ms(SUBMIT_DELAY_MS).await;
    let payload = serde_json::to_string(&draft)?;
    tracing::info!("contact: form data {payload}");
    Ok(SubmitReceipt {
        success: true,
        message: Some("Message sent successfully!".to_string()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn filled() -> ContactController {
        let mut controller = ContactController::new();
        controller.input(Field::Name, "Ada".to_string());
        controller.input(Field::Email, "ada@example.com".to_string());
        controller.input(Field::Subject, "security".to_string());
        controller.input(Field::Message, "Hello there".to_string());
        controller.input(Field::Challenge, "10".to_string());
        controller
    }

    #[test]
    fn email_shape() {
        assert!(FieldKind::Email.accepts(" a@b.co "));
        assert!(!FieldKind::Email.accepts("a@b"));
        assert!(!FieldKind::Email.accepts("a b@c.de"));
        assert!(!FieldKind::Email.accepts("@c.de"));
    }

    #[test]
    fn text_and_choice_need_content() {
        assert!(!FieldKind::Text.accepts("   "));
        assert!(FieldKind::Text.accepts(" x "));
        assert!(!FieldKind::Choice.accepts(""));
    }

    #[test]
    fn wrong_challenge_never_submits() {
        for answer in ["", "ten", "11", "010", "1 0"] {
            let mut controller = filled();
            controller.input(Field::Challenge, answer.to_string());
            assert_eq!(controller.begin_submit(), Err(vec![Field::Challenge]));
            assert_eq!(controller.status(), &FormStatus::Failed(FIX_ERRORS.to_string()));
            assert!(!controller.is_sending());
        }
    }

    #[test]
    fn valid_form_enters_sending_and_returns_payload() {
        let mut controller = filled();
        let draft = controller.begin_submit().unwrap();
        assert_eq!(draft.name, "Ada");
        assert!(controller.is_sending());
        assert_eq!(controller.begin_submit(), Err(Vec::new()));
    }

    #[test]
    fn success_resets_the_form_and_can_be_dismissed() {
        let mut controller = filled();
        controller.begin_submit().unwrap();
        controller.finish(Ok(SubmitReceipt { success: true, message: None }));
        assert_eq!(
            controller.status(),
            &FormStatus::Sent(1, "Message sent successfully!".to_string())
        );
        assert_eq!(controller.draft(), &ContactDraft::default());

        controller.dismiss(0);
        assert!(matches!(controller.status(), FormStatus::Sent(..)));
        controller.dismiss(1);
        assert_eq!(controller.status(), &FormStatus::Idle);
    }

    #[test]
    fn failures_keep_the_draft_and_leave_sending() {
        let mut controller = filled();
        controller.begin_submit().unwrap();
        controller.finish(Err(SiteError::Submit("offline".to_string())));
        assert_eq!(controller.status(), &FormStatus::Failed(SEND_ERROR.to_string()));
        assert_eq!(controller.draft().name, "Ada");

        controller.begin_submit().unwrap();
        controller.finish(Ok(SubmitReceipt { success: false, message: None }));
        assert_eq!(controller.status(), &FormStatus::Failed(SEND_FAILED.to_string()));
    }

    #[test]
    fn typing_clears_the_error_until_blur() {
        let mut controller = ContactController::new();
        assert!(!controller.blur(Field::Email));
        assert!(controller.is_invalid(Field::Email));
        controller.input(Field::Email, "nope".to_string());
        assert!(!controller.is_invalid(Field::Email));
        controller.blur(Field::Email);
        assert!(controller.is_invalid(Field::Email));
    }

    #[test]
    fn payload_serializes_every_field() {
        let draft = filled().draft().clone();
        let json = serde_json::to_value(&draft).unwrap();
        assert_eq!(json["captcha"], "10");
        assert_eq!(json["subject"], "security");
    }
}
