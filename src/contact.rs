use dioxus::prelude::*;

use crate::clock::sleep_ms;
use crate::config::use_site_config;
use crate::forms::{
    simulate_submission, ContactController, Field, FormStatus, CHALLENGE_PROMPT, SUBJECTS,
    SUCCESS_TTL_MS,
};
use crate::share::{CopyButton, CopySource};

const PGP_COPY_FAILED: &str = "Failed to copy PGP key. Please select and copy manually.";

#[component]
pub fn ContactPage() -> Element {
    let config = use_site_config();
    let mut form = use_signal(ContactController::new);

    let status = form.read().status().clone();
    let sending = form.read().is_sending();

    rsx! {
        document::Title { "Contact | {config.site_title}" }
        document::Meta { name: "description", content: "Get in touch about security work, collaboration or opportunities." }
        section { class: "page-header",
            h1 { "Get in Touch" }
            p { class: "page-subtitle", "Questions, collaboration ideas or a vulnerability to report." }
        }
        section { class: "contact-section",
            form {
                id: "contactForm",
                class: "contact-form",
                novalidate: true,
                onsubmit: move |event| {
                    event.prevent_default();
                    let outcome = form.with_mut(|controller| controller.begin_submit());
                    let draft = match outcome {
                        Ok(draft) => draft,
                        Err(failed) => {
                            if !failed.is_empty() {
                                tracing::debug!("contact: {} invalid fields", failed.len());
                            }
                            return;
                        }
                    };
                    spawn(async move {
                        let result = simulate_submission(draft).await;
                        form.with_mut(|controller| controller.finish(result));
                        let status = form.peek().status().clone();
                        if let FormStatus::Sent(submission, _) = status {
                            sleep_ms(SUCCESS_TTL_MS).await;
                            form.with_mut(|controller| controller.dismiss(submission));
                        }
                    });
                },
                {match &status {
                    FormStatus::Sent(_, message) => rsx! {
                        div { class: "form-message form-message--success", role: "status",
                            span { "{message}" }
                        }
                    },
                    FormStatus::Failed(message) => rsx! {
                        div { class: "form-message form-message--error", role: "alert",
                            span { "{message}" }
                        }
                    },
                    _ => rsx! {},
                }}
                ContactField { form, field: Field::Name, label: "Name" }
                ContactField { form, field: Field::Email, label: "Email" }
                ContactField { form, field: Field::Subject, label: "Subject" }
                ContactField { form, field: Field::Message, label: "Message" }
                ContactField { form, field: Field::Challenge, label: CHALLENGE_PROMPT }
                button {
                    r#type: "submit",
                    class: "btn btn-primary",
                    disabled: sending,
                    if sending { "Sending..." } else { "Send Message" }
                }
            }
            aside { class: "contact-info",
                h2 { "Direct contact" }
                p { "Email: " a { href: "mailto:{config.contact_email}", "{config.contact_email}" } }
                p { "Security reports: " a { href: "mailto:{config.security_email}", "{config.security_email}" } }
                if !config.pgp_key.is_empty() {
                    div { class: "pgp-block",
                        h3 { "PGP key" }
                        pre { id: "pgpKey", class: "pgp-key", "{config.pgp_key}" }
                        CopyButton {
                            source: CopySource::Text(config.pgp_key.clone()),
                            label: "Copy PGP Key".to_string(),
                            class: Some("copy-btn".to_string()),
                            id: Some("copyPgpBtn".to_string()),
                            failure_alert: Some(PGP_COPY_FAILED.to_string()),
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn ContactField(form: Signal<ContactController>, field: Field, label: &'static str) -> Element {
    let mut form = form;
    let id = field.id();
    let error_id = format!("{id}Error");
    let value = form.read().draft().get(field).to_string();
    let invalid = form.read().is_invalid(field);
    let disabled = form.read().is_sending();
    let control_class = if invalid { "form-control error" } else { "form-control" };
    let error_class = if invalid { "form-error show" } else { "form-error" };

    rsx! {
        div { class: "form-group",
            label { r#for: id, "{label}" }
            {match field {
                Field::Message => rsx! {
                    textarea {
                        id,
                        name: id,
                        class: control_class,
                        rows: "6",
                        value: "{value}",
                        disabled,
                        aria_invalid: "{invalid}",
                        aria_describedby: "{error_id}",
                        oninput: move |event| form.with_mut(|controller| controller.input(field, event.value())),
                        onblur: move |_| {
                            form.with_mut(|controller| controller.blur(field));
                        },
                    }
                },
                Field::Subject => rsx! {
                    select {
                        id,
                        name: id,
                        class: control_class,
                        value: "{value}",
                        disabled,
                        aria_invalid: "{invalid}",
                        aria_describedby: "{error_id}",
                        onchange: move |event| form.with_mut(|controller| controller.input(field, event.value())),
                        onblur: move |_| {
                            form.with_mut(|controller| controller.blur(field));
                        },
                        option { value: "", "Select a subject" }
                        for (option_value, option_label) in SUBJECTS {
                            option { key: "{option_value}", value: option_value, "{option_label}" }
                        }
                    }
                },
                _ => rsx! {
                    input {
                        id,
                        name: id,
                        r#type: if field == Field::Email { "email" } else { "text" },
                        class: control_class,
                        value: "{value}",
                        disabled,
                        autocomplete: if field == Field::Challenge { "off" } else { "on" },
                        aria_invalid: "{invalid}",
                        aria_describedby: "{error_id}",
                        oninput: move |event| form.with_mut(|controller| controller.input(field, event.value())),
                        onblur: move |_| {
                            form.with_mut(|controller| controller.blur(field));
                        },
                    }
                },
            }}
            span { id: "{error_id}", class: error_class, role: "alert", "{field.error_message()}" }
        }
    }
}
