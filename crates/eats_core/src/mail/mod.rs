//! Transactional mail dispatch over a Mailgun-style HTTP API.
//!
//! # Responsibility
//! - Build form-encoded message payloads with `v:`-prefixed template
//!   variables.
//! - POST them to the provider with Basic authentication.
//!
//! # Invariants
//! - Sending is best-effort: transport and provider errors are logged and
//!   swallowed, never returned to the caller.
//! - No retry state is kept; each message is built, sent once, discarded.
//! - The provider response body is never parsed beyond the status check.

use log::{error, info};
use std::thread;
use std::time::Duration;

const DEFAULT_API_BASE_URL: &str = "https://api.mailgun.net/v3";
const VERIFY_EMAIL_SUBJECT: &str = "Verify Your Email";
const VERIFY_EMAIL_TEMPLATE: &str = "verify-email";
const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);
const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Named substitution variable forwarded to the provider template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailVar {
    pub key: String,
    pub value: String,
}

impl EmailVar {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Static provider configuration for the mail dispatcher.
#[derive(Debug, Clone)]
pub struct MailConfig {
    /// Provider API credential, sent as the Basic auth password.
    pub api_key: String,
    /// Sending domain registered with the provider.
    pub domain: String,
    /// Sender address shown to recipients.
    pub from_email: String,
    /// Provider endpoint root. Overridable for tests.
    pub api_base_url: String,
}

impl MailConfig {
    /// Creates a config pointing at the production provider endpoint.
    pub fn new(
        api_key: impl Into<String>,
        domain: impl Into<String>,
        from_email: impl Into<String>,
    ) -> Self {
        Self {
            api_key: api_key.into(),
            domain: domain.into(),
            from_email: from_email.into(),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
        }
    }

    /// Creates a config with an explicit endpoint root.
    pub fn with_api_base_url(
        api_key: impl Into<String>,
        domain: impl Into<String>,
        from_email: impl Into<String>,
        api_base_url: impl Into<String>,
    ) -> Self {
        Self {
            api_key: api_key.into(),
            domain: domain.into(),
            from_email: from_email.into(),
            api_base_url: api_base_url.into(),
        }
    }
}

/// Best-effort transactional mail dispatcher.
#[derive(Clone)]
pub struct MailService {
    config: MailConfig,
    http: reqwest::blocking::Client,
}

impl MailService {
    /// Creates a dispatcher with a configured HTTP client.
    ///
    /// # Errors
    /// - Returns a human-readable error string when the HTTP client cannot
    ///   be initialized.
    pub fn new(config: MailConfig) -> Result<Self, String> {
        let http = reqwest::blocking::Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|err| format!("failed to build mail http client: {err}"))?;

        Ok(Self { config, http })
    }

    /// Sends one templated message, best-effort.
    ///
    /// # Contract
    /// - Never fails: any transport or provider error is logged and
    ///   swallowed so the triggering operation cannot be blocked by mail
    ///   delivery.
    /// - Each variable becomes a `v:{key}` form field.
    pub fn send_email(&self, to: &str, subject: &str, template: &str, email_vars: &[EmailVar]) {
        let url = format!(
            "{}/{}/messages",
            self.config.api_base_url.trim_end_matches('/'),
            self.config.domain
        );

        let mut form: Vec<(String, String)> = vec![
            ("from".to_string(), self.config.from_email.clone()),
            ("to".to_string(), to.to_string()),
            ("subject".to_string(), subject.to_string()),
            ("template".to_string(), template.to_string()),
        ];
        for email_var in email_vars {
            form.push((format!("v:{}", email_var.key), email_var.value.clone()));
        }

        let result = self
            .http
            .post(&url)
            .basic_auth("api", Some(self.config.api_key.as_str()))
            .form(&form)
            .send();

        match result {
            Ok(response) => match response.error_for_status() {
                Ok(_) => {
                    info!("event=mail_send module=mail status=ok template={template}");
                }
                Err(err) => {
                    error!(
                        "event=mail_send module=mail status=error template={template} error_code=provider_rejected error={err}"
                    );
                }
            },
            Err(err) => {
                error!(
                    "event=mail_send module=mail status=error template={template} error_code=transport_failed error={err}"
                );
            }
        }
    }

    /// Dispatches the account verification mail on a detached thread.
    ///
    /// Fire-and-forget: there is no result channel back to the caller, and
    /// delivery failure surfaces only in the log.
    pub fn send_verification_email(&self, email: &str, code: &str) {
        let mailer = self.clone();
        let email = email.to_string();
        let code = code.to_string();

        thread::spawn(move || {
            mailer.send_email(
                &email,
                VERIFY_EMAIL_SUBJECT,
                VERIFY_EMAIL_TEMPLATE,
                &[
                    EmailVar::new("code", code),
                    EmailVar::new("username", email.clone()),
                ],
            );
        });
    }
}
