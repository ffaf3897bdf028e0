//! Notification composition and SMTP submission.

use crate::core::{NotifierError, Protocol, Result, ScanConfig};
use crate::scanner::ScanReport;
use lettre::message::Mailbox;
use lettre::{Message, SmtpTransport, Transport};
use log::debug;
use std::collections::BTreeSet;

const SENDER: &str = "DMCC Protocol Notifier <sean.kelly@jpl.nasa.gov>";
const SUBJECT: &str = "Changes detected in biomarkers listed in protocols from the DMCC";

/// Friendly display name for an identifier: the trailing path segment, with
/// any query or fragment stripped.
fn friendly(identifier: &str) -> &str {
    let path = identifier.split(['?', '#']).next().unwrap_or(identifier);
    path.rsplit('/').next().unwrap_or(path)
}

/// Composes the notification body: a greeting, up to three sections (each
/// included only when its collection is non-empty), and the closing lines.
pub fn compose(
    to: &str,
    new: &[Protocol],
    changed: &[(Protocol, Protocol)],
    dropped: &BTreeSet<String>,
) -> String {
    let mut body = vec![format!(
        "👋 Greetings, {}!\n\nI've detected some changes made at the DMCC to the biomarker \
         annotations on protocols. The following details the changes:\n",
        to
    )];
    if !new.is_empty() {
        body.push(
            "\n👶 NEW PROTOCOLS\n\nThese are brand new protocols that appeared since my last \
             scan:\n\n"
                .to_string(),
        );
        body.push(
            new.iter()
                .map(|p| {
                    format!(
                        "• {}: \"{}\" (biomarkers: \"{}\")",
                        friendly(&p.identifier),
                        p.title,
                        p.biomarkers
                    )
                })
                .collect::<Vec<_>>()
                .join("\n"),
        );
    }
    if !changed.is_empty() {
        body.push(
            "\n👛 CHANGED BIOMARKERS\n\nThese protocols have different biomarker annotations \
             since the last scan:\n\n"
                .to_string(),
        );
        for (old, updated) in changed {
            body.push(format!("• {} \"{}\":\n", friendly(&old.identifier), old.title));
            body.push(format!(
                "    biomarkers was \"{}\", now is \"{}\"\n",
                old.biomarkers, updated.biomarkers
            ));
        }
    }
    if !dropped.is_empty() {
        body.push(
            "\n💀 DELETED PROTOCOLS\n\nThese protocols no longer appear in the DMCC's data:\n\n"
                .to_string(),
        );
        body.push(
            dropped
                .iter()
                .map(|identifier| format!("• {}", friendly(identifier)))
                .collect::<Vec<_>>()
                .join("\n"),
        );
    }
    body.push("\n\n🙏 Thank you for your attention.".to_string());
    body.push(
        "\n\nBy the way, you can search for protocols by number on the portal now. Just type \
         the number in the search box!"
            .to_string(),
    );
    body.concat()
}

/// Sends one email summarizing `report` to the configured recipients over
/// plain SMTP.
///
/// # Errors
/// Returns `MailError` when an address fails to parse, the message cannot be
/// built, or the relay refuses the submission.
pub fn notify(config: &ScanConfig, report: &ScanReport) -> Result<()> {
    debug!("Sending notifications to {}", config.recipients);
    let sender: Mailbox = SENDER
        .parse()
        .map_err(|e| NotifierError::MailError(format!("Invalid sender address: {}", e)))?;
    let mut builder = Message::builder().from(sender).subject(SUBJECT);
    for recipient in config.recipients.split(',') {
        let recipient = recipient.trim();
        if recipient.is_empty() {
            continue;
        }
        let mailbox: Mailbox = recipient.parse().map_err(|e| {
            NotifierError::MailError(format!("Invalid recipient '{}': {}", recipient, e))
        })?;
        builder = builder.to(mailbox);
    }
    let body = compose(
        &config.recipients,
        &report.new,
        &report.changed,
        &report.dropped,
    );
    let message = builder
        .body(body)
        .map_err(|e| NotifierError::MailError(format!("Failed to build message: {}", e)))?;
    let mailer = SmtpTransport::builder_dangerous(config.mail_host.as_str()).build();
    mailer.send(&message).map_err(|e| {
        NotifierError::MailError(format!(
            "Failed to send via '{}': {}",
            config.mail_host, e
        ))
    })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::friendly;

    #[test]
    fn friendly_takes_trailing_path_segment() {
        assert_eq!(friendly("http://edrn.nci.nih.gov/data/protocols/189"), "189");
        assert_eq!(friendly("http://host/path/189?view=full"), "189");
        assert_eq!(friendly("http://host/path/189#section"), "189");
        assert_eq!(friendly("no-slashes-here"), "no-slashes-here");
    }
}
