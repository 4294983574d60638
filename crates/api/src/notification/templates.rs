use pawhome_domain::{
    date::{describe_days_remaining, format_date},
    AdoptionRequestStatus, Reminder,
};

#[derive(Debug, Clone, PartialEq)]
pub struct EmailContent {
    pub subject: String,
    pub html: String,
}

pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn layout(heading: &str, body: &str) -> String {
    format!(
        "<div style=\"font-family: sans-serif; max-width: 600px; margin: 0 auto;\">\
         <h2 style=\"color: #e07a5f;\">{}</h2>{}\
         <p style=\"color: #888; font-size: 12px;\">PawHome</p></div>",
        escape_html(heading),
        body
    )
}

/// Email copy of an in-app notification
pub fn notification_email(recipient_name: &str, title: &str, message: &str) -> EmailContent {
    let body = format!(
        "<p>Hi {},</p><p>{}</p>",
        escape_html(recipient_name),
        escape_html(message)
    );
    EmailContent {
        subject: title.to_string(),
        html: layout(title, &body),
    }
}

pub fn request_received_email(applicant_name: &str, pet_name: &str) -> EmailContent {
    let subject = format!("We received your request to adopt {}", pet_name);
    let body = format!(
        "<p>Hi {},</p>\
         <p>Thank you for wanting to give {} a home. The foundation will review \
         your request and get back to you soon.</p>",
        escape_html(applicant_name),
        escape_html(pet_name)
    );
    EmailContent {
        html: layout(&subject, &body),
        subject,
    }
}

/// Templated email for a status decision. `Pending` has no template.
pub fn status_email(
    status: AdoptionRequestStatus,
    applicant_name: &str,
    pet_name: &str,
    notes: Option<&str>,
) -> Option<EmailContent> {
    let (subject, text) = match status {
        AdoptionRequestStatus::Approved => (
            format!("Your adoption of {} was approved!", pet_name),
            format!(
                "Great news! Your request to adopt {} has been approved. \
                 The foundation will contact you to arrange the next steps.",
                pet_name
            ),
        ),
        AdoptionRequestStatus::Rejected => (
            format!("Update on your request to adopt {}", pet_name),
            format!(
                "We are sorry, your request to adopt {} was not approved this time. \
                 There are many other pets waiting for a home.",
                pet_name
            ),
        ),
        AdoptionRequestStatus::Contacted => (
            format!("The foundation wants to talk about {}", pet_name),
            format!(
                "The foundation is reviewing your request to adopt {} and will \
                 reach out to you using the contact details you provided.",
                pet_name
            ),
        ),
        AdoptionRequestStatus::Pending => return None,
    };

    let mut body = format!(
        "<p>Hi {},</p><p>{}</p>",
        escape_html(applicant_name),
        escape_html(&text)
    );
    if let Some(notes) = notes.filter(|notes| !notes.trim().is_empty()) {
        body.push_str(&format!(
            "<p><strong>Notes from the foundation:</strong> {}</p>",
            escape_html(notes)
        ));
    }

    Some(EmailContent {
        html: layout(&subject, &body),
        subject,
    })
}

/// One email summarizing every reminder of a recipient. Items are pairs
/// of pet name and reminder.
pub fn reminder_digest_email(recipient_name: &str, items: &[(String, Reminder)]) -> EmailContent {
    let subject = if items.len() == 1 {
        "You have 1 upcoming pet care reminder".to_string()
    } else {
        format!("You have {} upcoming pet care reminders", items.len())
    };

    let rows: String = items
        .iter()
        .map(|(pet_name, reminder)| {
            format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
                escape_html(pet_name),
                escape_html(&reminder.title),
                format_date(&reminder.due_date),
                describe_days_remaining(reminder.days_before)
            )
        })
        .collect();

    let body = format!(
        "<p>Hi {},</p><p>These care events are coming up soon:</p>\
         <table><tr><th>Pet</th><th>Reminder</th><th>Due</th><th>When</th></tr>{}</table>",
        escape_html(recipient_name),
        rows
    );

    EmailContent {
        html: layout(&subject, &body),
        subject,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pawhome_domain::{CareType, ID};

    #[test]
    fn escapes_html() {
        assert_eq!(
            escape_html("<b>Tom & \"Jerry\"</b>"),
            "&lt;b&gt;Tom &amp; &quot;Jerry&quot;&lt;/b&gt;"
        );
        assert_eq!(escape_html("Luna"), "Luna");
    }

    #[test]
    fn user_text_is_escaped_in_templates() {
        let email = status_email(
            AdoptionRequestStatus::Rejected,
            "<script>",
            "Luna",
            Some("<i>sorry</i>"),
        )
        .unwrap();
        assert!(!email.html.contains("<script>"));
        assert!(email.html.contains("&lt;i&gt;sorry&lt;/i&gt;"));
    }

    #[test]
    fn pending_has_no_status_template() {
        assert!(status_email(AdoptionRequestStatus::Pending, "Ana", "Luna", None).is_none());
        for status in [
            AdoptionRequestStatus::Approved,
            AdoptionRequestStatus::Rejected,
            AdoptionRequestStatus::Contacted,
        ] {
            let email = status_email(status, "Ana", "Luna", None).unwrap();
            assert!(email.subject.contains("Luna"));
        }
    }

    #[test]
    fn digest_lists_every_reminder() {
        let reminder = |title: &str, days_before: i64| Reminder {
            id: ID::default(),
            pet_id: ID::default(),
            user_id: ID::default(),
            reminder_type: CareType::Vaccine,
            title: title.to_string(),
            message: String::new(),
            due_date: NaiveDate::from_ymd_opt(2024, 3, 17).unwrap(),
            days_before,
            read: false,
            email_sent: false,
            created: 0,
        };
        let items = vec![
            ("Luna".to_string(), reminder("Vaccine due for Luna", 7)),
            ("Max".to_string(), reminder("Bath due for Max", 0)),
        ];
        let email = reminder_digest_email("Ana", &items);
        assert_eq!(email.subject, "You have 2 upcoming pet care reminders");
        assert!(email.html.contains("Vaccine due for Luna"));
        assert!(email.html.contains("Bath due for Max"));
        assert!(email.html.contains("2024-03-17"));
        assert!(email.html.contains("in 7 days"));
        assert!(email.html.contains("today"));
    }
}
