use super::templates::{notification_email, EmailContent};
use pawhome_domain::{Notification, NotificationKind, ID};
use pawhome_infra::PawContext;
use tracing::{error, warn};

/// What a `User` should be told about
#[derive(Debug, Clone)]
pub struct NotificationMessage {
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    pub adoption_request_id: Option<ID>,
    /// Sent in addition to the plain copy of the notification
    pub templated_email: Option<EmailContent>,
}

/// Persists the in-app `Notification` and then attempts the emails.
///
/// Only the persistence of the notification can fail. Every email is
/// attempted on its own and a failed delivery is logged, so the
/// notification is never rolled back and never exists only as an email.
pub async fn notify(
    ctx: &PawContext,
    recipient_id: &ID,
    msg: NotificationMessage,
) -> anyhow::Result<Notification> {
    let mut notification = Notification::new(
        recipient_id.clone(),
        msg.kind,
        msg.title,
        msg.message,
        msg.adoption_request_id,
        ctx.sys.get_timestamp_millis(),
    );
    ctx.repos.notifications.insert(&notification).await?;

    let recipient = match ctx.repos.users.find(recipient_id).await {
        Some(user) => user,
        None => {
            warn!(
                "Unable to find user {} to email notification {}",
                recipient_id, notification.id
            );
            return Ok(notification);
        }
    };

    let copy = notification_email(&recipient.name, &notification.title, &notification.message);
    let res = ctx
        .email
        .send(&recipient.email, &copy.subject, &copy.html)
        .await;
    if res.success {
        match ctx
            .repos
            .notifications
            .mark_email_sent(&notification.id, &recipient.email)
            .await
        {
            Ok(_) => {
                notification.email_sent = true;
                notification.email = Some(recipient.email.clone());
            }
            Err(e) => error!(
                "Unable to flag notification {} as emailed: {:?}",
                notification.id, e
            ),
        }
    } else {
        warn!(
            "Unable to email notification {} to {}: {:?}",
            notification.id, recipient.email, res.error
        );
    }

    if let Some(templated) = msg.templated_email {
        let res = ctx
            .email
            .send(&recipient.email, &templated.subject, &templated.html)
            .await;
        if !res.success {
            warn!(
                "Unable to send \"{}\" to {}: {:?}",
                templated.subject, recipient.email, res.error
            );
        }
    }

    Ok(notification)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_utils::{insert_user, setup_context};

    fn message(templated_email: Option<EmailContent>) -> NotificationMessage {
        NotificationMessage {
            kind: NotificationKind::AdoptionRequestApproved,
            title: "Approved".into(),
            message: "You can pick up Luna".into(),
            adoption_request_id: None,
            templated_email,
        }
    }

    #[actix_web::test]
    async fn persists_and_emails_the_notification() {
        let test = setup_context();
        let ctx = &test.ctx;
        let user = insert_user(ctx, "Ana", "ana@example.com").await;

        let notification = notify(ctx, &user.id, message(None)).await.unwrap();
        assert!(notification.email_sent);

        let stored = ctx.repos.notifications.find(&notification.id).await.unwrap();
        assert!(stored.email_sent);
        assert!(!stored.read);
        assert_eq!(stored.email.as_deref(), Some("ana@example.com"));

        let sent = test.email.sent_to("ana@example.com");
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].subject, "Approved");
    }

    #[actix_web::test]
    async fn email_failure_keeps_the_notification() {
        let test = setup_context();
        let ctx = &test.ctx;
        let user = insert_user(ctx, "Ana", "ana@example.com").await;
        test.email.fail_for("ana@example.com");

        let templated = EmailContent {
            subject: "Templated".into(),
            html: "<p>hi</p>".into(),
        };
        let notification = notify(ctx, &user.id, message(Some(templated)))
            .await
            .unwrap();
        assert!(!notification.email_sent);

        let stored = ctx.repos.notifications.find(&notification.id).await.unwrap();
        assert!(!stored.email_sent);
        assert!(stored.email.is_none());
        assert!(test.email.outbox().is_empty());
    }

    #[actix_web::test]
    async fn sends_templated_email_next_to_the_copy() {
        let test = setup_context();
        let ctx = &test.ctx;
        let user = insert_user(ctx, "Ana", "ana@example.com").await;

        let templated = EmailContent {
            subject: "Templated".into(),
            html: "<p>hi</p>".into(),
        };
        notify(ctx, &user.id, message(Some(templated))).await.unwrap();

        let subjects: Vec<_> = test
            .email
            .sent_to("ana@example.com")
            .into_iter()
            .map(|email| email.subject)
            .collect();
        assert_eq!(subjects, vec!["Approved".to_string(), "Templated".to_string()]);
    }

    #[actix_web::test]
    async fn unknown_recipient_still_gets_the_notification() {
        let test = setup_context();
        let ctx = &test.ctx;
        let user_id = ID::default();

        let notification = notify(ctx, &user_id, message(None)).await.unwrap();
        assert!(!notification.email_sent);
        assert_eq!(
            ctx.repos.notifications.find_by_user(&user_id).await.unwrap().len(),
            1
        );
        assert!(test.email.outbox().is_empty());
    }
}
