mod email;

pub use email::{
    DisabledEmailService, EmailSendResult, HttpEmailService, IEmailService, InMemoryEmailService,
    SentEmail,
};
