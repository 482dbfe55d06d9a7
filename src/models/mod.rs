pub mod question;

pub use question::{Question, QuestionCollection, TokenRequest, TokenResponse};
