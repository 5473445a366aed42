use serde::Deserialize;

/// Maximum length for short text columns (post title, comment author).
pub const MAX_SHORT_TEXT: usize = 200;

#[derive(Debug, Clone)]
pub struct FieldError {
    pub field: &'static str,
    pub message: &'static str,
}

fn required(
    errors: &mut Vec<FieldError>,
    field: &'static str,
    value: &str,
    max_length: Option<usize>,
) {
    if value.trim().is_empty() {
        errors.push(FieldError {
            field,
            message: "This field is required",
        });
    } else if max_length.is_some_and(|max| value.chars().count() > max) {
        errors.push(FieldError {
            field,
            message: "This field is too long (200 characters max)",
        });
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PostForm {
    pub title: String,
    pub text: String,
}

impl PostForm {
    /// Structural checks only; an empty vec means the form is valid.
    pub fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        required(&mut errors, "title", &self.title, Some(MAX_SHORT_TEXT));
        required(&mut errors, "text", &self.text, None);
        errors
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CommentForm {
    pub author: String,
    pub text: String,
}

impl CommentForm {
    pub fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        required(&mut errors, "author", &self.author, Some(MAX_SHORT_TEXT));
        required(&mut errors, "text", &self.text, None);
        errors
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
    pub next: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_post_form_has_no_errors() {
        let form = PostForm {
            title: "First post".to_string(),
            text: "Hello, world".to_string(),
        };

        assert!(form.validate().is_empty());
    }

    #[test]
    fn blank_fields_are_rejected() {
        let form = PostForm {
            title: "   ".to_string(),
            text: String::new(),
        };

        let errors = form.validate();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].field, "title");
        assert_eq!(errors[1].field, "text");
    }

    #[test]
    fn overlong_title_is_rejected() {
        let form = PostForm {
            title: "x".repeat(MAX_SHORT_TEXT + 1),
            text: "body".to_string(),
        };

        let errors = form.validate();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "title");
    }

    #[test]
    fn title_length_counts_chars_not_bytes() {
        let form = PostForm {
            title: "あ".repeat(MAX_SHORT_TEXT),
            text: "body".to_string(),
        };

        assert!(form.validate().is_empty());
    }

    #[test]
    fn comment_form_requires_author_and_text() {
        let form = CommentForm::default();

        let errors = form.validate();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].field, "author");
        assert_eq!(errors[1].field, "text");
    }
}
