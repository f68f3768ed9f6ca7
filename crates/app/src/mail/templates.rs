//! Mail templates.

/// Brand shown in outbound mail.
pub const SITE_NAME: &str = "Shahu Mumbai";

/// Content for the invitation-request confirmation.
#[derive(Debug, Clone)]
pub struct ConfirmationEmailContent {
    pub subject: String,
    pub text: String,
    pub html: String,
}

impl ConfirmationEmailContent {
    /// Build the confirmation for an optional recipient name.
    #[must_use]
    pub fn new(name: Option<&str>) -> Self {
        let name = name.map(str::trim).filter(|name| !name.is_empty());

        Self {
            subject: format!("Your {SITE_NAME} invitation request"),
            text: Self::text_template(name),
            html: Self::html_template(name),
        }
    }

    fn greeting(name: Option<&str>) -> String {
        name.map_or_else(|| "Hello,".to_string(), |name| format!("Dear {name},"))
    }

    fn text_template(name: Option<&str>) -> String {
        format!(
            r"{greeting}

Thank you for requesting an invitation to {SITE_NAME}.

Your request has been received and you are now on our invitation list.
We will write again as soon as your invitation is ready.

--
{SITE_NAME}",
            greeting = Self::greeting(name),
        )
    }

    fn html_template(name: Option<&str>) -> String {
        let greeting = escape_html(&Self::greeting(name));

        format!(
            r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <style>
        body {{ font-family: Georgia, serif; line-height: 1.6; color: #3e2f2f; margin: 0; padding: 0; background: #f8f5f0; }}
        .container {{ max-width: 600px; margin: 0 auto; padding: 40px 20px; }}
        .card {{ background: #fcfaf7; border: 1px solid #a58c74; border-radius: 12px; padding: 40px; }}
        h1 {{ font-style: italic; font-weight: 500; margin-top: 0; }}
        .footer {{ margin-top: 32px; padding-top: 20px; border-top: 1px solid #eadfd3; color: #5c5346; font-size: 12px; }}
    </style>
</head>
<body>
    <div class="container">
        <div class="card">
            <h1>{SITE_NAME}</h1>
            <p>{greeting}</p>
            <p>Thank you for requesting an invitation. Your request has been received and you are now on our invitation list.</p>
            <p>We will write again as soon as your invitation is ready.</p>
            <div class="footer">
                <p>Bringing the Indian Heritage to you.</p>
            </div>
        </div>
    </div>
</body>
</html>"#
        )
    }
}

fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());

    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }

    escaped
}
